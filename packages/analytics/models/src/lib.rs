#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Derived zoning statistics types for parcel analysis.
//!
//! Parcels are bucketed by the leading character of their zoning code
//! (`"R1"` and `"R5"` both land in group `R`), with a sentinel group for
//! parcels that carry no code at all. These types are derived per
//! response, never persisted.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Serialize, Serializer};

/// Bucket key for a zoning group.
///
/// Lettered groups sort before the sentinel, so `Unknown` always renders
/// last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ZoningGroupKey {
    /// Uppercase leading character of the zoning code, e.g. `R` or `C`.
    Code(char),
    /// Parcels with a missing or empty zoning code.
    Unknown,
}

impl ZoningGroupKey {
    /// Classifies a raw zoning code into its group key.
    ///
    /// The key is the uppercase first character; an empty code maps to
    /// [`Self::Unknown`].
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        code.chars()
            .next()
            .map_or(Self::Unknown, |c| Self::Code(c.to_ascii_uppercase()))
    }
}

impl std::fmt::Display for ZoningGroupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Code(c) => write!(f, "{c}"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

// JSON map keys must be strings, so the key serializes via Display.
impl Serialize for ZoningGroupKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Aggregated statistics for one zoning group.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoningGroup {
    /// Number of parcels in the group.
    pub count: u64,
    /// Sum of parcel acreage in the group. Parcels without an acreage
    /// figure contribute 0.
    pub acres: f64,
    /// Distinct raw zoning codes observed, for example-code display.
    pub codes: BTreeSet<String>,
}

/// The full statistics packet handed to the presentation boundary after a
/// successful area analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoningSummary {
    /// Number of parcels intersecting the region.
    pub total_parcels: u64,
    /// Sum of parcel acreage across the region.
    pub total_acreage: f64,
    /// Sum of assessed values across the region.
    pub total_value: Option<f64>,
    /// Mean investment score, when the backend computes one.
    pub average_score: Option<f64>,
    /// Narrative summary generated by the backend.
    pub ai_summary: Option<String>,
    /// Per-group breakdown, keyed by zoning group.
    pub groups: BTreeMap<ZoningGroupKey, ZoningGroup>,
}
