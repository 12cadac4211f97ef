#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Parcel domain types shared across the parcel map system.
//!
//! These are the values the analysis backend returns. The core never
//! mutates them — a [`Parcel`] is an immutable fact received in a
//! response. Serialization uses camelCase for the presentation boundary;
//! the backend wire shape is parsed field-by-field in the client crate.

use parcel_map_geometry::Ring;
use serde::{Deserialize, Serialize};

/// A single tax parcel as returned by the analysis backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parcel {
    /// Backend parcel identifier (serial number or parcel id).
    pub id: String,
    /// Parcel boundary, exterior ring only, closed.
    pub geometry: Ring,
    /// Raw zoning code, e.g. `"R1"` or `"C2"`. Absent for unzoned lots.
    pub zoning_code: Option<String>,
    /// Lot size in acres.
    pub acres: Option<f64>,
    /// Situs address of the lot.
    pub site_address: Option<String>,
    /// Owner of record.
    pub owner_name: Option<String>,
    /// Combined land + building assessed value.
    pub total_value: Option<f64>,
    /// Assessed land value.
    pub land_value: Option<f64>,
    /// Assessed building value.
    pub building_value: Option<f64>,
    /// Year the primary structure was built.
    pub year_built: Option<i32>,
}

/// The full analysis packet for a drawn region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Number of parcels intersecting the drawn region.
    pub total_parcels: u64,
    /// Sum of parcel acreage inside the region.
    pub total_acreage: f64,
    /// Sum of parcel assessed values inside the region.
    pub total_value: Option<f64>,
    /// Mean investment score across parcels, when the backend computes one.
    pub average_score: Option<f64>,
    /// Narrative summary generated by the backend.
    pub ai_summary: Option<String>,
    /// The parcels themselves, for per-lot display and highlighting.
    pub parcels: Vec<Parcel>,
}
