#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Pure zoning aggregation over parcel collections.
//!
//! Analysis responses arrive whole, so aggregation is a plain fold over an
//! immutable slice — no incremental update, no partial-aggregate state.
//! The reduction is additive and keyed into a `BTreeMap`, which makes the
//! output independent of input order (modulo float summation order, well
//! inside 1e-6 relative tolerance for realistic parcel counts).

use std::collections::BTreeMap;

use parcel_map_analytics_models::{ZoningGroup, ZoningGroupKey, ZoningSummary};
use parcel_map_parcel_models::{AnalysisResult, Parcel};

/// Buckets parcels into zoning groups.
///
/// Group key is the uppercase leading character of the zoning code;
/// parcels with a missing or empty code fall into
/// [`ZoningGroupKey::Unknown`]. Missing acreage contributes 0. An empty
/// input yields an empty mapping.
#[must_use]
pub fn aggregate(parcels: &[Parcel]) -> BTreeMap<ZoningGroupKey, ZoningGroup> {
    let mut groups: BTreeMap<ZoningGroupKey, ZoningGroup> = BTreeMap::new();

    for parcel in parcels {
        let code = parcel.zoning_code.as_deref().unwrap_or("");
        let key = ZoningGroupKey::from_code(code);

        let group = groups.entry(key).or_default();
        group.count += 1;
        group.acres += parcel.acres.unwrap_or(0.0);
        if !code.is_empty() {
            group.codes.insert(code.to_string());
        }
    }

    groups
}

/// Combines the backend's region totals with the zoning breakdown into the
/// packet the presentation boundary renders.
#[must_use]
pub fn summarize(result: &AnalysisResult) -> ZoningSummary {
    ZoningSummary {
        total_parcels: result.total_parcels,
        total_acreage: result.total_acreage,
        total_value: result.total_value,
        average_score: result.average_score,
        ai_summary: result.ai_summary.clone(),
        groups: aggregate(&result.parcels),
    }
}
