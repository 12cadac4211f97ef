#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Selection, request lifecycle, and snapshot types for the parcel map
//! session.
//!
//! The selection is a sum type rather than nullable fields scattered
//! across components — "is there a polygon, a point, or neither" is the
//! single fact the rest of the system branches on. Snapshot types are
//! what the presentation boundary renders and serialize as camelCase.

use parcel_map_analytics_models::ZoningSummary;
use parcel_map_geometry::{LngLat, Ring};
use parcel_map_parcel_models::{AnalysisResult, Parcel};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use thiserror::Error;

/// Opaque token tying a request lifecycle to the selection that spawned
/// it.
///
/// Ids are handed out monotonically by the session controller; a
/// completion tagged with anything other than the current id is stale.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct SelectionId(u64);

impl SelectionId {
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SelectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The region currently of interest.
///
/// Exactly one selection is active at a time; creating a new one
/// supersedes the prior one regardless of its lifecycle state.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum Selection {
    /// Nothing selected.
    #[default]
    None,
    /// A lasso-drawn region.
    Polygon(Ring),
    /// A single clicked point.
    PointQuery(LngLat),
}

/// What kind of backend call a lifecycle is tracking.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum RequestKind {
    /// Area analysis for a drawn polygon.
    PolygonAnalysis,
    /// Single-parcel lookup for a clicked point.
    PointLookup,
}

/// Coarse lifecycle state exposed to the presentation boundary.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum LifecycleStatus {
    /// No request associated with the current selection.
    Idle,
    /// A request is in flight.
    Pending,
    /// The request resolved; an outcome is available.
    Success,
    /// The request failed; an [`ErrorKind`] is available.
    Error,
}

/// The geometry a request is about.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestTarget {
    /// Analyze everything inside this ring.
    Polygon(Ring),
    /// Look up the parcel under this point.
    Point(LngLat),
}

/// A command from the controller to the transport driver: execute this
/// call and report back with the same [`SelectionId`].
///
/// The controller never touches the network itself; carrying the id
/// through the async boundary is what makes supersession detection work.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRequest {
    /// Identifies the selection this request belongs to.
    pub id: SelectionId,
    /// What to ask the backend.
    pub target: RequestTarget,
}

impl PendingRequest {
    #[must_use]
    pub const fn kind(&self) -> RequestKind {
        match self.target {
            RequestTarget::Polygon(_) => RequestKind::PolygonAnalysis,
            RequestTarget::Point(_) => RequestKind::PointLookup,
        }
    }
}

/// A successfully parsed backend response.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestOutcome {
    /// Area analysis result.
    Analysis(AnalysisResult),
    /// Point lookup result; `None` is the explicit "no parcel here".
    Lookup(Option<Parcel>),
}

/// Classified request failure carried in the lifecycle `Error` state.
///
/// Not-found is deliberately absent: a lookup that finds nothing is a
/// successful outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ErrorKind {
    /// Network failure, timeout, or non-2xx status after retries.
    #[error("transport error: {message}")]
    Transport {
        /// Description of the transport failure.
        message: String,
    },
    /// Response arrived but failed shape validation.
    #[error("malformed response: {message}")]
    MalformedResponse {
        /// Which part of the response did not match the contract.
        message: String,
    },
}

/// Read-only view of the session for the presentation boundary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// The active selection.
    pub selection: Selection,
    /// Coarse lifecycle state.
    pub status: LifecycleStatus,
    /// Failure detail when `status` is `Error`.
    pub error: Option<ErrorKind>,
    /// Resolved outcome when `status` is `Success`.
    pub outcome: Option<SnapshotOutcome>,
}

/// What a successful request produced, shaped for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum SnapshotOutcome {
    /// Aggregated statistics for a drawn region. An empty region renders
    /// as a success with zero-valued statistics, never as an error.
    Area(ZoningSummary),
    /// The parcel under a clicked point.
    ParcelDetail(Parcel),
    /// A point lookup that found nothing.
    NoParcelHere,
}
