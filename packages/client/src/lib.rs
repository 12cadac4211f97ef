#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! HTTP client for the parcel analysis and lookup backend.
//!
//! The session core never touches the network; this crate turns a
//! [`PendingRequest`] into the backend's wire shape and a raw response
//! into a classified outcome. Axis order is longitude-then-latitude in
//! the polygon payload and `lat`/`lng` query parameters for lookups —
//! both fixed boundary contracts.
//!
//! Retry policy lives here and only here: transient failures (connect
//! errors, timeouts, HTTP 429/5xx) are retried with exponential backoff,
//! HTTP 4xx is permanent, and the layers above never retry.

pub mod parsing;
mod retry;

use std::time::Duration;

use async_trait::async_trait;
use parcel_map_geometry::{LngLat, Ring};
use parcel_map_parcel_models::{AnalysisResult, Parcel};
use parcel_map_session_models::{ErrorKind, PendingRequest, RequestOutcome, RequestTarget};
use thiserror::Error;

/// Per-request timeout. The lifecycle treats a timeout like any other
/// transport failure tagged with the original selection id.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors from talking to the analysis backend.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Request could not be sent or the connection failed mid-flight.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("HTTP {status}")]
    Status {
        /// The response status code.
        status: reqwest::StatusCode,
    },

    /// The response body did not match the expected shape.
    #[error("malformed response: {message}")]
    Malformed {
        /// Which part of the response did not match the contract.
        message: String,
    },
}

impl ClientError {
    /// Classifies this failure for the request lifecycle.
    #[must_use]
    pub fn to_error_kind(&self) -> ErrorKind {
        match self {
            Self::Http(_) | Self::Status { .. } => ErrorKind::Transport {
                message: self.to_string(),
            },
            Self::Malformed { message } => ErrorKind::MalformedResponse {
                message: message.clone(),
            },
        }
    }
}

/// The analysis backend as the session core sees it.
///
/// Implemented by [`HttpAnalysisClient`] for the real backend and by
/// in-memory fakes in tests.
#[async_trait]
pub trait AnalysisApi: Send + Sync {
    /// Analyzes all parcels intersecting the given closed ring.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails or the response does
    /// not match the analysis contract.
    async fn analyze_polygon(&self, ring: &Ring) -> Result<AnalysisResult, ClientError>;

    /// Looks up the parcel under the given point. `Ok(None)` is the
    /// backend's explicit "no parcel here".
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails or the response does
    /// not match the lookup contract.
    async fn lookup_point(&self, point: LngLat) -> Result<Option<Parcel>, ClientError>;
}

/// `reqwest`-backed [`AnalysisApi`] implementation.
pub struct HttpAnalysisClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAnalysisClient {
    /// Creates a client for the backend at `base_url` (no trailing
    /// slash).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the underlying HTTP client cannot be
    /// constructed.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl AnalysisApi for HttpAnalysisClient {
    async fn analyze_polygon(&self, ring: &Ring) -> Result<AnalysisResult, ClientError> {
        let url = format!("{}/api/v1/parcels/analyze", self.base_url);
        let payload = analyze_payload(ring);

        let body = retry::send_json(|| self.client.post(&url).json(&payload)).await?;
        parsing::parse_analysis_response(&body)
    }

    async fn lookup_point(&self, point: LngLat) -> Result<Option<Parcel>, ClientError> {
        let url = format!("{}/api/v1/parcels/lookup", self.base_url);

        let body = retry::send_json(|| {
            self.client
                .get(&url)
                .query(&[("lat", point.lat), ("lng", point.lng)])
        })
        .await?;
        parsing::parse_lookup_response(&body)
    }
}

/// Builds the polygon analysis payload: a GeoJSON polygon with the drawn
/// ring as its single (closed) linear ring, coordinates
/// longitude-then-latitude.
#[must_use]
pub fn analyze_payload(ring: &Ring) -> serde_json::Value {
    serde_json::json!({
        "type": "Polygon",
        "coordinates": [ring.positions()],
    })
}

/// Executes a controller command against a backend and classifies the
/// result for the lifecycle.
///
/// # Errors
///
/// Returns the classified [`ErrorKind`] the lifecycle records when the
/// call fails.
pub async fn dispatch(
    api: &(impl AnalysisApi + ?Sized),
    request: &PendingRequest,
) -> Result<RequestOutcome, ErrorKind> {
    let result = match &request.target {
        RequestTarget::Polygon(ring) => api
            .analyze_polygon(ring)
            .await
            .map(RequestOutcome::Analysis),
        RequestTarget::Point(point) => api
            .lookup_point(*point)
            .await
            .map(RequestOutcome::Lookup),
    };

    result.map_err(|e| {
        log::error!("{} request {} failed: {e}", request.kind(), request.id);
        e.to_error_kind()
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use parcel_map_analytics_models::ZoningGroupKey;
    use parcel_map_geometry::normalize;
    use parcel_map_session::SessionController;
    use parcel_map_session_models::{LifecycleStatus, SelectionId, SnapshotOutcome};

    use super::*;

    struct FlakyBackend;

    #[async_trait]
    impl AnalysisApi for FlakyBackend {
        async fn analyze_polygon(&self, _ring: &Ring) -> Result<AnalysisResult, ClientError> {
            Err(ClientError::Status {
                status: reqwest::StatusCode::BAD_GATEWAY,
            })
        }

        async fn lookup_point(&self, _point: LngLat) -> Result<Option<Parcel>, ClientError> {
            Err(ClientError::Malformed {
                message: "missing found".to_string(),
            })
        }
    }

    /// Answers every analysis with a fixed two-parcel region and records
    /// the wire payload it would have sent.
    #[derive(Default)]
    struct FixtureBackend {
        sent_payload: Mutex<Option<serde_json::Value>>,
    }

    #[async_trait]
    impl AnalysisApi for FixtureBackend {
        async fn analyze_polygon(&self, ring: &Ring) -> Result<AnalysisResult, ClientError> {
            *self.sent_payload.lock().unwrap() = Some(analyze_payload(ring));
            Ok(AnalysisResult {
                total_parcels: 2,
                total_acreage: 3.5,
                total_value: None,
                average_score: None,
                ai_summary: None,
                parcels: vec![parcel("1", "R1", 2.5), parcel("2", "C2", 1.0)],
            })
        }

        async fn lookup_point(&self, _point: LngLat) -> Result<Option<Parcel>, ClientError> {
            Ok(None)
        }
    }

    fn triangle_ring() -> Ring {
        normalize(&[
            LngLat::new(-122.6, 45.63),
            LngLat::new(-122.59, 45.63),
            LngLat::new(-122.595, 45.64),
        ])
        .unwrap()
    }

    fn parcel(id: &str, zoning: &str, acres: f64) -> Parcel {
        Parcel {
            id: id.to_string(),
            geometry: triangle_ring(),
            zoning_code: Some(zoning.to_string()),
            acres: Some(acres),
            site_address: None,
            owner_name: None,
            total_value: None,
            land_value: None,
            building_value: None,
            year_built: None,
        }
    }

    #[test]
    fn analyze_payload_matches_the_wire_contract() {
        let payload = analyze_payload(&triangle_ring());
        assert_eq!(
            payload,
            serde_json::json!({
                "type": "Polygon",
                "coordinates": [[
                    [-122.6, 45.63],
                    [-122.59, 45.63],
                    [-122.595, 45.64],
                    [-122.6, 45.63],
                ]],
            })
        );
    }

    #[tokio::test]
    async fn dispatch_classifies_transport_failures() {
        let request = PendingRequest {
            id: SelectionId::new(1),
            target: RequestTarget::Polygon(triangle_ring()),
        };
        let error = dispatch(&FlakyBackend, &request).await.unwrap_err();
        assert!(matches!(error, ErrorKind::Transport { .. }));
    }

    #[tokio::test]
    async fn dispatch_classifies_malformed_responses() {
        let request = PendingRequest {
            id: SelectionId::new(2),
            target: RequestTarget::Point(LngLat::new(-122.6, 45.63)),
        };
        let error = dispatch(&FlakyBackend, &request).await.unwrap_err();
        assert!(matches!(error, ErrorKind::MalformedResponse { .. }));
    }

    // The full draw-to-display path: a lasso triangle becomes the exact
    // wire payload, the mocked two-parcel response lands under the same
    // selection id, and the snapshot carries the aggregated zoning mix.
    #[tokio::test]
    async fn drawn_triangle_flows_through_to_aggregated_groups() {
        let mut controller = SessionController::new();
        let pending = controller
            .on_polygon_drawn(&[
                LngLat::new(-122.6, 45.63),
                LngLat::new(-122.59, 45.63),
                LngLat::new(-122.595, 45.64),
            ])
            .unwrap();

        let backend = FixtureBackend::default();
        let outcome = dispatch(&backend, &pending).await.unwrap();
        controller.on_resolved(pending.id, outcome);

        let payload = backend.sent_payload.lock().unwrap().take().unwrap();
        assert_eq!(
            payload,
            serde_json::json!({
                "type": "Polygon",
                "coordinates": [[
                    [-122.6, 45.63],
                    [-122.59, 45.63],
                    [-122.595, 45.64],
                    [-122.6, 45.63],
                ]],
            })
        );

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.status, LifecycleStatus::Success);
        let Some(SnapshotOutcome::Area(summary)) = snapshot.outcome else {
            panic!("expected an area outcome");
        };
        assert_eq!(summary.total_parcels, 2);

        let residential = &summary.groups[&ZoningGroupKey::Code('R')];
        assert_eq!(residential.count, 1);
        assert!((residential.acres - 2.5).abs() < 1e-9);
        assert_eq!(residential.codes.iter().collect::<Vec<_>>(), vec!["R1"]);

        let commercial = &summary.groups[&ZoningGroupKey::Code('C')];
        assert_eq!(commercial.count, 1);
        assert!((commercial.acres - 1.0).abs() < 1e-9);
        assert_eq!(commercial.codes.iter().collect::<Vec<_>>(), vec!["C2"]);
    }
}
