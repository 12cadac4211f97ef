#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Address-to-coordinate lookup for turning typed addresses into point
//! selections.
//!
//! Queries an `ArcGIS` `findAddressCandidates` endpoint (the hosted World
//! Geocoder by default — free, no API key) for the single best candidate.
//! The candidate's location then drives a normal point-click selection;
//! nothing downstream knows the point came from an address.

use parcel_map_geometry::LngLat;
use thiserror::Error;

/// The hosted `ArcGIS` World Geocoder endpoint used by default.
pub const DEFAULT_GEOCODE_URL: &str = "https://geocode.arcgis.com/arcgis/rest/services/World/GeocodeServer/findAddressCandidates";

/// Errors from geocoding operations.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response parsing failed.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of what went wrong.
        message: String,
    },
}

/// The best candidate the geocoder found for an address.
#[derive(Debug, Clone)]
pub struct AddressCandidate {
    /// Candidate location, longitude-then-latitude.
    pub location: LngLat,
    /// The matched/canonical address returned by the geocoder.
    pub matched_address: Option<String>,
    /// Match confidence score (0-100), when the service reports one.
    pub score: Option<f64>,
}

/// Geocodes a single-line address, returning the best candidate.
///
/// No candidates is a normal outcome (`Ok(None)`), mirroring the
/// point-lookup "nothing here" policy.
///
/// # Errors
///
/// Returns [`GeocodeError`] if the HTTP request or response parsing
/// fails.
pub async fn find_candidate(
    client: &reqwest::Client,
    base_url: &str,
    address: &str,
) -> Result<Option<AddressCandidate>, GeocodeError> {
    let resp = client
        .get(base_url)
        .query(&[
            ("SingleLine", address),
            ("f", "json"),
            ("outFields", "Match_addr,Addr_type"),
            ("maxLocations", "1"),
        ])
        .send()
        .await?;
    let body: serde_json::Value = resp.json().await?;

    parse_candidates(&body)
}

/// Parses the JSON response from a `findAddressCandidates` endpoint.
fn parse_candidates(body: &serde_json::Value) -> Result<Option<AddressCandidate>, GeocodeError> {
    let candidates = body["candidates"]
        .as_array()
        .ok_or_else(|| GeocodeError::Parse {
            message: "missing candidates array".to_string(),
        })?;

    let Some(first) = candidates.first() else {
        return Ok(None);
    };

    let lng = first["location"]["x"]
        .as_f64()
        .ok_or_else(|| GeocodeError::Parse {
            message: "candidate missing location.x".to_string(),
        })?;
    let lat = first["location"]["y"]
        .as_f64()
        .ok_or_else(|| GeocodeError::Parse {
            message: "candidate missing location.y".to_string(),
        })?;

    Ok(Some(AddressCandidate {
        location: LngLat::new(lng, lat),
        matched_address: first["address"].as_str().map(String::from),
        score: first["score"].as_f64(),
    }))
}
