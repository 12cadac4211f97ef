#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line driver for parcel zoning analysis.
//!
//! Each subcommand plays one user gesture against a live backend — a
//! lasso polygon, a map click, or an address search — waits for the
//! request to settle, and renders the resulting session snapshot. The
//! session controller is exactly the one a map frontend would drive; the
//! terminal output here is just another presentation boundary.

mod render;

use clap::{Parser, Subcommand};
use parcel_map_client::{AnalysisApi, HttpAnalysisClient};
use parcel_map_geometry::LngLat;
use parcel_map_session::SessionController;
use parcel_map_session_models::PendingRequest;

#[derive(Parser)]
#[command(name = "parcel_map_cli", about = "Parcel zoning analysis tool")]
struct Cli {
    /// Base URL of the analysis backend. Falls back to the
    /// `PARCEL_MAP_BASE_URL` environment variable, then to localhost.
    #[arg(long)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze all parcels inside a lasso polygon
    Analyze {
        /// Ring vertex as `lng,lat`; repeat at least 3 times. The ring
        /// may be open — it is closed automatically.
        #[arg(
            long = "vertex",
            value_name = "LNG,LAT",
            allow_hyphen_values = true,
            required = true
        )]
        vertices: Vec<String>,
    },
    /// Look up the parcel at a point
    Lookup {
        /// Latitude of the click
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        /// Longitude of the click
        #[arg(long, allow_negative_numbers = true)]
        lng: f64,
    },
    /// Geocode an address and look up the parcel there
    Locate {
        /// Single-line address
        address: String,
        /// Geocoder endpoint override
        #[arg(long)]
        geocode_url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let base_url = cli
        .base_url
        .or_else(|| std::env::var("PARCEL_MAP_BASE_URL").ok())
        .unwrap_or_else(|| "http://127.0.0.1:8000".to_string());
    let api = HttpAnalysisClient::new(base_url)?;
    let mut controller = SessionController::new();

    match cli.command {
        Commands::Analyze { vertices } => {
            let points = parse_vertices(&vertices)?;
            let pending = controller.on_polygon_drawn(&points)?;
            complete(&mut controller, &api, pending).await;
        }
        Commands::Lookup { lat, lng } => {
            let pending = controller.on_point_clicked(LngLat::new(lng, lat));
            complete(&mut controller, &api, pending).await;
        }
        Commands::Locate {
            address,
            geocode_url,
        } => {
            let geocode_url = geocode_url
                .unwrap_or_else(|| parcel_map_geocoder::DEFAULT_GEOCODE_URL.to_string());
            let http = reqwest::Client::new();
            let candidate =
                parcel_map_geocoder::find_candidate(&http, &geocode_url, &address).await?;
            let Some(candidate) = candidate else {
                println!("No geocoder match for \"{address}\"");
                return Ok(());
            };
            if let Some(matched) = &candidate.matched_address {
                log::info!("geocoder matched: {matched}");
            }
            let pending = controller.on_point_clicked(candidate.location);
            complete(&mut controller, &api, pending).await;
        }
    }

    render::print_snapshot(&controller.snapshot());
    Ok(())
}

/// Executes a controller command and feeds the completion back under the
/// same selection id.
async fn complete(
    controller: &mut SessionController,
    api: &impl AnalysisApi,
    pending: PendingRequest,
) {
    let id = pending.id;
    match parcel_map_client::dispatch(api, &pending).await {
        Ok(outcome) => controller.on_resolved(id, outcome),
        Err(error) => controller.on_rejected(id, error),
    }
}

/// Parses repeated `lng,lat` arguments into ring vertices.
fn parse_vertices(raw: &[String]) -> Result<Vec<LngLat>, String> {
    raw.iter()
        .map(|pair| {
            let mut parts = pair.split(',');
            let (Some(lng), Some(lat), None) = (parts.next(), parts.next(), parts.next()) else {
                return Err(format!("expected `lng,lat`, got `{pair}`"));
            };
            let lng: f64 = lng
                .trim()
                .parse()
                .map_err(|_| format!("bad longitude in `{pair}`"))?;
            let lat: f64 = lat
                .trim()
                .parse()
                .map_err(|_| format!("bad latitude in `{pair}`"))?;
            Ok(LngLat::new(lng, lat))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_lng_lat_pairs() {
        let points = parse_vertices(&[
            "-122.6,45.63".to_string(),
            " -122.59, 45.63".to_string(),
        ])
        .unwrap();
        assert!((points[0].lng - -122.6).abs() < 1e-9);
        assert!((points[1].lat - 45.63).abs() < 1e-9);
    }

    #[test]
    fn rejects_malformed_pairs() {
        assert!(parse_vertices(&["-122.6".to_string()]).is_err());
        assert!(parse_vertices(&["-122.6,45.63,7".to_string()]).is_err());
        assert!(parse_vertices(&["west,north".to_string()]).is_err());
    }
}
