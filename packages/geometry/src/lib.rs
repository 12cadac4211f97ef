#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Geographic ring types and normalization for lasso selections.
//!
//! A drawing tool hands back a raw vertex list that may or may not repeat
//! the first vertex at the end. [`normalize`] turns that raw list into a
//! [`Ring`] that is guaranteed closed, rejecting degenerate input. The
//! backend speaks `GeoJSON` polygons in longitude-then-latitude order, so
//! conversions to and from [`geojson::Geometry`] live here too — axis order
//! is made explicit at every boundary crossing.
//!
//! No reprojection, simplification, or self-intersection repair happens
//! here; the backend owns those concerns.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Coordinate comparison tolerance in degrees.
///
/// Two vertices closer than this on both axes are the same point. At
/// mid-latitudes 1e-9 degrees is well under a millimeter.
pub const EPSILON: f64 = 1e-9;

/// Errors raised while validating drawn geometry.
///
/// Raised locally, before anything is sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// The drawn shape cannot form a simple polygon boundary.
    #[error("invalid geometry: {message}")]
    InvalidGeometry {
        /// Description of what made the geometry unusable.
        message: String,
    },
}

/// A geographic coordinate pair, longitude first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LngLat {
    /// Longitude in degrees.
    pub lng: f64,
    /// Latitude in degrees.
    pub lat: f64,
}

impl LngLat {
    #[must_use]
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    /// Returns `true` if both axes are within [`EPSILON`] of `other`.
    #[must_use]
    pub fn approx_eq(self, other: Self) -> bool {
        (self.lng - other.lng).abs() < EPSILON && (self.lat - other.lat).abs() < EPSILON
    }
}

/// A closed polygon boundary: an ordered vertex sequence whose last vertex
/// repeats the first.
///
/// Construction goes through [`normalize`] (or [`ring_from_geojson`]), so a
/// `Ring` value always holds the closure invariant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ring(Vec<LngLat>);

impl Ring {
    /// The vertices of the ring, closing vertex included.
    #[must_use]
    pub fn points(&self) -> &[LngLat] {
        &self.0
    }

    /// Vertex count excluding the closing vertex.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.0.len() - 1
    }

    /// The ring as `[lng, lat]` positions, the shape the backend expects
    /// inside a `GeoJSON` polygon's coordinate array.
    #[must_use]
    pub fn positions(&self) -> Vec<[f64; 2]> {
        self.0.iter().map(|p| [p.lng, p.lat]).collect()
    }

    /// Converts the ring into a `GeoJSON` polygon geometry with this ring
    /// as the single exterior ring.
    #[must_use]
    pub fn to_geojson(&self) -> geojson::Geometry {
        let positions = self
            .0
            .iter()
            .map(|p| vec![p.lng, p.lat])
            .collect::<Vec<_>>();
        geojson::Geometry::new(geojson::Value::Polygon(vec![positions]))
    }
}

/// Normalizes a raw drawn vertex list into a closed [`Ring`].
///
/// Guarantees closure (appending a copy of the first vertex when the last
/// does not already repeat it within [`EPSILON`]) and preserves vertex
/// order and values otherwise. Normalizing an already-closed ring is a
/// no-op, so the operation is idempotent.
///
/// # Errors
///
/// Returns [`GeometryError::InvalidGeometry`] if the input contains fewer
/// than 3 distinct vertices.
pub fn normalize(raw: &[LngLat]) -> Result<Ring, GeometryError> {
    let mut distinct: Vec<LngLat> = Vec::with_capacity(raw.len());
    for point in raw {
        if !distinct.iter().any(|seen| seen.approx_eq(*point)) {
            distinct.push(*point);
        }
    }

    if distinct.len() < 3 {
        return Err(GeometryError::InvalidGeometry {
            message: format!(
                "a polygon needs at least 3 distinct vertices, got {}",
                distinct.len()
            ),
        });
    }

    let mut points = raw.to_vec();
    let first = points[0];
    let last = points[points.len() - 1];
    if !last.approx_eq(first) {
        points.push(first);
    }

    Ok(Ring(points))
}

/// Extracts the exterior ring of a `GeoJSON` polygon geometry.
///
/// Accepts only `Polygon` geometries and reads `coordinates[0]`, the
/// exterior ring, in longitude-then-latitude order. Interior rings
/// (holes) are ignored. The extracted ring goes through [`normalize`], so
/// an open exterior ring from a sloppy producer still comes back closed.
///
/// # Errors
///
/// Returns [`GeometryError::InvalidGeometry`] if the geometry is not a
/// polygon, has no exterior ring, contains malformed positions, or fails
/// normalization.
pub fn ring_from_geojson(geometry: &geojson::Geometry) -> Result<Ring, GeometryError> {
    let geojson::Value::Polygon(rings) = &geometry.value else {
        return Err(GeometryError::InvalidGeometry {
            message: "expected a Polygon geometry".to_string(),
        });
    };

    let exterior = rings.first().ok_or_else(|| GeometryError::InvalidGeometry {
        message: "polygon has no exterior ring".to_string(),
    })?;

    let mut points = Vec::with_capacity(exterior.len());
    for position in exterior {
        let (Some(&lng), Some(&lat)) = (position.first(), position.get(1)) else {
            return Err(GeometryError::InvalidGeometry {
                message: "position with fewer than 2 coordinates".to_string(),
            });
        };
        points.push(LngLat::new(lng, lat));
    }

    normalize(&points)
}
