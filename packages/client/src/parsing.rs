//! Shape validation for backend responses.
//!
//! The backend speaks snake_case JSON; each field is checked explicitly
//! so a contract break surfaces as [`ClientError::Malformed`] naming the
//! offending field, never as a panic. Parcel geometry arrives as a
//! GeoJSON polygon whose exterior ring is longitude-then-latitude.

use parcel_map_geometry::ring_from_geojson;
use parcel_map_parcel_models::{AnalysisResult, Parcel};

use crate::ClientError;

/// Parses a polygon analysis response body.
///
/// # Errors
///
/// Returns [`ClientError::Malformed`] if a required field is missing or
/// has the wrong type, or if any parcel fails to parse.
pub fn parse_analysis_response(body: &serde_json::Value) -> Result<AnalysisResult, ClientError> {
    let total_parcels = body["total_parcels"]
        .as_u64()
        .ok_or_else(|| malformed("missing total_parcels"))?;
    let total_acreage = body["total_acreage"]
        .as_f64()
        .ok_or_else(|| malformed("missing total_acreage"))?;
    let parcels_value = body["parcels"]
        .as_array()
        .ok_or_else(|| malformed("missing parcels array"))?;

    let mut parcels = Vec::with_capacity(parcels_value.len());
    for parcel in parcels_value {
        parcels.push(parse_parcel(parcel)?);
    }

    Ok(AnalysisResult {
        total_parcels,
        total_acreage,
        total_value: body["total_value"].as_f64(),
        average_score: body["average_score"].as_f64(),
        ai_summary: body["ai_summary"].as_str().map(String::from),
        parcels,
    })
}

/// Parses a point lookup response body.
///
/// `{"found": false}` is a valid "no parcel here" response and parses to
/// `Ok(None)`.
///
/// # Errors
///
/// Returns [`ClientError::Malformed`] if `found` is missing, or if
/// `found` is `true` but `data` is absent or fails to parse.
pub fn parse_lookup_response(body: &serde_json::Value) -> Result<Option<Parcel>, ClientError> {
    let found = body["found"]
        .as_bool()
        .ok_or_else(|| malformed("missing found"))?;

    if !found {
        return Ok(None);
    }

    let data = body
        .get("data")
        .filter(|v| !v.is_null())
        .ok_or_else(|| malformed("found response without data"))?;
    parse_parcel(data).map(Some)
}

/// Parses one parcel object out of a response.
///
/// The parcel id field has shipped as both a string and a bare number,
/// so both are accepted.
fn parse_parcel(value: &serde_json::Value) -> Result<Parcel, ClientError> {
    let id = match &value["parcel_id"] {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        _ => return Err(malformed("missing parcel_id")),
    };

    let geometry: geojson::Geometry = serde_json::from_value(value["geometry"].clone())
        .map_err(|e| malformed(&format!("parcel {id} geometry: {e}")))?;
    let geometry = ring_from_geojson(&geometry)
        .map_err(|e| malformed(&format!("parcel {id} geometry: {e}")))?;

    Ok(Parcel {
        id,
        geometry,
        zoning_code: value["zoning_code"].as_str().map(String::from),
        acres: value["acres"].as_f64(),
        site_address: value["site_address"].as_str().map(String::from),
        owner_name: value["owner_name"].as_str().map(String::from),
        total_value: value["total_value"].as_f64(),
        land_value: value["land_value"].as_f64(),
        building_value: value["building_value"].as_f64(),
        year_built: value["year_built"]
            .as_i64()
            .and_then(|y| i32::try_from(y).ok()),
    })
}

fn malformed(message: &str) -> ClientError {
    ClientError::Malformed {
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parcel_json(id: &str, zoning: &str, acres: f64) -> serde_json::Value {
        serde_json::json!({
            "parcel_id": id,
            "site_address": "123 MAIN ST",
            "owner_name": "DOE JOHN",
            "zoning_code": zoning,
            "acres": acres,
            "land_value": 120_000.0,
            "building_value": 340_000.0,
            "total_value": 460_000.0,
            "year_built": 1987,
            "geometry": {
                "type": "Polygon",
                "coordinates": [[
                    [-122.6, 45.63],
                    [-122.59, 45.63],
                    [-122.595, 45.64],
                    [-122.6, 45.63],
                ]],
            },
        })
    }

    #[test]
    fn parses_an_analysis_response() {
        let body = serde_json::json!({
            "total_parcels": 2,
            "total_acreage": 3.5,
            "total_value": 920_000.0,
            "average_score": 7.5,
            "ai_summary": "Analyzed 2 parcels.",
            "parcels": [
                parcel_json("1", "R1", 2.5),
                parcel_json("2", "C2", 1.0),
            ],
        });

        let result = parse_analysis_response(&body).unwrap();
        assert_eq!(result.total_parcels, 2);
        assert!((result.total_acreage - 3.5).abs() < 1e-9);
        assert_eq!(result.parcels.len(), 2);
        assert_eq!(result.parcels[0].zoning_code.as_deref(), Some("R1"));
        assert_eq!(result.parcels[0].year_built, Some(1987));
        assert_eq!(result.parcels[0].geometry.vertex_count(), 3);
    }

    #[test]
    fn missing_required_field_is_malformed() {
        let body = serde_json::json!({
            "total_acreage": 3.5,
            "parcels": [],
        });
        let error = parse_analysis_response(&body).unwrap_err();
        assert!(matches!(error, ClientError::Malformed { .. }));
        assert!(error.to_string().contains("total_parcels"));
    }

    #[test]
    fn optional_analysis_fields_may_be_absent() {
        let body = serde_json::json!({
            "total_parcels": 0,
            "total_acreage": 0.0,
            "parcels": [],
        });
        let result = parse_analysis_response(&body).unwrap();
        assert_eq!(result.total_value, None);
        assert_eq!(result.average_score, None);
        assert_eq!(result.ai_summary, None);
        assert!(result.parcels.is_empty());
    }

    #[test]
    fn numeric_parcel_ids_are_accepted() {
        let mut parcel = parcel_json("ignored", "R1", 2.5);
        parcel["parcel_id"] = serde_json::json!(986_035_212);
        let parsed = parse_parcel(&parcel).unwrap();
        assert_eq!(parsed.id, "986035212");
    }

    #[test]
    fn parcel_with_bad_geometry_is_malformed() {
        let mut parcel = parcel_json("1", "R1", 2.5);
        parcel["geometry"] = serde_json::json!({"type": "Point", "coordinates": [0.0, 0.0]});
        let body = serde_json::json!({
            "total_parcels": 1,
            "total_acreage": 2.5,
            "parcels": [parcel],
        });
        assert!(parse_analysis_response(&body).is_err());
    }

    #[test]
    fn lookup_hit_parses_the_parcel() {
        let body = serde_json::json!({
            "found": true,
            "data": parcel_json("986035212", "R1-6", 0.23),
        });
        let parcel = parse_lookup_response(&body).unwrap().unwrap();
        assert_eq!(parcel.id, "986035212");
        assert_eq!(parcel.site_address.as_deref(), Some("123 MAIN ST"));
    }

    #[test]
    fn lookup_miss_is_none_not_an_error() {
        let body = serde_json::json!({
            "found": false,
            "message": "No parcel found here",
        });
        assert_eq!(parse_lookup_response(&body).unwrap(), None);
    }

    #[test]
    fn lookup_without_found_flag_is_malformed() {
        let body = serde_json::json!({ "data": {} });
        assert!(parse_lookup_response(&body).is_err());
    }

    #[test]
    fn found_without_data_is_malformed() {
        let body = serde_json::json!({ "found": true });
        assert!(parse_lookup_response(&body).is_err());
    }
}
