use foundation::math::GeoPoint;
use scene::{Claim, ClaimCategory};
use serde::Deserialize;

use crate::records::{RecordError, Scalar, decode_record, parse_array};

/// One claim attributed to a country at a coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct ClaimRecord {
    pub country: String,
    pub point: GeoPoint,
    pub claim: Claim,
}

#[derive(Debug, Deserialize)]
struct ClaimRecordRaw {
    #[serde(alias = "Country")]
    country: String,
    #[serde(alias = "latitude", alias = "Latitude")]
    lat: Scalar,
    #[serde(alias = "longitude", alias = "Longitude")]
    lon: Scalar,
    #[serde(default)]
    text: String,
    #[serde(default, alias = "claim")]
    category: Option<Scalar>,
}

fn category_of(scalar: Option<&Scalar>) -> ClaimCategory {
    match scalar {
        None => ClaimCategory::NoClaim,
        Some(Scalar::Number(n)) => ClaimCategory::from_index(n.trunc() as i64),
        Some(Scalar::Text(code)) => ClaimCategory::from_code(code),
    }
}

/// Parses a JSON array of claim records. Unknown category codes map to
/// [`ClaimCategory::NoClaim`]; a blank country name is an error.
pub fn parse_claims_json(payload: &str) -> Result<Vec<ClaimRecord>, RecordError> {
    let items = parse_array(payload)?;
    let mut out = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let raw: ClaimRecordRaw = decode_record(index, item)?;
        let invalid = |reason: String| RecordError::InvalidRecord { index, reason };

        let country = raw.country.trim();
        if country.is_empty() {
            return Err(invalid("country name is empty".to_string()));
        }
        let point = GeoPoint::new(
            raw.lat.to_degrees().map_err(invalid)?,
            raw.lon.to_degrees().map_err(invalid)?,
        );
        out.push(ClaimRecord {
            country: country.to_string(),
            point,
            claim: Claim::new(raw.text, category_of(raw.category.as_ref())),
        });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_codes_and_numbers() {
        let payload = r#"[
            {"country": "Foo", "lat": 10, "lon": "20E", "text": "It is cold today", "claim": "1_1"},
            {"country": "Bar", "latitude": -5, "longitude": -30, "text": "Plants love CO2", "category": 3},
            {"country": "Baz", "lat": 0, "lon": 0}
        ]"#;
        let records = parse_claims_json(payload).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].point, GeoPoint::new(10.0, 20.0));
        assert_eq!(records[0].claim.category, ClaimCategory::DenialOfWarming);
        assert_eq!(records[1].claim.category, ClaimCategory::DenialOfImpact);
        assert_eq!(records[2].claim, Claim::new("", ClaimCategory::NoClaim));
    }

    #[test]
    fn blank_country_is_rejected() {
        let err = parse_claims_json(r#"[{"country": " ", "lat": 0, "lon": 0}]"#).unwrap_err();
        assert_eq!(
            err,
            RecordError::InvalidRecord {
                index: 0,
                reason: "country name is empty".to_string()
            }
        );
    }

    #[test]
    fn bad_coordinate_reports_index() {
        let payload = r#"[
            {"country": "Foo", "lat": 1, "lon": 1},
            {"country": "Bar", "lat": "high", "lon": 1}
        ]"#;
        assert!(matches!(
            parse_claims_json(payload),
            Err(RecordError::InvalidRecord { index: 1, .. })
        ));
    }
}
