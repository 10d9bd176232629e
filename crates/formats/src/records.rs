use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum RecordError {
    Json(String),
    NotAnArray,
    InvalidRecord { index: usize, reason: String },
}

impl std::fmt::Display for RecordError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordError::Json(e) => write!(f, "JSON parse error: {e}"),
            RecordError::NotAnArray => write!(f, "expected a JSON array of records"),
            RecordError::InvalidRecord { index, reason } => {
                write!(f, "invalid record at index {index}: {reason}")
            }
        }
    }
}

impl std::error::Error for RecordError {}

/// Number or numeric string, as found in exported CSV-turned-JSON data.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(f64),
    Text(String),
}

impl Scalar {
    pub fn to_f64(&self) -> Result<f64, String> {
        match self {
            Scalar::Number(n) => Ok(*n),
            Scalar::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| format!("not a number: {s:?}")),
        }
    }

    /// Degrees, optionally suffixed with a hemisphere letter (`57.05N`,
    /// `10.33W`). `S` and `W` negate the value.
    pub fn to_degrees(&self) -> Result<f64, String> {
        let Scalar::Text(s) = self else {
            return self.to_f64();
        };
        let trimmed = s.trim();
        let (digits, sign) = match trimmed.chars().last() {
            Some('N' | 'n' | 'E' | 'e') => (&trimmed[..trimmed.len() - 1], 1.0),
            Some('S' | 's' | 'W' | 'w') => (&trimmed[..trimmed.len() - 1], -1.0),
            _ => (trimmed, 1.0),
        };
        digits
            .trim()
            .parse::<f64>()
            .map(|v| v * sign)
            .map_err(|_| format!("not a coordinate: {s:?}"))
    }

    pub fn to_key(&self) -> String {
        match self {
            Scalar::Number(n) => format!("{n}"),
            Scalar::Text(s) => s.trim().to_string(),
        }
    }
}

/// Parses `payload` as a JSON array and hands back its elements.
pub(crate) fn parse_array(payload: &str) -> Result<Vec<Value>, RecordError> {
    let value: Value = serde_json::from_str(payload).map_err(|e| RecordError::Json(e.to_string()))?;
    match value {
        Value::Array(items) => Ok(items),
        _ => Err(RecordError::NotAnArray),
    }
}

pub(crate) fn decode_record<T: for<'de> Deserialize<'de>>(
    index: usize,
    value: Value,
) -> Result<T, RecordError> {
    serde_json::from_value(value).map_err(|e| RecordError::InvalidRecord {
        index,
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hemisphere_suffixes_set_the_sign() {
        assert_eq!(Scalar::Text("57.05N".into()).to_degrees(), Ok(57.05));
        assert_eq!(Scalar::Text("57.05S".into()).to_degrees(), Ok(-57.05));
        assert_eq!(Scalar::Text("10.33W".into()).to_degrees(), Ok(-10.33));
        assert_eq!(Scalar::Text(" 10.33 E ".into()).to_degrees(), Ok(10.33));
        assert_eq!(Scalar::Text("-4.5".into()).to_degrees(), Ok(-4.5));
        assert_eq!(Scalar::Number(12.0).to_degrees(), Ok(12.0));
        assert!(Scalar::Text("north".into()).to_degrees().is_err());
    }

    #[test]
    fn numeric_strings_parse() {
        assert_eq!(Scalar::Text(" 1.25".into()).to_f64(), Ok(1.25));
        assert!(Scalar::Text("".into()).to_f64().is_err());
        assert_eq!(Scalar::Number(2011.0).to_key(), "2011");
        assert_eq!(Scalar::Text("1900-01-01".into()).to_key(), "1900-01-01");
    }

    #[test]
    fn non_array_payload_is_rejected() {
        assert_eq!(parse_array("{}"), Err(RecordError::NotAnArray));
        assert!(matches!(parse_array("[1,"), Err(RecordError::Json(_))));
    }
}
