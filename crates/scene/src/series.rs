use std::fmt;
use std::str::FromStr;

use foundation::math::GeoPoint;

/// How a series carries the scalar used for coloring.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum SeriesFormat {
    /// Color follows the sample value.
    #[default]
    Magnitude,
    /// Color follows a secondary discriminant carried next to the value.
    Legend,
}

impl SeriesFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            SeriesFormat::Magnitude => "magnitude",
            SeriesFormat::Legend => "legend",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedFormat(pub String);

impl fmt::Display for UnsupportedFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "format not supported: {}", self.0)
    }
}

impl std::error::Error for UnsupportedFormat {}

impl FromStr for SeriesFormat {
    type Err = UnsupportedFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "magnitude" => Ok(SeriesFormat::Magnitude),
            "legend" => Ok(SeriesFormat::Legend),
            other => Err(UnsupportedFormat(other.to_string())),
        }
    }
}

/// Per-ingest switches.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IngestOptions {
    pub format: SeriesFormat,
    /// Append the series as a morph frame instead of replacing the cloud.
    pub animated: bool,
    pub frame_name: Option<String>,
}

/// One plotted point at one point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarSample {
    pub point: GeoPoint,
    pub value: f64,
    pub legend: Option<f64>,
    pub frame_key: Option<String>,
}

impl ScalarSample {
    pub fn new(latitude: f64, longitude: f64, value: f64) -> Self {
        Self {
            point: GeoPoint::new(latitude, longitude),
            value,
            legend: None,
            frame_key: None,
        }
    }

    pub fn with_legend(mut self, legend: f64) -> Self {
        self.legend = Some(legend);
        self
    }

    pub fn with_frame_key(mut self, key: impl Into<String>) -> Self {
        self.frame_key = Some(key.into());
        self
    }

    /// Scalar that drives the color under `format`.
    pub fn color_value(&self, format: SeriesFormat) -> f64 {
        match format {
            SeriesFormat::Magnitude => self.value,
            SeriesFormat::Legend => self.legend.unwrap_or(self.value),
        }
    }
}

/// Samples ingested together; replaced wholesale on every ingest.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataSeries {
    pub format: SeriesFormat,
    pub samples: Vec<ScalarSample>,
}

impl DataSeries {
    pub fn new(format: SeriesFormat, samples: Vec<ScalarSample>) -> Self {
        Self { format, samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{ScalarSample, SeriesFormat, UnsupportedFormat};

    #[test]
    fn parses_known_formats() {
        assert_eq!("magnitude".parse::<SeriesFormat>(), Ok(SeriesFormat::Magnitude));
        assert_eq!("legend".parse::<SeriesFormat>(), Ok(SeriesFormat::Legend));
    }

    #[test]
    fn rejects_unknown_format() {
        let err = "heatmap".parse::<SeriesFormat>().unwrap_err();
        assert_eq!(err, UnsupportedFormat("heatmap".to_string()));
        assert_eq!(err.to_string(), "format not supported: heatmap");
    }

    #[test]
    fn legend_format_colors_by_discriminant() {
        let s = ScalarSample::new(1.0, 2.0, 0.5).with_legend(2.0);
        assert_eq!(s.color_value(SeriesFormat::Magnitude), 0.5);
        assert_eq!(s.color_value(SeriesFormat::Legend), 2.0);

        let bare = ScalarSample::new(1.0, 2.0, 0.5);
        assert_eq!(bare.color_value(SeriesFormat::Legend), 0.5);
    }
}
