use scene::{DataSeries, IngestOptions, ScalarSample, SeriesFormat, UnsupportedFormat};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::records::{RecordError, Scalar, decode_record, parse_array};

/// Caller-facing ingest options; `format` is validated by [`SeriesOptions::resolve`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesOptions {
    pub format: Option<String>,
    pub animated: bool,
    pub name: Option<String>,
}

impl SeriesOptions {
    pub fn resolve(&self) -> Result<IngestOptions, UnsupportedFormat> {
        let format = match &self.format {
            Some(f) => f.parse::<SeriesFormat>()?,
            None => SeriesFormat::default(),
        };
        Ok(IngestOptions {
            format,
            animated: self.animated,
            frame_name: self.name.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct SeriesRecordRaw {
    #[serde(alias = "Latitude", alias = "latitude")]
    lat: Scalar,
    #[serde(alias = "Longitude", alias = "longitude")]
    lon: Scalar,
    #[serde(alias = "AverageTemperature")]
    value: Scalar,
    #[serde(default)]
    legend: Option<Scalar>,
    #[serde(default, alias = "dt")]
    time: Option<Scalar>,
}

impl SeriesRecordRaw {
    fn into_sample(self) -> Result<ScalarSample, String> {
        let mut sample = ScalarSample::new(
            self.lat.to_degrees()?,
            self.lon.to_degrees()?,
            self.value.to_f64()?,
        );
        if let Some(legend) = self.legend {
            sample = sample.with_legend(legend.to_f64()?);
        }
        if let Some(time) = self.time {
            sample = sample.with_frame_key(time.to_key());
        }
        Ok(sample)
    }
}

/// Parses a JSON array of series records into a [`DataSeries`].
///
/// Two layouts are accepted: an array of objects (`lat`/`Latitude`,
/// `lon`/`Longitude`, `value`/`AverageTemperature`, optional `legend` and
/// `time`/`dt`), or a flat array of numbers laid out as
/// `lat, lon, value` (`magnitude`) or `lat, lon, value, legend` (`legend`).
pub fn parse_series_json(payload: &str, format: SeriesFormat) -> Result<DataSeries, RecordError> {
    let items = parse_array(payload)?;
    if !items.is_empty() && items.iter().all(Value::is_number) {
        let flat: Vec<f64> = items.iter().filter_map(Value::as_f64).collect();
        return series_from_flat(&flat, format);
    }

    let mut samples = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let raw: SeriesRecordRaw = decode_record(index, item)?;
        let sample = raw
            .into_sample()
            .map_err(|reason| RecordError::InvalidRecord { index, reason })?;
        samples.push(sample);
    }
    Ok(DataSeries::new(format, samples))
}

/// Splits a flat number array into samples, three or four values each.
pub fn series_from_flat(values: &[f64], format: SeriesFormat) -> Result<DataSeries, RecordError> {
    let step = match format {
        SeriesFormat::Magnitude => 3,
        SeriesFormat::Legend => 4,
    };
    if values.len() % step != 0 {
        return Err(RecordError::InvalidRecord {
            index: values.len() / step,
            reason: format!(
                "{} trailing values, {} format expects groups of {step}",
                values.len() % step,
                format.as_str()
            ),
        });
    }
    let samples = values
        .chunks_exact(step)
        .map(|c| {
            let sample = ScalarSample::new(c[0], c[1], c[2]);
            match format {
                SeriesFormat::Magnitude => sample,
                SeriesFormat::Legend => sample.with_legend(c[3]),
            }
        })
        .collect();
    Ok(DataSeries::new(format, samples))
}

/// One animation frame cut out of a keyed series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesFrame {
    pub key: Option<String>,
    pub series: DataSeries,
}

/// Groups samples by frame key, frames ordered by first appearance and
/// samples kept in input order. Unkeyed samples form their own frame.
pub fn split_frames(series: &DataSeries) -> Vec<SeriesFrame> {
    let mut frames: Vec<SeriesFrame> = Vec::new();
    for sample in &series.samples {
        let key = sample.frame_key.clone();
        match frames.iter_mut().find(|f| f.key == key) {
            Some(frame) => frame.series.samples.push(sample.clone()),
            None => frames.push(SeriesFrame {
                key,
                series: DataSeries::new(series.format, vec![sample.clone()]),
            }),
        }
    }
    frames
}
