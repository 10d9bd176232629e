use std::collections::BTreeMap;

use foundation::color::Rgb;
use foundation::math::GeoPoint;
use scene::{Claim, DataSeries};

use crate::symbology::ColorFn;

/// Highlightable temperature point derived from one ingested sample.
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureSample {
    pub point: GeoPoint,
    pub color: Rgb,
    pub value: f64,
    /// Scalar the color was computed from; differs from `value` only for
    /// legend series.
    pub color_value: f64,
    /// Value rounded to one decimal for display.
    pub text: String,
}

/// Country, claim and temperature tables queried by the tick loop.
///
/// Countries are kept in name order so per-tick scans are deterministic.
#[derive(Debug, Clone, Default)]
pub struct GlobeData {
    countries: BTreeMap<String, GeoPoint>,
    claims: BTreeMap<String, Vec<Claim>>,
    temperatures: Vec<TemperatureSample>,
}

impl GlobeData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares `country` at `point` (last declaration wins) and appends
    /// `claim` to its list.
    pub fn add_claim(&mut self, country: &str, point: GeoPoint, claim: Claim) {
        self.countries.insert(country.to_string(), point);
        self.claims
            .entry(country.to_string())
            .or_default()
            .push(claim);
    }

    /// Drops every country and claim; temperatures are kept.
    pub fn clear_claims(&mut self) {
        self.countries.clear();
        self.claims.clear();
    }

    pub fn countries(&self) -> impl Iterator<Item = (&str, GeoPoint)> {
        self.countries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn country(&self, name: &str) -> Option<GeoPoint> {
        self.countries.get(name).copied()
    }

    pub fn country_count(&self) -> usize {
        self.countries.len()
    }

    pub fn claims(&self, country: &str) -> &[Claim] {
        self.claims.get(country).map_or(&[], Vec::as_slice)
    }

    /// Rebuilds the temperature table from `series`, dropping every previous
    /// entry.
    pub fn replace_temperatures(&mut self, series: &DataSeries, colors: &dyn ColorFn) {
        self.temperatures.clear();
        self.temperatures.reserve(series.len());
        for sample in &series.samples {
            let value = sample.color_value(series.format);
            self.temperatures.push(TemperatureSample {
                point: sample.point,
                color: colors.color_for(value, series.format),
                value: sample.value,
                color_value: value,
                text: format!("{:.1}", sample.value),
            });
        }
    }

    pub fn temperatures(&self) -> &[TemperatureSample] {
        &self.temperatures
    }

    /// Closest sample to `focus` by summed angular deltas, if any is strictly
    /// closer than `threshold_deg`. Ties keep the earliest sample.
    pub fn nearest_temperature(
        &self,
        focus: GeoPoint,
        threshold_deg: f64,
    ) -> Option<&TemperatureSample> {
        let mut best: Option<&TemperatureSample> = None;
        let mut best_distance = threshold_deg;
        for sample in &self.temperatures {
            let d = focus.manhattan_deg(sample.point);
            if d < best_distance {
                best_distance = d;
                best = Some(sample);
            }
        }
        best
    }
}
