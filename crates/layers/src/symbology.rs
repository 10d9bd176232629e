use foundation::color::{Rgb, hsv_to_rgb};
use scene::{ClaimCategory, SeriesFormat};
use serde::{Deserialize, Serialize};

/// Linear value-to-hue mapping used for plotted samples and the legend.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorScaleConfig {
    /// Hue in degrees at `domain_min`.
    pub cold_hue_deg: f64,
    /// Hue in degrees at `domain_max`.
    pub warm_hue_deg: f64,
    pub domain_min: f64,
    pub domain_max: f64,
}

impl Default for ColorScaleConfig {
    fn default() -> Self {
        Self {
            cold_hue_deg: 50.0,
            warm_hue_deg: 0.0,
            domain_min: -0.3,
            domain_max: 3.0,
        }
    }
}

impl ColorScaleConfig {
    /// Position of `value` in the domain; 0 at the cold end, 1 at the warm end.
    pub fn rate(&self, value: f64) -> f64 {
        (value - self.domain_min) / (self.domain_max - self.domain_min)
    }

    /// Not clamped: out-of-domain values rotate past the configured hues.
    pub fn hue_deg(&self, value: f64) -> f64 {
        self.cold_hue_deg - self.rate(value) * (self.cold_hue_deg - self.warm_hue_deg)
    }

    /// Index of the legend bucket containing `value` (may fall outside
    /// `0..buckets` for out-of-domain values).
    pub fn bucket(&self, value: f64, buckets: usize) -> i64 {
        (self.rate(value) * buckets as f64).floor() as i64
    }
}

/// Capability to turn a sample scalar into a display color.
pub trait ColorFn {
    fn color_for(&self, value: f64, format: SeriesFormat) -> Rgb;
}

impl<F> ColorFn for F
where
    F: Fn(f64, SeriesFormat) -> Rgb,
{
    fn color_for(&self, value: f64, format: SeriesFormat) -> Rgb {
        self(value, format)
    }
}

/// Default [`ColorFn`]: hue interpolation at full saturation and brightness.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct ColorScale {
    pub config: ColorScaleConfig,
}

impl ColorScale {
    pub fn new(config: ColorScaleConfig) -> Self {
        Self { config }
    }

    pub fn hue_color(hue_deg: f64) -> Rgb {
        hsv_to_rgb(hue_deg / 360.0, 1.0, 1.0)
    }
}

impl ColorFn for ColorScale {
    fn color_for(&self, value: f64, _format: SeriesFormat) -> Rgb {
        Self::hue_color(self.config.hue_deg(value))
    }
}

pub const SCALE_BUCKETS: usize = 10;

/// Static content of the temperature and category legends.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleLegend {
    pub buckets: [Rgb; SCALE_BUCKETS],
    pub min_label: String,
    pub max_label: String,
    pub min_color: Rgb,
    pub max_color: Rgb,
    pub categories: Vec<(ClaimCategory, Rgb)>,
}

impl ScaleLegend {
    pub fn new(config: &ColorScaleConfig) -> Self {
        let step = (config.cold_hue_deg - config.warm_hue_deg) / SCALE_BUCKETS as f64;
        let buckets: [Rgb; SCALE_BUCKETS] = std::array::from_fn(|i| {
            ColorScale::hue_color(config.cold_hue_deg - i as f64 * step)
        });
        Self {
            min_label: format!("{}°C", signed(config.domain_min)),
            max_label: format!("{}°C", signed(config.domain_max)),
            min_color: buckets[0],
            max_color: buckets[SCALE_BUCKETS - 1],
            buckets,
            categories: ClaimCategory::ALL.iter().map(|c| (*c, c.color())).collect(),
        }
    }
}

fn signed(v: f64) -> String {
    if v < 0.0 { format!("{v}") } else { format!("+{v}") }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn domain_ends_map_to_configured_hues() {
        let cfg = ColorScaleConfig::default();
        assert_close(cfg.hue_deg(cfg.domain_min), 50.0, 1e-12);
        assert_close(cfg.hue_deg(cfg.domain_max), 0.0, 1e-12);

        let scale = ColorScale::new(cfg);
        let cold = scale.color_for(cfg.domain_min, SeriesFormat::Magnitude);
        let warm = scale.color_for(cfg.domain_max, SeriesFormat::Magnitude);
        assert_close(cold.hue_deg(), 50.0, 0.5);
        assert_eq!(warm, Rgb::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn hue_decreases_monotonically_across_domain() {
        let cfg = ColorScaleConfig::default();
        let mut previous = f64::INFINITY;
        for i in 0..=33 {
            let value = cfg.domain_min + i as f64 * 0.1;
            let hue = cfg.hue_deg(value);
            assert!(hue < previous, "hue must fall as value rises");
            previous = hue;
        }
    }

    #[test]
    fn out_of_domain_values_wrap_the_hue() {
        let scale = ColorScale::default();
        // Far above the warm end: hue goes negative and wraps into magenta.
        let c = scale.color_for(4.0, SeriesFormat::Magnitude);
        assert!(c.hue_deg() > 300.0);
    }

    #[test]
    fn closures_are_color_functions() {
        let fixed = |_v: f64, _f: SeriesFormat| Rgb::new(0.0, 0.0, 1.0);
        assert_eq!(fixed.color_for(1.0, SeriesFormat::Legend), Rgb::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn legend_spans_cold_to_warm() {
        let legend = ScaleLegend::new(&ColorScaleConfig::default());
        assert_eq!(legend.min_label, "-0.3°C");
        assert_eq!(legend.max_label, "+3°C");
        assert_close(legend.buckets[0].hue_deg(), 50.0, 0.5);
        assert_close(legend.buckets[9].hue_deg(), 5.0, 0.5);
        assert_eq!(legend.categories.len(), 6);
        assert_eq!(legend.categories[1].1.to_css(), "rgb(255,89,100)");
    }
}
