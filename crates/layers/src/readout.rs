use foundation::color::Rgb;

use crate::dataset::TemperatureSample;
use crate::symbology::{ColorScaleConfig, SCALE_BUCKETS, ScaleLegend};

/// Emphasis applied to every legend bucket when nothing is highlighted.
pub const IDLE_EMPHASIS: f64 = 0.25;

/// Sink for the temperature label and the 10-bucket legend.
pub trait ReadoutSurface {
    fn init_scale(&mut self, legend: &ScaleLegend);
    /// `color` is `None` when the label is cleared.
    fn set_delta_label(&mut self, text: &str, color: Option<Rgb>);
    fn set_scale_emphasis(&mut self, emphasis: &[f64; SCALE_BUCKETS]);
}

/// Everything the focus point implies for the readout and the atmosphere.
#[derive(Debug, Clone, PartialEq)]
pub struct Readout {
    pub atmosphere: Rgb,
    pub label: String,
    pub label_color: Option<Rgb>,
    pub emphasis: [f64; SCALE_BUCKETS],
}

impl Readout {
    pub fn idle() -> Self {
        Self {
            atmosphere: Rgb::WHITE,
            label: String::new(),
            label_color: None,
            emphasis: [IDLE_EMPHASIS; SCALE_BUCKETS],
        }
    }

    pub fn apply(&self, surface: &mut dyn ReadoutSurface) {
        surface.set_delta_label(&self.label, self.label_color);
        surface.set_scale_emphasis(&self.emphasis);
    }
}

/// Readout for the highlighted sample, or [`Readout::idle`].
///
/// The label shows the sample's rounded text. The emphasized bucket follows
/// the scalar the sample was colored by, so under a legend series the
/// legend, atmosphere and label color all agree.
pub fn compute_readout(highlight: Option<&TemperatureSample>, scale: &ColorScaleConfig) -> Readout {
    let Some(sample) = highlight else {
        return Readout::idle();
    };
    Readout {
        atmosphere: sample.color,
        label: delta_label(&sample.text),
        label_color: Some(sample.color),
        emphasis: bucket_emphasis(scale.bucket(sample.color_value, SCALE_BUCKETS)),
    }
}

fn delta_label(text: &str) -> String {
    if text.starts_with('-') {
        format!("{text}°C")
    } else {
        format!("+{text}°C")
    }
}

/// `1 / (1 + distance)` from the highlighted bucket, which may lie outside
/// the legend for out-of-domain values.
pub fn bucket_emphasis(index: i64) -> [f64; SCALE_BUCKETS] {
    std::array::from_fn(|i| 1.0 / (1.0 + (index - i as i64).abs() as f64))
}

/// In-memory [`ReadoutSurface`] keeping the last value of every call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingReadout {
    pub legend: Option<ScaleLegend>,
    pub label: String,
    pub label_color: Option<Rgb>,
    pub emphasis: Option<[f64; SCALE_BUCKETS]>,
    pub updates: usize,
}

impl ReadoutSurface for RecordingReadout {
    fn init_scale(&mut self, legend: &ScaleLegend) {
        self.legend = Some(legend.clone());
    }

    fn set_delta_label(&mut self, text: &str, color: Option<Rgb>) {
        self.label = text.to_string();
        self.label_color = color;
        self.updates += 1;
    }

    fn set_scale_emphasis(&mut self, emphasis: &[f64; SCALE_BUCKETS]) {
        self.emphasis = Some(*emphasis);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbology::{ColorFn, ColorScale};
    use foundation::math::GeoPoint;
    use scene::SeriesFormat;

    fn sample(value: f64) -> TemperatureSample {
        let color = ColorScale::default().color_for(value, SeriesFormat::Magnitude);
        TemperatureSample {
            point: GeoPoint::new(0.0, 0.0),
            color,
            value,
            color_value: value,
            text: format!("{value:.1}"),
        }
    }

    #[test]
    fn no_highlight_is_white_and_flat() {
        let r = compute_readout(None, &ColorScaleConfig::default());
        assert_eq!(r, Readout::idle());
        assert_eq!(r.atmosphere, Rgb::WHITE);
        assert!(r.emphasis.iter().all(|e| *e == 0.25));
    }

    #[test]
    fn highlight_tints_atmosphere_and_label() {
        let s = sample(1.35);
        let r = compute_readout(Some(&s), &ColorScaleConfig::default());
        assert_eq!(r.atmosphere, s.color);
        assert_eq!(r.label_color, Some(s.color));
        assert_eq!(r.label, "+1.4°C");

        let cold = compute_readout(Some(&sample(-0.2)), &ColorScaleConfig::default());
        assert_eq!(cold.label, "-0.2°C");
    }

    #[test]
    fn emphasis_peaks_at_sample_bucket() {
        // (1.35 + 0.3) * 10 / 3.3 = 5.0 -> bucket 5.
        let r = compute_readout(Some(&sample(1.35)), &ColorScaleConfig::default());
        assert_eq!(r.emphasis[5], 1.0);
        assert_eq!(r.emphasis[4], 0.5);
        assert_eq!(r.emphasis[7], 1.0 / 3.0);
        assert_eq!(r.emphasis[0], 1.0 / 6.0);
    }

    #[test]
    fn label_uses_the_rounded_text() {
        let mut s = sample(1.35);
        s.text = "1.3".to_string();
        let r = compute_readout(Some(&s), &ColorScaleConfig::default());
        assert_eq!(r.label, "+1.3°C");
    }

    #[test]
    fn legend_sample_emphasis_follows_its_color_value() {
        // Plotted value sits in bucket 0, the legend scalar in bucket 5.
        let mut s = sample(-0.3);
        s.color_value = 1.35;
        s.color = ColorScale::default().color_for(s.color_value, SeriesFormat::Legend);
        let r = compute_readout(Some(&s), &ColorScaleConfig::default());
        assert_eq!(r.emphasis[5], 1.0);
        assert_eq!(r.emphasis[0], 1.0 / 6.0);
        assert_eq!(r.atmosphere, s.color);
        assert_eq!(r.label, "-0.3°C");
    }

    #[test]
    fn out_of_domain_bucket_still_decays() {
        let e = bucket_emphasis(12);
        assert_eq!(e[9], 1.0 / 4.0);
        assert!(e.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn apply_writes_label_and_emphasis() {
        let mut surface = RecordingReadout::default();
        surface.init_scale(&ScaleLegend::new(&ColorScaleConfig::default()));
        compute_readout(Some(&sample(0.0)), &ColorScaleConfig::default()).apply(&mut surface);

        assert!(surface.legend.is_some());
        assert_eq!(surface.label, "+0.0°C");
        assert_eq!(surface.updates, 1);
        assert_eq!(surface.emphasis.map(|e| e[0]), Some(1.0));
    }
}
