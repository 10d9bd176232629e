use std::fs;
use std::path::{Path, PathBuf};

use foundation::math::GLOBE_RADIUS;
use layers::{ColorScaleConfig, SchedulerConfig};
use serde::{Deserialize, Serialize};

use crate::orbit_camera::CameraConfig;

/// Everything tunable about the viewer; every field falls back to its
/// default when missing from the JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobeConfig {
    pub globe_radius: f64,
    pub camera: CameraConfig,
    pub color_scale: ColorScaleConfig,
    pub scheduler: SchedulerConfig,
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            globe_radius: GLOBE_RADIUS,
            camera: CameraConfig::default(),
            color_scale: ColorScaleConfig::default(),
            scheduler: SchedulerConfig::default(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(serde_json::Error),
    /// Parsed, but the values cannot drive the viewer.
    Invalid { reason: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "failed to read config {}: {source}", path.display())
            }
            ConfigError::Parse(e) => write!(f, "invalid config: {e}"),
            ConfigError::Invalid { reason } => write!(f, "invalid config: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl GlobeConfig {
    pub fn from_json_str(payload: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(payload)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values that would panic or poison every frame: an inverted or
    /// non-finite zoom window, an empty color domain, a degenerate globe or
    /// widget.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: String| Err(ConfigError::Invalid { reason });

        let (min, max) = (self.camera.min_distance, self.camera.max_distance);
        if !min.is_finite() || !max.is_finite() {
            return invalid(format!("camera distance bounds must be finite, got [{min}, {max}]"));
        }
        if min > max {
            return invalid(format!("camera min_distance {min} exceeds max_distance {max}"));
        }

        let (lo, hi) = (self.color_scale.domain_min, self.color_scale.domain_max);
        if !lo.is_finite() || !hi.is_finite() || lo == hi {
            return invalid(format!("color scale domain [{lo}, {hi}] is empty or not finite"));
        }

        if !(self.globe_radius.is_finite() && self.globe_radius > 0.0) {
            return invalid(format!("globe_radius must be positive, got {}", self.globe_radius));
        }

        let [w, h] = self.scheduler.placement.widget_size_px;
        if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0) {
            return invalid(format!("widget size must be positive, got {w}x{h}"));
        }
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let payload = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&payload)
    }
}
