use std::fmt;

use scene::{
    DataSeries, IngestOptions, MORPH_SLOTS, MarkerStyle, MorphFrame, PointCloud, PointGeometry, SeriesFormat,
    UnsupportedFormat, marker_transform,
};
use tracing::{info, warn};

use crate::symbology::ColorFn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestError {
    UnsupportedFormat(UnsupportedFormat),
    FrameLengthMismatch {
        frame: String,
        expected: usize,
        found: usize,
    },
}

impl fmt::Display for IngestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IngestError::UnsupportedFormat(e) => write!(f, "{e}"),
            IngestError::FrameLengthMismatch {
                frame,
                expected,
                found,
            } => write!(
                f,
                "frame {frame} has {found} vertices, base geometry has {expected}"
            ),
        }
    }
}

impl std::error::Error for IngestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IngestError::UnsupportedFormat(e) => Some(e),
            IngestError::FrameLengthMismatch { .. } => None,
        }
    }
}

impl From<UnsupportedFormat> for IngestError {
    fn from(e: UnsupportedFormat) -> Self {
        IngestError::UnsupportedFormat(e)
    }
}

/// Turns data series into marker geometry and accumulates morph frames.
///
/// A static ingest replaces everything. The first animated ingest also
/// becomes the base geometry; every animated ingest appends one frame.
#[derive(Debug, Clone)]
pub struct PointCloudBuilder {
    radius: f64,
    style: MarkerStyle,
    base: Option<PointGeometry>,
    frames: Vec<MorphFrame>,
    animated: bool,
    animated_ingests: usize,
}

impl PointCloudBuilder {
    pub fn new(radius: f64, style: MarkerStyle) -> Self {
        Self {
            radius,
            style,
            base: None,
            frames: Vec::new(),
            animated: false,
            animated_ingests: 0,
        }
    }

    /// Projects and colors every sample once.
    pub fn geometry(&self, series: &DataSeries, colors: &dyn ColorFn) -> PointGeometry {
        let mut geom = PointGeometry::with_capacity(series.len());
        for sample in &series.samples {
            let color = colors.color_for(sample.color_value(series.format), series.format);
            let transform = marker_transform(sample.point, self.radius, self.style);
            geom.push_marker(&transform, color);
        }
        geom
    }

    /// Ingests `series` and returns the cloud that should replace the
    /// current one.
    pub fn ingest(
        &mut self,
        series: &DataSeries,
        options: &IngestOptions,
        colors: &dyn ColorFn,
    ) -> Result<PointCloud, IngestError> {
        let geometry = self.geometry(series, colors);

        if !options.animated {
            self.base = Some(geometry.clone());
            self.frames.clear();
            self.animated = false;
            self.animated_ingests = 0;
            info!(markers = geometry.marker_count(), "ingested static series");
            return Ok(PointCloud::new_static(geometry));
        }

        if !self.animated {
            self.frames.clear();
            self.animated_ingests = 0;
            self.animated = true;
            self.base = None;
        }
        let base = self.base.get_or_insert_with(|| geometry.clone()).clone();

        let name = options
            .frame_name
            .clone()
            .unwrap_or_else(|| format!("morphTarget{}", self.animated_ingests));

        if geometry.vertex_count() != base.vertex_count() {
            return Err(IngestError::FrameLengthMismatch {
                frame: name,
                expected: base.vertex_count(),
                found: geometry.vertex_count(),
            });
        }

        if self.frames.len() >= MORPH_SLOTS {
            warn!(frame = %name, slots = MORPH_SLOTS, "frame count exceeds morph slots");
        }
        info!(frame = %name, markers = geometry.marker_count(), "ingested animated frame");
        self.frames.push(MorphFrame::new(name, geometry.vertices));
        self.animated_ingests += 1;
        Ok(PointCloud::new_animated(base, self.frames.clone()))
    }
}
