pub mod annotations;
pub mod dataset;
pub mod placement;
pub mod points;
pub mod readout;
pub mod symbology;

pub use annotations::{
    ActiveAnnotation, AnnotationContent, AnnotationScheduler, AnnotationSurface,
    RecordingSurface, SchedulerConfig, SchedulerReport, WidgetHandle,
};
pub use dataset::{GlobeData, TemperatureSample};
pub use placement::{Placement, PlacementConfig, PlacementOutcome};
pub use points::{IngestError, PointCloudBuilder};
pub use readout::{ReadoutSurface, Readout, RecordingReadout, compute_readout};
pub use symbology::{ColorFn, ColorScale, ColorScaleConfig, SCALE_BUCKETS, ScaleLegend};
pub use scene::{Claim, ClaimCategory, IngestOptions};
