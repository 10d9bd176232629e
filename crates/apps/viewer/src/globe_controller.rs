//! Owns every globe component and drives them once per display refresh.

use formats::{ClaimRecord, SeriesOptions};
use foundation::math::GeoPoint;
use gpu::{RenderFrame, Renderer};
use layers::{
    AnnotationScheduler, AnnotationSurface, ColorFn, ColorScale, GlobeData, IngestError,
    PointCloudBuilder, Readout, ReadoutSurface, ScaleLegend, SchedulerReport, compute_readout,
};
use runtime::metrics::{
    ANNOTATIONS_ACTIVE, ANNOTATIONS_RETIRED, ANNOTATIONS_SPAWNED, PLACEMENT_ATTEMPTS,
    PLACEMENT_FALLBACKS, PLACEMENT_OVERLAPS, SAMPLES_INGESTED, TICKS,
};
use runtime::{EventBus, EventKind, Frame, Metrics};
use scene::prefabs::GlobePrefab;
use scene::{DataSeries, MarkerStyle, MorphBlender, PointCloud};
use tracing::{debug, info};

use crate::config::GlobeConfig;
use crate::orbit_camera::{CameraIntent, OrbitCamera};

/// Outcome of one [`GlobeController::tick`].
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub frame: Frame,
    pub focus: GeoPoint,
    pub annotations: SchedulerReport,
    pub readout: Readout,
}

pub struct GlobeController<R, A, S> {
    config: GlobeConfig,
    camera: OrbitCamera,
    colors: Box<dyn ColorFn>,
    builder: PointCloudBuilder,
    cloud: Option<PointCloud>,
    blender: MorphBlender,
    globe: GlobePrefab,
    data: GlobeData,
    scheduler: AnnotationScheduler<A>,
    readout_surface: S,
    readout: Readout,
    renderer: R,
    frame: Option<Frame>,
    events: EventBus,
    metrics: Metrics,
}

impl<R, A, S> GlobeController<R, A, S>
where
    R: Renderer,
    A: AnnotationSurface,
    S: ReadoutSurface,
{
    pub fn new(config: GlobeConfig, renderer: R, annotations: A, mut readout_surface: S) -> Self {
        readout_surface.init_scale(&ScaleLegend::new(&config.color_scale));
        Self {
            camera: OrbitCamera::new(config.camera.clone()),
            colors: Box::new(ColorScale::new(config.color_scale)),
            builder: PointCloudBuilder::new(config.globe_radius, MarkerStyle::default()),
            cloud: None,
            blender: MorphBlender::new(),
            globe: GlobePrefab::new(config.globe_radius),
            data: GlobeData::new(),
            scheduler: AnnotationScheduler::new(config.scheduler.clone(), annotations),
            readout_surface,
            readout: Readout::idle(),
            renderer,
            frame: None,
            events: EventBus::new(),
            metrics: Metrics::new(),
            config,
        }
    }

    /// Replaces the default hue scale for subsequent ingests.
    pub fn with_color_fn(mut self, colors: impl ColorFn + 'static) -> Self {
        self.colors = Box::new(colors);
        self
    }

    /// Plots `series` (re-tagged with the resolved format) and rebuilds the
    /// temperature table. A rejected ingest leaves everything untouched.
    pub fn ingest_series(
        &mut self,
        mut series: DataSeries,
        options: &SeriesOptions,
    ) -> Result<(), IngestError> {
        let options = options.resolve()?;
        series.format = options.format;

        let cloud = self.builder.ingest(&series, &options, self.colors.as_ref())?;
        self.data.replace_temperatures(&series, self.colors.as_ref());
        self.blender.refresh(cloud.frames());
        self.cloud = Some(cloud);

        self.metrics.inc_counter(SAMPLES_INGESTED, series.len() as u64);
        self.events.emit(
            self.frame_index(),
            EventKind::SeriesIngested,
            format!("{} samples ({})", series.len(), series.format.as_str()),
        );
        Ok(())
    }

    /// Rebuilds the country and claim tables from `records`, retiring every
    /// widget that showed an old claim.
    pub fn ingest_claims(&mut self, records: impl IntoIterator<Item = ClaimRecord>) {
        for country in self.scheduler.clear() {
            self.events
                .emit(self.frame_index(), EventKind::AnnotationRetired, country);
        }
        self.data.clear_claims();

        let mut count = 0usize;
        for record in records {
            self.data.add_claim(&record.country, record.point, record.claim);
            count += 1;
        }
        info!(claims = count, countries = self.data.country_count(), "ingested claims");
        self.events.emit(
            self.frame_index(),
            EventKind::ClaimsIngested,
            format!("{count} claims for {} countries", self.data.country_count()),
        );
    }

    pub fn set_time(&mut self, t: f64) {
        let frames = self.cloud.as_ref().map_or(&[][..], PointCloud::frames);
        self.blender.set_time(t, frames);
    }

    pub fn get_time(&self) -> f64 {
        self.blender.time()
    }

    pub fn handle_intent(&mut self, intent: CameraIntent) {
        self.camera.handle(intent);
    }

    /// Camera damping, focus, annotations, readout and atmosphere, then draw.
    pub fn tick(&mut self, dt_s: f64) -> TickReport {
        let frame = match self.frame {
            Some(prev) => prev.advance(dt_s),
            None => Frame::first(dt_s),
        };
        self.frame = Some(frame);
        self.metrics.inc_counter(TICKS, 1);

        self.camera.update();
        let focus = self.camera.focus();

        let annotations = self.scheduler.tick(focus, &self.data, self.camera.viewport());
        self.record_annotations(frame, &annotations);

        let threshold = self.scheduler.config().temperature_threshold_deg;
        let highlight = self.data.nearest_temperature(focus, threshold);
        let readout = compute_readout(highlight, &self.config.color_scale);
        if readout != self.readout {
            debug!(label = %readout.label, "readout changed");
        }
        self.globe.set_atmosphere_color(readout.atmosphere);
        readout.apply(&mut self.readout_surface);
        self.readout = readout.clone();

        let scene = RenderFrame::globe(&self.globe, self.cloud.as_ref(), self.blender.influences());
        self.renderer.render(&scene, &self.camera.camera3d());

        TickReport {
            frame,
            focus,
            annotations,
            readout,
        }
    }

    fn record_annotations(&mut self, frame: Frame, report: &SchedulerReport) {
        for country in &report.retired {
            self.events
                .emit_at(frame, EventKind::AnnotationRetired, country.as_str());
        }
        for country in &report.spawned {
            self.events
                .emit_at(frame, EventKind::AnnotationSpawned, country.as_str());
        }
        if report.grid_fallbacks > 0 {
            self.events.emit_at(
                frame,
                EventKind::PlacementFallback,
                format!("{} grid, {} overlapping", report.grid_fallbacks, report.overlaps),
            );
        }

        self.metrics
            .inc_counter(ANNOTATIONS_SPAWNED, report.spawned.len() as u64);
        self.metrics
            .inc_counter(ANNOTATIONS_RETIRED, report.retired.len() as u64);
        self.metrics
            .inc_counter(PLACEMENT_ATTEMPTS, report.placement_attempts);
        self.metrics
            .inc_counter(PLACEMENT_FALLBACKS, report.grid_fallbacks);
        self.metrics.inc_counter(PLACEMENT_OVERLAPS, report.overlaps);
        self.metrics
            .set_gauge(ANNOTATIONS_ACTIVE, self.scheduler.active_count() as i64);
    }

    fn frame_index(&self) -> u64 {
        self.frame.map_or(0, |f| f.index)
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut OrbitCamera {
        &mut self.camera
    }

    pub fn data(&self) -> &GlobeData {
        &self.data
    }

    pub fn cloud(&self) -> Option<&PointCloud> {
        self.cloud.as_ref()
    }

    pub fn influences(&self) -> &[f64] {
        self.blender.influences()
    }

    pub fn globe(&self) -> &GlobePrefab {
        &self.globe
    }

    pub fn scheduler(&self) -> &AnnotationScheduler<A> {
        &self.scheduler
    }

    pub fn readout_surface(&self) -> &S {
        &self.readout_surface
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut EventBus {
        &mut self.events
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }
}
