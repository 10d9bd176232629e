use std::collections::BTreeMap;

use foundation::bounds::Aabb2;
use foundation::color::Rgb;
use foundation::math::GeoPoint;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dataset::GlobeData;
use crate::placement::{PlacementConfig, PlacementOutcome, place_widget};
use scene::ClaimCategory;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WidgetHandle(pub u64);

/// What a claim widget shows.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationContent {
    pub country: String,
    pub text: String,
    pub category: ClaimCategory,
    pub color: Rgb,
}

/// Screen-space container the scheduler writes claim widgets into.
pub trait AnnotationSurface {
    fn create_widget(&mut self, content: &AnnotationContent) -> WidgetHandle;
    /// `position` is the `[left, top]` corner in pixels.
    fn place_widget(&mut self, handle: WidgetHandle, position: [f64; 2]);
    fn destroy_widget(&mut self, handle: WidgetHandle);
    fn measure_bounds(&self, handle: WidgetHandle) -> Aabb2;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Upper bound on simultaneously displayed claims.
    pub max_annotations: usize,
    /// Per-axis focus window around a country, in degrees (exclusive).
    pub focus_tolerance_deg: f64,
    /// Manhattan radius for the temperature highlight (exclusive).
    pub temperature_threshold_deg: f64,
    /// Fixed seed for claim choice and placement; `None` seeds from the OS.
    pub seed: Option<u64>,
    pub placement: PlacementConfig,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            max_annotations: 3,
            focus_tolerance_deg: 5.0,
            temperature_threshold_deg: 3.0,
            seed: None,
            placement: PlacementConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActiveAnnotation {
    pub country: String,
    pub position: [f64; 2],
    pub handle: WidgetHandle,
    pub claim_index: usize,
}

/// What one tick changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchedulerReport {
    pub spawned: Vec<String>,
    pub retired: Vec<String>,
    pub placement_attempts: u64,
    /// Placements that needed the grid scan.
    pub grid_fallbacks: u64,
    /// Placements that ended up over another widget.
    pub overlaps: u64,
}

impl SchedulerReport {
    pub fn is_empty(&self) -> bool {
        self.spawned.is_empty() && self.retired.is_empty()
    }
}

/// Spawns a claim widget for every country near the focus point (up to the
/// cap) and retires widgets whose country drifted out of focus.
pub struct AnnotationScheduler<S> {
    config: SchedulerConfig,
    surface: S,
    rng: StdRng,
    active: BTreeMap<String, ActiveAnnotation>,
}

impl<S: AnnotationSurface> AnnotationScheduler<S> {
    pub fn new(config: SchedulerConfig, surface: S) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            config,
            surface,
            rng,
            active: BTreeMap::new(),
        }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Active annotations in country name order.
    pub fn active(&self) -> impl Iterator<Item = &ActiveAnnotation> {
        self.active.values()
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn is_displayed(&self, country: &str) -> bool {
        self.active.contains_key(country)
    }

    /// Retires out-of-focus widgets first, then spawns for in-focus
    /// countries while below the cap, scanning countries in name order.
    pub fn tick(&mut self, focus: GeoPoint, data: &GlobeData, viewport: [f64; 2]) -> SchedulerReport {
        let mut report = SchedulerReport::default();
        let tolerance = self.config.focus_tolerance_deg;

        let stale: Vec<String> = self
            .active
            .keys()
            .filter(|name| {
                data.country(name)
                    .is_none_or(|point| !focus.within(point, tolerance))
            })
            .cloned()
            .collect();
        for name in stale {
            if let Some(annotation) = self.active.remove(&name) {
                self.surface.destroy_widget(annotation.handle);
                debug!(country = %name, "retired annotation");
                report.retired.push(name);
            }
        }

        for (name, point) in data.countries() {
            if self.active.len() >= self.config.max_annotations {
                break;
            }
            if self.active.contains_key(name) || !focus.within(point, tolerance) {
                continue;
            }
            let claims = data.claims(name);
            if claims.is_empty() {
                continue;
            }

            let claim_index = self.rng.random_range(0..claims.len());
            let claim = &claims[claim_index];
            let content = AnnotationContent {
                country: name.to_string(),
                text: claim.text.clone(),
                category: claim.category,
                color: claim.category.color(),
            };

            let occupied: Vec<Aabb2> = self
                .active
                .values()
                .map(|a| self.surface.measure_bounds(a.handle))
                .collect();
            let handle = self.surface.create_widget(&content);
            let placement = place_widget(&mut self.rng, viewport, &occupied, &self.config.placement);
            self.surface.place_widget(handle, placement.position);

            report.placement_attempts += u64::from(placement.attempts);
            match placement.outcome {
                PlacementOutcome::Sampled => {}
                PlacementOutcome::Grid => report.grid_fallbacks += 1,
                PlacementOutcome::Overlapping => {
                    report.grid_fallbacks += 1;
                    report.overlaps += 1;
                }
            }

            debug!(
                country = %name,
                claim = claim_index,
                left = placement.position[0],
                top = placement.position[1],
                "spawned annotation"
            );
            self.active.insert(
                name.to_string(),
                ActiveAnnotation {
                    country: name.to_string(),
                    position: placement.position,
                    handle,
                    claim_index,
                },
            );
            report.spawned.push(name.to_string());
        }

        report
    }

    /// Destroys every widget, e.g. before the claim tables are rebuilt.
    pub fn clear(&mut self) -> Vec<String> {
        let active = std::mem::take(&mut self.active);
        let mut retired = Vec::with_capacity(active.len());
        for (name, annotation) in active {
            self.surface.destroy_widget(annotation.handle);
            retired.push(name);
        }
        retired
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedWidget {
    pub content: AnnotationContent,
    pub position: Option<[f64; 2]>,
}

/// In-memory [`AnnotationSurface`] that keeps every live widget and reports
/// fixed-size bounds.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    widget_size: [f64; 2],
    next_handle: u64,
    widgets: BTreeMap<WidgetHandle, RecordedWidget>,
    destroyed: Vec<WidgetHandle>,
}

impl RecordingSurface {
    pub fn new(widget_size: [f64; 2]) -> Self {
        Self {
            widget_size,
            next_handle: 1,
            widgets: BTreeMap::new(),
            destroyed: Vec::new(),
        }
    }

    pub fn widgets(&self) -> impl Iterator<Item = (&WidgetHandle, &RecordedWidget)> {
        self.widgets.iter()
    }

    pub fn widget(&self, handle: WidgetHandle) -> Option<&RecordedWidget> {
        self.widgets.get(&handle)
    }

    pub fn live_count(&self) -> usize {
        self.widgets.len()
    }

    pub fn destroyed(&self) -> &[WidgetHandle] {
        &self.destroyed
    }
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new(PlacementConfig::default().widget_size_px)
    }
}

impl AnnotationSurface for RecordingSurface {
    fn create_widget(&mut self, content: &AnnotationContent) -> WidgetHandle {
        let handle = WidgetHandle(self.next_handle);
        self.next_handle += 1;
        self.widgets.insert(
            handle,
            RecordedWidget {
                content: content.clone(),
                position: None,
            },
        );
        handle
    }

    fn place_widget(&mut self, handle: WidgetHandle, position: [f64; 2]) {
        if let Some(widget) = self.widgets.get_mut(&handle) {
            widget.position = Some(position);
        }
    }

    fn destroy_widget(&mut self, handle: WidgetHandle) {
        if self.widgets.remove(&handle).is_some() {
            self.destroyed.push(handle);
        }
    }

    fn measure_bounds(&self, handle: WidgetHandle) -> Aabb2 {
        let origin = self
            .widgets
            .get(&handle)
            .and_then(|w| w.position)
            .unwrap_or([0.0, 0.0]);
        Aabb2::from_origin_size(origin, self.widget_size)
    }
}
