use foundation::bounds::Aabb2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Screen regions annotation widgets may occupy, as fractions of the
/// viewport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Width and height reserved for one widget, in pixels.
    pub widget_size_px: [f64; 2],
    /// Vertical band `[start, end)` for the top edge.
    pub top_band: [f64; 2],
    /// Horizontal band `[start, end)` for the left edge.
    pub left_band: [f64; 2],
    /// Left edges strictly inside this column are rejected (the globe sits
    /// there).
    pub reserved_column: [f64; 2],
    pub max_attempts: u32,
    pub grid_gap_px: f64,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            widget_size_px: [350.0, 300.0],
            top_band: [0.04, 0.54],
            left_band: [0.02, 0.80],
            reserved_column: [0.18, 0.67],
            max_attempts: 64,
            grid_gap_px: 8.0,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PlacementOutcome {
    /// A random candidate was accepted.
    Sampled,
    /// Sampling ran out; a free grid cell was used.
    Grid,
    /// Nothing was free; the first grid cell overlaps an active widget.
    Overlapping,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Placement {
    /// Top-left corner as `[left, top]` in pixels.
    pub position: [f64; 2],
    /// Random candidates drawn before the result was settled.
    pub attempts: u32,
    pub outcome: PlacementOutcome,
}

impl Placement {
    pub fn bounds(&self, cfg: &PlacementConfig) -> Aabb2 {
        Aabb2::from_origin_size(self.position, cfg.widget_size_px)
    }
}

/// Finds a top-left corner for a new widget in a `viewport` of
/// `[width, height]` pixels, avoiding the reserved column and every box in
/// `occupied`. Always terminates.
pub fn place_widget<R: Rng + ?Sized>(
    rng: &mut R,
    viewport: [f64; 2],
    occupied: &[Aabb2],
    cfg: &PlacementConfig,
) -> Placement {
    let [w, h] = viewport;
    let top_span = (cfg.top_band[1] - cfg.top_band[0]) * h;
    let left_span = (cfg.left_band[1] - cfg.left_band[0]) * w;

    for attempt in 1..=cfg.max_attempts {
        let top = (rng.random::<f64>() * top_span).floor() + cfg.top_band[0] * h;
        let left = (rng.random::<f64>() * left_span).floor() + cfg.left_band[0] * w;
        if is_free([left, top], viewport, occupied, cfg) {
            return Placement {
                position: [left, top],
                attempts: attempt,
                outcome: PlacementOutcome::Sampled,
            };
        }
    }

    let cells = grid_cells(viewport, cfg);
    if let Some(position) = cells
        .iter()
        .copied()
        .find(|p| is_free(*p, viewport, occupied, cfg))
    {
        return Placement {
            position,
            attempts: cfg.max_attempts,
            outcome: PlacementOutcome::Grid,
        };
    }

    let position = cells
        .first()
        .copied()
        .unwrap_or([cfg.left_band[0] * w, cfg.top_band[0] * h]);
    warn!(
        left = position[0],
        top = position[1],
        active = occupied.len(),
        "no free annotation slot, placing over an active widget"
    );
    Placement {
        position,
        attempts: cfg.max_attempts,
        outcome: PlacementOutcome::Overlapping,
    }
}

fn in_reserved_column(left: f64, width: f64, cfg: &PlacementConfig) -> bool {
    left > cfg.reserved_column[0] * width && left < cfg.reserved_column[1] * width
}

fn is_free(position: [f64; 2], viewport: [f64; 2], occupied: &[Aabb2], cfg: &PlacementConfig) -> bool {
    if in_reserved_column(position[0], viewport[0], cfg) {
        return false;
    }
    let candidate = Aabb2::from_origin_size(position, cfg.widget_size_px);
    !occupied.iter().any(|b| candidate.intersects(b))
}

/// Candidate corners scanned row by row over both bands, outside the
/// reserved column. Neighbouring cells are separated by `grid_gap_px`.
fn grid_cells(viewport: [f64; 2], cfg: &PlacementConfig) -> Vec<[f64; 2]> {
    let [w, h] = viewport;
    let step_x = cfg.widget_size_px[0] + cfg.grid_gap_px;
    let step_y = cfg.widget_size_px[1] + cfg.grid_gap_px;
    if step_x <= 0.0 || step_y <= 0.0 {
        return Vec::new();
    }

    let mut cells = Vec::new();
    let mut top = cfg.top_band[0] * h;
    while top < cfg.top_band[1] * h {
        let mut left = cfg.left_band[0] * w;
        while left < cfg.left_band[1] * w {
            if !in_reserved_column(left, w, cfg) {
                cells.push([left, top]);
            }
            left += step_x;
        }
        top += step_y;
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const VIEWPORT: [f64; 2] = [1920.0, 1080.0];

    #[test]
    fn sampled_positions_respect_bands_and_reserved_column() {
        let cfg = PlacementConfig::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let p = place_widget(&mut rng, VIEWPORT, &[], &cfg);
            assert_eq!(p.outcome, PlacementOutcome::Sampled);
            let [left, top] = p.position;
            assert!(top >= 0.04 * 1080.0 && top < 0.54 * 1080.0, "top {top}");
            assert!(left >= 0.02 * 1920.0 && left < 0.80 * 1920.0, "left {left}");
            assert!(!(left > 0.18 * 1920.0 && left < 0.67 * 1920.0), "left {left}");
        }
    }

    #[test]
    fn new_widget_never_overlaps_active_ones_when_space_remains() {
        let cfg = PlacementConfig::default();
        let mut rng = StdRng::seed_from_u64(42);
        let mut occupied = Vec::new();
        // One widget can block at most one side of the globe.
        for _ in 0..2 {
            let p = place_widget(&mut rng, VIEWPORT, &occupied, &cfg);
            assert_ne!(p.outcome, PlacementOutcome::Overlapping);
            let b = p.bounds(&cfg);
            assert!(occupied.iter().all(|o: &Aabb2| !o.intersects(&b)));
            occupied.push(b);
        }
    }

    #[test]
    fn exhausted_sampling_falls_back_to_grid() {
        let cfg = PlacementConfig {
            max_attempts: 0,
            ..PlacementConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(1);
        let first = grid_cells(VIEWPORT, &cfg)[0];
        let blocker = Aabb2::from_origin_size(first, cfg.widget_size_px);

        let p = place_widget(&mut rng, VIEWPORT, &[blocker], &cfg);
        assert_eq!(p.outcome, PlacementOutcome::Grid);
        assert!(!p.bounds(&cfg).intersects(&blocker));
    }

    #[test]
    fn full_screen_accepts_overlap() {
        let cfg = PlacementConfig::default();
        let mut rng = StdRng::seed_from_u64(3);
        let everything = Aabb2::new([0.0, 0.0], VIEWPORT);

        let p = place_widget(&mut rng, VIEWPORT, &[everything], &cfg);
        assert_eq!(p.outcome, PlacementOutcome::Overlapping);
        assert_eq!(p.attempts, cfg.max_attempts);
        assert_eq!(p.position, grid_cells(VIEWPORT, &cfg)[0]);
    }

    #[test]
    fn grid_skips_reserved_column() {
        let cfg = PlacementConfig::default();
        let cells = grid_cells(VIEWPORT, &cfg);
        assert!(!cells.is_empty());
        assert!(cells.iter().all(|[left, _]| !in_reserved_column(*left, VIEWPORT[0], &cfg)));
        // Both sides of the globe get cells.
        assert!(cells.iter().any(|[left, _]| *left < 0.18 * VIEWPORT[0]));
        assert!(cells.iter().any(|[left, _]| *left >= 0.67 * VIEWPORT[0]));
    }
}
