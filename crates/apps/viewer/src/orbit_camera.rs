//! Inertial orbit camera around the data globe.
//!
//! The camera never rotates directly: input moves a *target* rotation and
//! distance, and every [`OrbitCamera::update`] eases the current values
//! towards them. The current rotation doubles as the geographic focus, see
//! [`OrbitCamera::focus`].

use std::f64::consts::{FRAC_PI_2, PI};

use foundation::math::{GeoPoint, Vec3};
use gpu::Camera3D;
use serde::{Deserialize, Serialize};

/// Tuning constants of the orbit camera.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Fraction of the remaining rotation covered per update.
    pub rotation_damping: f64,
    /// Fraction of the remaining distance covered per update.
    pub distance_damping: f64,
    /// Radians per dragged pixel at a distance of 1000.
    pub drag_sensitivity: f64,
    /// Multiplier applied to wheel deltas before zooming.
    pub wheel_factor: f64,
    /// Zoom applied per Up/Down key press.
    pub key_zoom_step: f64,
    pub min_distance: f64,
    pub max_distance: f64,
    pub fov_y_deg: f64,
    pub near: f64,
    pub far: f64,
    /// Target rotation `[x, y]` at start-up, in radians.
    pub initial_target: [f64; 2],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            rotation_damping: 0.1,
            distance_damping: 0.3,
            drag_sensitivity: 0.005,
            wheel_factor: 0.3,
            key_zoom_step: 100.0,
            min_distance: 350.0,
            max_distance: 1000.0,
            fov_y_deg: 30.0,
            near: 1.0,
            far: 10_000.0,
            initial_target: [PI * 3.0 / 2.0, PI / 6.0],
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ZoomKey {
    Up,
    Down,
}

/// Input already reduced to what the camera cares about.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum CameraIntent {
    /// Pointer pressed at client coordinates `(x, y)`.
    DragStart { x: f64, y: f64 },
    DragMove { x: f64, y: f64 },
    DragEnd,
    /// Vertical wheel delta; positive values zoom in.
    Wheel { delta_y: f64 },
    Key(ZoomKey),
    PointerEnter,
    /// Also cancels a drag in progress.
    PointerLeave,
    Resize { width: f64, height: f64 },
    /// Zoom applied on every update until changed.
    ZoomVelocity(f64),
}

/// Current and target orbit parameters.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct OrbitState {
    /// `[x, y]` in radians: x spins around the polar axis, y tilts.
    pub rotation: [f64; 2],
    pub target: [f64; 2],
    pub distance: f64,
    pub target_distance: f64,
    pub zoom_velocity: f64,
}

#[derive(Debug, Copy, Clone, PartialEq)]
struct DragAnchor {
    /// Pointer at drag start with x negated.
    pointer: [f64; 2],
    target: [f64; 2],
}

#[derive(Debug, Clone)]
pub struct OrbitCamera {
    config: CameraConfig,
    state: OrbitState,
    drag: Option<DragAnchor>,
    pointer_over: bool,
    viewport: [f64; 2],
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(CameraConfig::default())
    }
}

impl OrbitCamera {
    pub fn new(config: CameraConfig) -> Self {
        // Start fully zoomed out so the distance is in range from the first
        // frame.
        let distance = config.max_distance;
        Self {
            state: OrbitState {
                rotation: [0.0, 0.0],
                target: config.initial_target,
                distance,
                target_distance: distance,
                zoom_velocity: 0.0,
            },
            config,
            drag: None,
            pointer_over: false,
            viewport: [1280.0, 720.0],
        }
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    pub fn state(&self) -> &OrbitState {
        &self.state
    }

    /// Viewport `[width, height]` in pixels.
    pub fn viewport(&self) -> [f64; 2] {
        self.viewport
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn handle(&mut self, intent: CameraIntent) {
        match intent {
            CameraIntent::DragStart { x, y } => {
                self.drag = Some(DragAnchor {
                    pointer: [-x, y],
                    target: self.state.target,
                });
            }
            CameraIntent::DragMove { x, y } => {
                let Some(anchor) = self.drag else {
                    return;
                };
                let damp = self.state.distance / 1000.0;
                let k = self.config.drag_sensitivity * damp;
                self.state.target[0] = anchor.target[0] + (-x - anchor.pointer[0]) * k;
                self.state.target[1] = (anchor.target[1] + (y - anchor.pointer[1]) * k)
                    .clamp(-FRAC_PI_2, FRAC_PI_2);
            }
            CameraIntent::DragEnd => self.drag = None,
            CameraIntent::Wheel { delta_y } => {
                if self.pointer_over {
                    self.zoom(delta_y * self.config.wheel_factor);
                }
            }
            CameraIntent::Key(ZoomKey::Up) => self.zoom(self.config.key_zoom_step),
            CameraIntent::Key(ZoomKey::Down) => self.zoom(-self.config.key_zoom_step),
            CameraIntent::PointerEnter => self.pointer_over = true,
            CameraIntent::PointerLeave => {
                self.pointer_over = false;
                self.drag = None;
            }
            CameraIntent::Resize { width, height } => {
                self.viewport = [width.max(1.0), height.max(1.0)];
            }
            CameraIntent::ZoomVelocity(v) => self.state.zoom_velocity = v,
        }
    }

    /// Moves the target distance by `-delta`, clamped to the allowed range.
    pub fn zoom(&mut self, delta: f64) {
        self.state.target_distance = (self.state.target_distance - delta)
            .clamp(self.config.min_distance, self.config.max_distance);
    }

    /// One damping step.
    pub fn update(&mut self) {
        self.zoom(self.state.zoom_velocity);
        let s = &mut self.state;
        for axis in 0..2 {
            s.rotation[axis] += (s.target[axis] - s.rotation[axis]) * self.config.rotation_damping;
        }
        s.distance += (s.target_distance - s.distance) * self.config.distance_damping;
    }

    /// Geographic point under the camera, derived from the current rotation.
    ///
    /// The mapping flips sides every half turn; at the seam (longitude 0 or
    /// ±180) the result may land on the opposite meridian.
    pub fn focus(&self) -> GeoPoint {
        let [rx, ry] = self.state.rotation;
        let latitude = ry.to_degrees();
        let m = (rx.to_degrees() - 270.0) % 180.0;
        let half_turns = ((rx - 3.0 * PI / 2.0) / PI).floor() as i64;
        let longitude = if half_turns.rem_euclid(2) == 1 {
            if m > 0.0 { -180.0 + m.abs() } else { -m.abs() }
        } else if m > 0.0 {
            m
        } else {
            180.0 - m.abs()
        };
        GeoPoint::new(latitude, longitude)
    }

    /// Points the camera at `point` immediately, skipping the easing.
    pub fn orient_toward(&mut self, point: GeoPoint) {
        let rotation = [
            (point.longitude + 270.0).to_radians(),
            point.latitude.to_radians(),
        ];
        self.state.rotation = rotation;
        self.state.target = rotation;
    }

    pub fn eye_position(&self) -> Vec3 {
        let [rx, ry] = self.state.rotation;
        let d = self.state.distance;
        Vec3::new(d * rx.sin() * ry.cos(), d * ry.sin(), d * rx.cos() * ry.cos())
    }

    pub fn camera3d(&self) -> Camera3D {
        Camera3D::look_at(
            self.eye_position(),
            Vec3::ZERO,
            self.config.fov_y_deg.to_radians(),
            self.config.near,
            self.config.far,
        )
        .with_aspect(self.viewport[0] / self.viewport[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn starts_at_max_distance_heading_for_initial_target() {
        let cam = OrbitCamera::default();
        assert_eq!(cam.state().distance, 1000.0);
        assert_eq!(cam.state().rotation, [0.0, 0.0]);
        assert_close(cam.state().target[0], 3.0 * PI / 2.0, 1e-12);
        assert_close(cam.state().target[1], PI / 6.0, 1e-12);
    }

    #[test]
    fn target_distance_stays_clamped() {
        let mut cam = OrbitCamera::default();
        for _ in 0..20 {
            cam.handle(CameraIntent::Key(ZoomKey::Up));
            assert!(cam.state().target_distance >= 350.0);
        }
        assert_eq!(cam.state().target_distance, 350.0);
        for _ in 0..20 {
            cam.handle(CameraIntent::Key(ZoomKey::Down));
            assert!(cam.state().target_distance <= 1000.0);
        }
        assert_eq!(cam.state().target_distance, 1000.0);

        cam.handle(CameraIntent::ZoomVelocity(1e6));
        for _ in 0..10 {
            cam.update();
            let s = cam.state();
            assert!((350.0..=1000.0).contains(&s.target_distance));
            assert!((350.0..=1000.0).contains(&s.distance));
        }
    }

    #[test]
    fn wheel_only_zooms_over_the_renderer() {
        let mut cam = OrbitCamera::default();
        cam.handle(CameraIntent::Wheel { delta_y: 500.0 });
        assert_eq!(cam.state().target_distance, 1000.0);

        cam.handle(CameraIntent::PointerEnter);
        cam.handle(CameraIntent::Wheel { delta_y: 500.0 });
        assert_eq!(cam.state().target_distance, 850.0);

        cam.handle(CameraIntent::PointerLeave);
        cam.handle(CameraIntent::Wheel { delta_y: 500.0 });
        assert_eq!(cam.state().target_distance, 850.0);
    }

    #[test]
    fn update_eases_towards_targets() {
        let mut cam = OrbitCamera::default();
        cam.handle(CameraIntent::Key(ZoomKey::Up));
        cam.update();
        let s = *cam.state();
        assert_close(s.rotation[0], 0.1 * 3.0 * PI / 2.0, 1e-12);
        assert_close(s.distance, 1000.0 - 0.3 * 100.0, 1e-12);
    }

    #[test]
    fn drag_moves_target_and_clamps_tilt() {
        let mut cam = OrbitCamera::default();
        let start = cam.state().target;
        cam.handle(CameraIntent::DragStart { x: 100.0, y: 100.0 });
        cam.handle(CameraIntent::DragMove { x: 50.0, y: 120.0 });
        // Moving left by 50px spins +x by 50 * 0.005 at distance 1000.
        assert_close(cam.state().target[0], start[0] + 0.25, 1e-12);
        assert_close(cam.state().target[1], start[1] + 0.1, 1e-12);

        cam.handle(CameraIntent::DragMove { x: 50.0, y: 10_000.0 });
        assert_eq!(cam.state().target[1], FRAC_PI_2);

        cam.handle(CameraIntent::DragEnd);
        let frozen = cam.state().target;
        cam.handle(CameraIntent::DragMove { x: 0.0, y: 0.0 });
        assert_eq!(cam.state().target, frozen);
    }

    #[test]
    fn focus_round_trips_away_from_the_seam() {
        let mut cam = OrbitCamera::default();
        for (lat, lon) in [(0.0, 30.0), (45.0, -45.0), (-20.0, 120.0), (60.0, -170.0), (10.0, 179.0)] {
            cam.orient_toward(GeoPoint::new(lat, lon));
            let focus = cam.focus();
            assert_close(focus.latitude, lat, 1e-9);
            assert_close(focus.longitude, lon, 1e-9);
        }
    }

    #[test]
    fn initial_target_faces_the_prime_meridian_side() {
        let mut cam = OrbitCamera::default();
        for _ in 0..400 {
            cam.update();
        }
        let focus = cam.focus();
        assert_close(focus.latitude, 30.0, 1e-6);
        // rx = 3π/2 sits exactly on the seam.
        assert!(focus.longitude.abs() < 1e-6 || (focus.longitude.abs() - 180.0).abs() < 1e-6);
    }

    #[test]
    fn eye_orbits_at_current_distance() {
        let mut cam = OrbitCamera::default();
        cam.orient_toward(GeoPoint::new(20.0, 40.0));
        assert_close(cam.eye_position().length(), 1000.0, 1e-9);

        cam.handle(CameraIntent::Resize { width: 1600.0, height: 800.0 });
        let camera = cam.camera3d();
        assert_eq!(camera.aspect, 2.0);
        assert_close(camera.fov_y_rad, 30f64.to_radians(), 1e-12);
        assert_eq!(cam.viewport(), [1600.0, 800.0]);
    }
}
