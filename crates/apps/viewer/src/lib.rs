pub mod config;
pub mod globe_controller;
pub mod orbit_camera;

pub use config::{ConfigError, GlobeConfig};
pub use globe_controller::{GlobeController, TickReport};
pub use orbit_camera::{CameraConfig, CameraIntent, OrbitCamera, OrbitState, ZoomKey};
