use foundation::color::Rgb;
use foundation::math::GLOBE_RADIUS;

use crate::components::{Drawable3D, Material};

/// Scale of the atmosphere shell relative to the earth sphere.
pub const ATMOSPHERE_SCALE: f64 = 1.1;

/// The two static shells drawn under the data points.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GlobePrefab {
    pub earth: Drawable3D,
    pub atmosphere: Drawable3D,
}

impl GlobePrefab {
    pub fn new(radius: f64) -> Self {
        Self {
            // Rotated half a turn so the texture seam matches the mirrored
            // longitude used by the projection.
            earth: Drawable3D::sphere(
                radius,
                Material::Earth {
                    atmosphere: Rgb::WHITE,
                },
            )
            .with_rotation_y(std::f64::consts::PI),
            atmosphere: Drawable3D::sphere(radius, Material::Atmosphere { color: Rgb::WHITE })
                .with_scale(ATMOSPHERE_SCALE),
        }
    }

    /// Tints the earth rim and the atmosphere glow together.
    pub fn set_atmosphere_color(&mut self, color: Rgb) {
        self.earth.set_tint(color);
        self.atmosphere.set_tint(color);
    }
}

impl Default for GlobePrefab {
    fn default() -> Self {
        Self::new(GLOBE_RADIUS)
    }
}
