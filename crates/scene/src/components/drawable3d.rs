use foundation::color::Rgb;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Shape3D {
    Sphere {
        radius: f64,
        width_segments: u32,
        height_segments: u32,
    },
}

/// Shading applied to a globe shell.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Material {
    /// Textured earth with a rim tint of `atmosphere`.
    Earth { atmosphere: Rgb },
    /// Additive back-face glow of `color`.
    Atmosphere { color: Rgb },
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Drawable3D {
    pub shape: Shape3D,
    pub material: Material,
    pub scale: f64,
    /// Rotation around +Y in radians.
    pub rotation_y: f64,
}

impl Drawable3D {
    pub fn sphere(radius: f64, material: Material) -> Self {
        Self {
            shape: Shape3D::Sphere {
                radius,
                width_segments: 40,
                height_segments: 30,
            },
            material,
            scale: 1.0,
            rotation_y: 0.0,
        }
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_rotation_y(mut self, rotation_y: f64) -> Self {
        self.rotation_y = rotation_y;
        self
    }

    pub fn set_tint(&mut self, color: Rgb) {
        match &mut self.material {
            Material::Earth { atmosphere } => *atmosphere = color,
            Material::Atmosphere { color: c } => *c = color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Drawable3D, Material, Shape3D};
    use foundation::color::Rgb;

    #[test]
    fn create_sphere_drawable() {
        let drawable = Drawable3D::sphere(1.5, Material::Atmosphere { color: Rgb::WHITE });
        assert!(matches!(drawable.shape, Shape3D::Sphere { .. }));
        assert_eq!(drawable.scale, 1.0);
    }

    #[test]
    fn tint_updates_either_material() {
        let red = Rgb::new(1.0, 0.0, 0.0);
        let mut earth = Drawable3D::sphere(1.0, Material::Earth { atmosphere: Rgb::WHITE });
        earth.set_tint(red);
        assert_eq!(earth.material, Material::Earth { atmosphere: red });

        let mut glow = Drawable3D::sphere(1.0, Material::Atmosphere { color: Rgb::WHITE });
        glow.set_tint(red);
        assert_eq!(glow.material, Material::Atmosphere { color: red });
    }
}
