use foundation::math::Vec3;
use scene::PointCloud;
use scene::components::Drawable3D;
use scene::prefabs::GlobePrefab;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera3D {
    pub position: Vec3,
    pub target: Vec3,
    pub fov_y_rad: f64,
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
}

impl Camera3D {
    pub fn look_at(position: Vec3, target: Vec3, fov_y_rad: f64, near: f64, far: f64) -> Self {
        Self {
            position,
            target,
            fov_y_rad,
            aspect: 1.0,
            near,
            far,
        }
    }

    pub fn with_aspect(mut self, aspect: f64) -> Self {
        self.aspect = aspect;
        self
    }

    pub fn distance(&self) -> f64 {
        (self.position - self.target).length()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand<'a> {
    /// Earth or atmosphere sphere.
    Shell(Drawable3D),
    /// Marker cloud with one influence per morph slot (empty when static).
    Points {
        cloud: &'a PointCloud,
        influences: &'a [f64],
    },
}

/// Scene graph handed to a [`Renderer`] once per tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderFrame<'a> {
    pub commands: Vec<RenderCommand<'a>>,
}

impl<'a> RenderFrame<'a> {
    /// Earth first, then the points, then the atmosphere glow.
    pub fn globe(
        globe: &GlobePrefab,
        cloud: Option<&'a PointCloud>,
        influences: &'a [f64],
    ) -> Self {
        let mut commands = Vec::with_capacity(3);
        commands.push(RenderCommand::Shell(globe.earth));
        if let Some(cloud) = cloud {
            commands.push(RenderCommand::Points { cloud, influences });
        }
        commands.push(RenderCommand::Shell(globe.atmosphere));
        Self { commands }
    }

    pub fn points(&self) -> Option<(&'a PointCloud, &'a [f64])> {
        self.commands.iter().find_map(|c| match c {
            RenderCommand::Points { cloud, influences } => Some((*cloud, *influences)),
            RenderCommand::Shell(_) => None,
        })
    }
}

/// Turns a scene graph and a camera into pixels.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame<'_>, camera: &Camera3D);
}

/// What a [`RecordingRenderer`] kept from one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedFrame {
    pub shells: Vec<Drawable3D>,
    pub markers: usize,
    pub influences: Vec<f64>,
    pub camera: Camera3D,
}

/// Headless [`Renderer`] that keeps a summary of the last frame.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    frames: u64,
    last: Option<RenderedFrame>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    pub fn last(&self) -> Option<&RenderedFrame> {
        self.last.as_ref()
    }
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, frame: &RenderFrame<'_>, camera: &Camera3D) {
        let shells = frame
            .commands
            .iter()
            .filter_map(|c| match c {
                RenderCommand::Shell(d) => Some(*d),
                RenderCommand::Points { .. } => None,
            })
            .collect();
        let (markers, influences) = frame
            .points()
            .map_or((0, Vec::new()), |(cloud, w)| (cloud.base().marker_count(), w.to_vec()));

        self.frames += 1;
        self.last = Some(RenderedFrame {
            shells,
            markers,
            influences,
            camera: *camera,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use foundation::color::Rgb;
    use scene::components::Material;
    use scene::{PointGeometry, components::Transform};

    fn camera() -> Camera3D {
        Camera3D::look_at(Vec3::new(0.0, 0.0, 1000.0), Vec3::ZERO, 30f64.to_radians(), 1.0, 10_000.0)
    }

    #[test]
    fn globe_frame_orders_earth_points_atmosphere() {
        let globe = GlobePrefab::default();
        let mut geometry = PointGeometry::new();
        geometry.push_marker(&Transform::identity(), Rgb::WHITE);
        let cloud = PointCloud::new_static(geometry);

        let frame = RenderFrame::globe(&globe, Some(&cloud), &[]);
        assert!(matches!(
            frame.commands.as_slice(),
            [
                RenderCommand::Shell(Drawable3D { material: Material::Earth { .. }, .. }),
                RenderCommand::Points { .. },
                RenderCommand::Shell(Drawable3D { material: Material::Atmosphere { .. }, .. }),
            ]
        ));
    }

    #[test]
    fn recording_renderer_keeps_last_frame() {
        let globe = GlobePrefab::default();
        let influences = [1.0, 0.0];
        let mut renderer = RecordingRenderer::new();

        renderer.render(&RenderFrame::globe(&globe, None, &influences), &camera());
        let last = renderer.last().unwrap();
        assert_eq!(last.shells.len(), 2);
        assert_eq!(last.markers, 0);
        assert!(last.influences.is_empty());
        assert_eq!(last.camera.distance(), 1000.0);
        assert_eq!(renderer.frame_count(), 1);
    }
}
