use foundation::color::Rgb;
use foundation::math::{GeoPoint, Vec3, project_geo};

use crate::components::Transform;

/// Frame slots the renderer interpolates over; animated clouds are padded to
/// this count.
pub const MORPH_SLOTS: usize = 8;

pub const PADDING_PREFIX: &str = "morphPadding";

/// Box corners of a marker before placement: 0.75 x 0.75 x 1, shifted so it
/// spans `z ∈ [-1, 0]` and grows away from the globe once oriented.
const MARKER_CORNERS: [Vec3; 8] = [
    Vec3::new(-0.375, -0.375, -1.0),
    Vec3::new(0.375, -0.375, -1.0),
    Vec3::new(0.375, 0.375, -1.0),
    Vec3::new(-0.375, 0.375, -1.0),
    Vec3::new(-0.375, -0.375, 0.0),
    Vec3::new(0.375, -0.375, 0.0),
    Vec3::new(0.375, 0.375, 0.0),
    Vec3::new(-0.375, 0.375, 0.0),
];

const MARKER_TRIANGLES: [[u32; 3]; 12] = [
    [0, 2, 1],
    [0, 3, 2],
    [4, 5, 6],
    [4, 6, 7],
    [0, 1, 5],
    [0, 5, 4],
    [1, 2, 6],
    [1, 6, 5],
    [2, 3, 7],
    [2, 7, 6],
    [3, 0, 4],
    [3, 4, 7],
];

pub const VERTICES_PER_MARKER: usize = MARKER_CORNERS.len();

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MarkerStyle {
    /// Scale applied to the box footprint (local X and Y).
    pub footprint: f64,
    /// Height of the marker along the surface normal.
    pub size: f64,
    /// Lower bound on the height so the transform stays invertible.
    pub min_thickness: f64,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            footprint: 3.0,
            size: 0.0,
            min_thickness: 0.1,
        }
    }
}

/// Orients a marker at `point` on a sphere of `radius`, facing the center.
pub fn marker_transform(point: GeoPoint, radius: f64, style: MarkerStyle) -> Transform {
    let position = project_geo(point, radius);
    Transform::looking_at(position, Vec3::ZERO).with_scale(Vec3::new(
        style.footprint,
        style.footprint,
        style.size.max(style.min_thickness),
    ))
}

/// Merged marker boxes with one color per marker.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointGeometry {
    pub vertices: Vec<Vec3>,
    pub triangles: Vec<[u32; 3]>,
    pub colors: Vec<Rgb>,
}

impl PointGeometry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(markers: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(markers * VERTICES_PER_MARKER),
            triangles: Vec::with_capacity(markers * MARKER_TRIANGLES.len()),
            colors: Vec::with_capacity(markers),
        }
    }

    /// Appends the marker box placed by `transform`.
    pub fn push_marker(&mut self, transform: &Transform, color: Rgb) {
        let offset = self.vertices.len() as u32;
        self.vertices
            .extend(MARKER_CORNERS.iter().map(|c| transform.apply(*c)));
        self.triangles.extend(
            MARKER_TRIANGLES
                .iter()
                .map(|[a, b, c]| [a + offset, b + offset, c + offset]),
        );
        self.colors.push(color);
    }

    pub fn marker_count(&self) -> usize {
        self.colors.len()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }
}

/// Index-aligned alternate vertex set blended against the base geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct MorphFrame {
    pub name: String,
    pub vertices: Vec<Vec3>,
    padding: bool,
}

impl MorphFrame {
    pub fn new(name: impl Into<String>, vertices: Vec<Vec3>) -> Self {
        Self {
            name: name.into(),
            vertices,
            padding: false,
        }
    }

    fn padding(index: usize, vertices: Vec<Vec3>) -> Self {
        Self {
            name: format!("{PADDING_PREFIX}{index}"),
            vertices,
            padding: true,
        }
    }

    pub fn is_padding(&self) -> bool {
        self.padding
    }
}

/// Base geometry plus its morph frames, ready to hand to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct PointCloud {
    base: PointGeometry,
    frames: Vec<MorphFrame>,
    animated: bool,
}

impl PointCloud {
    pub fn new_static(base: PointGeometry) -> Self {
        Self {
            base,
            frames: Vec::new(),
            animated: false,
        }
    }

    /// Builds an animated cloud, padding `frames` with copies of the base
    /// vertices until every slot is filled.
    ///
    /// Callers guarantee that every frame has the base vertex count.
    pub fn new_animated(base: PointGeometry, mut frames: Vec<MorphFrame>) -> Self {
        debug_assert!(frames.iter().all(|f| f.vertices.len() == base.vertex_count()));
        let mut pad = 0;
        while frames.len() < MORPH_SLOTS {
            frames.push(MorphFrame::padding(pad, base.vertices.clone()));
            pad += 1;
        }
        Self {
            base,
            frames,
            animated: true,
        }
    }

    pub fn base(&self) -> &PointGeometry {
        &self.base
    }

    /// All frame slots, real frames first in insertion order.
    pub fn frames(&self) -> &[MorphFrame] {
        &self.frames
    }

    pub fn is_animated(&self) -> bool {
        self.animated
    }

    pub fn real_frame_count(&self) -> usize {
        self.frames.iter().filter(|f| !f.is_padding()).count()
    }

    pub fn frame_index(&self, name: &str) -> Option<usize> {
        self.frames.iter().position(|f| f.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_sits_on_the_sphere_and_grows_outward() {
        let t = marker_transform(GeoPoint::new(0.0, 0.0), 200.0, MarkerStyle::default());
        let mut geom = PointGeometry::new();
        geom.push_marker(&t, Rgb::WHITE);

        assert_eq!(geom.vertex_count(), VERTICES_PER_MARKER);
        assert_eq!(geom.triangles.len(), 12);
        for v in &geom.vertices[4..] {
            // z = 0 corners stay on the tangent plane at radius 200.
            assert!((v.dot(t.forward) + 200.0).abs() < 1e-9);
        }
        for v in &geom.vertices[..4] {
            // z = -1 corners are pushed out by the minimum thickness.
            assert!((v.dot(t.forward) + 200.1).abs() < 1e-9);
        }
    }

    #[test]
    fn triangle_indices_are_offset_per_marker() {
        let t = marker_transform(GeoPoint::new(10.0, 20.0), 200.0, MarkerStyle::default());
        let mut geom = PointGeometry::with_capacity(2);
        geom.push_marker(&t, Rgb::WHITE);
        geom.push_marker(&t, Rgb::WHITE);
        assert_eq!(geom.marker_count(), 2);
        assert_eq!(geom.triangles[12], [8, 10, 9]);
        assert!(geom.triangles.iter().flatten().all(|i| (*i as usize) < 16));
    }

    #[test]
    fn animated_cloud_is_padded_to_slot_count() {
        let mut base = PointGeometry::new();
        base.push_marker(&Transform::identity(), Rgb::WHITE);
        let frames = vec![
            MorphFrame::new("a", base.vertices.clone()),
            MorphFrame::new("b", base.vertices.clone()),
        ];
        let cloud = PointCloud::new_animated(base, frames);

        assert_eq!(cloud.frames().len(), MORPH_SLOTS);
        assert_eq!(cloud.real_frame_count(), 2);
        assert_eq!(cloud.frame_index("b"), Some(1));
        assert_eq!(cloud.frames()[2].name, "morphPadding0");
        assert!(cloud.frames()[2..].iter().all(MorphFrame::is_padding));
        assert!(
            cloud
                .frames()
                .iter()
                .all(|f| f.vertices.len() == cloud.base().vertex_count())
        );
    }

    #[test]
    fn static_cloud_has_no_frames() {
        let cloud = PointCloud::new_static(PointGeometry::new());
        assert!(!cloud.is_animated());
        assert!(cloud.frames().is_empty());
    }
}
