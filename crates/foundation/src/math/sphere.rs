use super::{GeoPoint, Vec3};

/// Radius of the rendered globe, in scene units.
pub const GLOBE_RADIUS: f64 = 200.0;

/// Spherical-to-Cartesian conversion matching the globe texture layout.
///
/// `phi = 90° - lat` is measured from the +Y pole and `theta = 180° - lon` is
/// mirrored so that the texture seam sits at the antimeridian.
pub fn project(lat_deg: f64, lon_deg: f64, radius: f64) -> Vec3 {
    let phi = (90.0 - lat_deg).to_radians();
    let theta = (180.0 - lon_deg).to_radians();

    Vec3::new(
        radius * phi.sin() * theta.cos(),
        radius * phi.cos(),
        radius * phi.sin() * theta.sin(),
    )
}

pub fn project_geo(point: GeoPoint, radius: f64) -> Vec3 {
    project(point.latitude, point.longitude, radius)
}
