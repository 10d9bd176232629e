/// Geographic coordinate in degrees.
///
/// Latitude is expected in `[-90, 90]` and longitude in `[-180, 180]`; values
/// outside those ranges are carried as-is.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Sum of the absolute latitude and longitude deltas, in degrees.
    ///
    /// This is not a great-circle distance: it ignores longitude convergence
    /// towards the poles and the antimeridian seam.
    pub fn manhattan_deg(self, other: GeoPoint) -> f64 {
        (self.latitude - other.latitude).abs() + (self.longitude - other.longitude).abs()
    }

    /// True when both deltas are strictly below `tolerance_deg`.
    pub fn within(self, other: GeoPoint, tolerance_deg: f64) -> bool {
        (self.latitude - other.latitude).abs() < tolerance_deg
            && (self.longitude - other.longitude).abs() < tolerance_deg
    }
}
