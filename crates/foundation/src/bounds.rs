/// Axis-aligned bounding box in screen pixels (`min` is the top-left corner).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb2 {
    pub min: [f64; 2],
    pub max: [f64; 2],
}

impl Aabb2 {
    pub fn new(min: [f64; 2], max: [f64; 2]) -> Self {
        Aabb2 { min, max }
    }

    pub fn from_origin_size(origin: [f64; 2], size: [f64; 2]) -> Self {
        Aabb2::new(origin, [origin[0] + size[0], origin[1] + size[1]])
    }

    pub fn width(&self) -> f64 {
        self.max[0] - self.min[0]
    }

    pub fn height(&self) -> f64 {
        self.max[1] - self.min[1]
    }

    /// Overlap test that counts touching edges as overlapping.
    pub fn intersects(&self, other: &Aabb2) -> bool {
        self.min[0] <= other.max[0]
            && self.max[0] >= other.min[0]
            && self.min[1] <= other.max[1]
            && self.max[1] >= other.min[1]
    }
}

#[cfg(test)]
mod tests {
    use super::Aabb2;

    #[test]
    fn touching_edges_intersect() {
        let a = Aabb2::from_origin_size([0.0, 0.0], [10.0, 10.0]);
        let b = Aabb2::from_origin_size([10.0, 0.0], [5.0, 5.0]);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn disjoint_boxes_do_not_intersect() {
        let a = Aabb2::from_origin_size([0.0, 0.0], [10.0, 10.0]);
        let b = Aabb2::from_origin_size([0.0, 10.5], [10.0, 10.0]);
        assert!(!a.intersects(&b));
        assert_eq!(b.width(), 10.0);
        assert_eq!(b.height(), 10.0);
    }
}
