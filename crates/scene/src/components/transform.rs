use foundation::math::Vec3;

/// Position, orientation basis and scale of a placed primitive.
///
/// The basis follows the object convention of the renderer: local +Z points
/// at the look-at target.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub right: Vec3,
    pub up: Vec3,
    pub forward: Vec3,
    pub scale: Vec3,
}

impl Transform {
    pub fn identity() -> Self {
        Self::translate(Vec3::ZERO)
    }

    pub fn translate(position: Vec3) -> Self {
        Self {
            position,
            right: Vec3::new(1.0, 0.0, 0.0),
            up: Vec3::new(0.0, 1.0, 0.0),
            forward: Vec3::new(0.0, 0.0, 1.0),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }

    /// Places the primitive at `position` with local +Z aimed at `target`.
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        let mut forward = (target - position).normalize();
        if forward == Vec3::ZERO {
            return Self::translate(position);
        }

        let mut right = Vec3::Y.cross(forward);
        if right.length() < 1e-10 {
            // Forward is parallel to world up (a pole); nudge it off-axis.
            forward.x += 1e-4;
            forward = forward.normalize();
            right = Vec3::Y.cross(forward);
        }
        let right = right.normalize();
        let up = forward.cross(right);

        Self {
            position,
            right,
            up,
            forward,
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Maps a point from local space into world space.
    pub fn apply(&self, local: Vec3) -> Vec3 {
        self.position
            + self.right * (local.x * self.scale.x)
            + self.up * (local.y * self.scale.y)
            + self.forward * (local.z * self.scale.z)
    }
}

#[cfg(test)]
mod tests {
    use super::Transform;
    use foundation::math::Vec3;

    fn assert_vec_close(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-9, "expected {a:?} ~= {b:?}");
    }

    #[test]
    fn identity_is_origin() {
        let transform = Transform::identity();
        assert_eq!(transform.position, Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(transform.apply(Vec3::new(1.0, 2.0, 3.0)), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn looking_at_center_points_forward_inwards() {
        let t = Transform::looking_at(Vec3::new(200.0, 0.0, 0.0), Vec3::ZERO);
        assert_vec_close(t.forward, Vec3::new(-1.0, 0.0, 0.0));
        assert!(t.right.dot(t.forward).abs() < 1e-12);
        assert!(t.up.dot(t.forward).abs() < 1e-12);
        assert_vec_close(t.apply(Vec3::new(0.0, 0.0, 1.0)), Vec3::new(199.0, 0.0, 0.0));
    }

    #[test]
    fn looking_at_from_pole_stays_orthonormal() {
        let t = Transform::looking_at(Vec3::new(0.0, 200.0, 0.0), Vec3::ZERO);
        assert!((t.right.length() - 1.0).abs() < 1e-9);
        assert!((t.up.length() - 1.0).abs() < 1e-9);
        assert!(t.right.dot(t.up).abs() < 1e-9);
        assert!(t.forward.y < -0.999);
    }
}
