use crate::Vec3;

/// Record of a ray/surface intersection: distance along the ray and the
/// surface normal at the hit point.
///
/// A miss is represented by [`Hit::NO_HIT`], whose `t` is positive
/// infinity, so nearest-hit scans can compare `t` values unconditionally.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Hit {
    /// Distance along the ray where the intersection occurs
    pub t: f32,
    /// Surface normal at the hit point (unit length for real hits)
    pub normal: Vec3,
}

impl Hit {
    /// Sentinel for "the ray hit nothing".
    pub const NO_HIT: Hit = Hit {
        t: f32::INFINITY,
        normal: Vec3::ZERO,
    };

    /// Create a new hit record.
    pub fn new(t: f32, normal: Vec3) -> Self {
        Self { t, normal }
    }

    /// Returns true if this record represents an actual intersection.
    pub fn is_hit(&self) -> bool {
        self.t.is_finite()
    }
}
