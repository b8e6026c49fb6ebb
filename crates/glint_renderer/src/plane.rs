//! Infinite plane primitive.

use glint_math::{Hit, Ray, Vec2, Vec3};

use crate::object::Primitive;

const EPSILON: f32 = 1e-6;

/// An infinite plane defined by a point on the plane and its unit normal.
#[derive(Debug, Clone, Copy)]
pub struct Plane {
    point: Vec3,
    normal: Vec3,
}

impl Plane {
    /// Create a new plane; the normal is normalized on construction.
    pub fn new(point: Vec3, normal: Vec3) -> Self {
        Self {
            point,
            normal: normal.normalize_or_zero(),
        }
    }
}

impl Primitive for Plane {
    fn intersect(&self, ray: &Ray) -> Hit {
        let denom = self.normal.dot(ray.direction());
        if denom.abs() < EPSILON {
            return Hit::NO_HIT;
        }

        let t = (self.point - ray.origin()).dot(self.normal) / denom;
        if t <= 0.0 {
            return Hit::NO_HIT;
        }

        Hit::new(t, self.normal)
    }

    /// Planar mapping along an orthonormal tangent basis; textures tile
    /// once per world unit.
    fn texture_coords(&self, p: Vec3) -> Vec2 {
        let (tangent, bitangent) = self.normal.any_orthonormal_pair();
        let d = p - self.point;
        Vec2::new(d.dot(tangent), d.dot(bitangent))
    }
}
