//! Triangle primitive.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.

use glint_math::{Hit, Ray, Vec2, Vec3};

use crate::object::Primitive;

const EPSILON: f32 = 1e-8;

/// A triangle with a precomputed flat normal.
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
    /// Unit face normal; zero when the vertices are colinear, in which
    /// case the parallel-ray rejection below guarantees a miss.
    normal: Vec3,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        let normal = (v1 - v0).cross(v2 - v0).normalize_or_zero();
        Self { v0, v1, v2, normal }
    }

    /// The triangle's unit face normal.
    pub fn normal(&self) -> Vec3 {
        self.normal
    }
}

impl Primitive for Triangle {
    /// Möller-Trumbore ray-triangle intersection.
    fn intersect(&self, ray: &Ray) -> Hit {
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;

        let h = ray.direction().cross(edge2);
        let a = edge1.dot(h);

        // Ray parallel to the triangle plane (covers degenerate triangles)
        if a.abs() < EPSILON {
            return Hit::NO_HIT;
        }

        let f = 1.0 / a;
        let s = ray.origin() - self.v0;
        let u = f * s.dot(h);
        if !(0.0..=1.0).contains(&u) {
            return Hit::NO_HIT;
        }

        let q = s.cross(edge1);
        let v = f * ray.direction().dot(q);
        if v < 0.0 || u + v > 1.0 {
            return Hit::NO_HIT;
        }

        let t = f * edge2.dot(q);
        if t <= EPSILON {
            return Hit::NO_HIT;
        }

        Hit::new(t, self.normal)
    }

    /// Triangles carry no intrinsic parameterization; textured materials
    /// on raw triangles sample at the texture origin.
    fn texture_coords(&self, _p: Vec3) -> Vec2 {
        Vec2::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_triangle() -> Triangle {
        Triangle::new(
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(1.0, -1.0, -1.0),
            Vec3::new(0.0, 1.0, -1.0),
        )
    }

    #[test]
    fn test_ray_through_centroid_hits() {
        let tri = unit_triangle();
        let centroid = Vec3::new(0.0, -1.0 / 3.0, -1.0);

        // Fire along the negative normal from an offset start point
        let origin = centroid + tri.normal() * 3.0;
        let ray = Ray::new(origin, -tri.normal());

        let hit = tri.intersect(&ray);
        assert!(hit.is_hit());
        assert!((hit.t - 3.0).abs() < 1e-4);
        assert!((ray.at(hit.t) - centroid).length() < 1e-4);
    }

    #[test]
    fn test_ray_outside_misses() {
        let tri = unit_triangle();
        let ray = Ray::new(Vec3::new(5.0, 5.0, 0.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(!tri.intersect(&ray).is_hit());
    }

    #[test]
    fn test_parallel_ray_misses() {
        let tri = unit_triangle();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 0.0), Vec3::X);
        assert!(!tri.intersect(&ray).is_hit());
    }

    #[test]
    fn test_hit_behind_origin_rejected() {
        let tri = unit_triangle();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0));
        assert!(!tri.intersect(&ray).is_hit());
    }

    #[test]
    fn test_degenerate_triangle_never_hits() {
        // Colinear vertices: zero cross product
        let tri = Triangle::new(Vec3::ZERO, Vec3::X, Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(tri.normal(), Vec3::ZERO);

        let ray = Ray::new(Vec3::new(0.5, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = tri.intersect(&ray);
        assert!(!hit.is_hit());
        assert!(!hit.t.is_nan());
    }

    #[test]
    fn test_flat_normal_is_unit_length() {
        let tri = unit_triangle();
        assert!((tri.normal().length() - 1.0).abs() < 1e-5);
    }
}
