//! Sphere primitive.

use std::f32::consts::PI;

use glint_math::{Hit, Ray, Vec2, Vec3};

use crate::object::Primitive;

/// A sphere defined by its center and radius.
#[derive(Debug, Clone, Copy)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
        }
    }
}

impl Primitive for Sphere {
    fn intersect(&self, ray: &Ray) -> Hit {
        let oc = ray.origin() - self.center;
        let a = ray.direction().length_squared();
        let b = 2.0 * ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let Some((t0, t1)) = solve_quadratic(a, b, c) else {
            return Hit::NO_HIT;
        };

        // Smallest strictly positive root; a hit exactly at the origin is
        // rejected to avoid self-intersection.
        let t = if t0 > 0.0 {
            t0
        } else if t1 > 0.0 {
            t1
        } else {
            return Hit::NO_HIT;
        };

        let normal = (ray.at(t) - self.center).normalize();
        Hit::new(t, normal)
    }

    /// Spherical mapping: longitude to u, latitude to v.
    fn texture_coords(&self, p: Vec3) -> Vec2 {
        let n = (self.center - p).normalize_or_zero();
        Vec2::new(
            0.5 + n.z.atan2(n.x) / (2.0 * PI),
            0.5 - n.y.clamp(-1.0, 1.0).asin() / PI,
        )
    }
}

/// Solve `a t^2 + b t + c = 0`, returning the roots ordered `t0 <= t1`.
///
/// Uses the cancellation-safe form: the root sharing b's sign comes from
/// the quadratic formula, the other from `c / q`.
fn solve_quadratic(a: f32, b: f32, c: f32) -> Option<(f32, f32)> {
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    let q = -0.5 * (b + b.signum() * discriminant.sqrt());
    if q == 0.0 {
        // b == 0 and discriminant == 0: double root at t = 0
        return Some((0.0, 0.0));
    }

    let (t0, t1) = (q / a, c / q);
    Some(if t0 <= t1 { (t0, t1) } else { (t1, t0) })
}
