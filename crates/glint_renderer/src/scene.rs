//! Scene container and the recursive trace/render core.
//!
//! The scene owns the objects, lights, and camera eye; it is mutated only
//! during ingestion and read-only while rendering, so pixel rows can be
//! filled in parallel without synchronization.

use glint_math::{Ray, Vec3};
use rayon::prelude::*;

use crate::image_buffer::ImageBuffer;
use crate::material::{Color, Light};
use crate::object::Object;

/// Offset applied to secondary (shadow/reflection) ray origins so they do
/// not immediately re-intersect the surface they start on.
const RAY_EPSILON: f32 = 1e-3;

/// A renderable scene.
#[derive(Default)]
pub struct Scene {
    objects: Vec<Object>,
    lights: Vec<Light>,
    eye: Vec3,
    shadows: bool,
    max_recursion_depth: u32,
    super_sampling_factor: u32,
}

impl Scene {
    /// Create an empty scene with shading defaults: shadows off, no
    /// reflection bounces, no super-sampling.
    pub fn new() -> Self {
        Self {
            super_sampling_factor: 1,
            ..Default::default()
        }
    }

    pub fn add_object(&mut self, object: Object) {
        self.objects.push(object);
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    pub fn set_eye(&mut self, eye: Vec3) {
        self.eye = eye;
    }

    pub fn set_shadows(&mut self, shadows: bool) {
        self.shadows = shadows;
    }

    pub fn set_max_recursion_depth(&mut self, depth: u32) {
        self.max_recursion_depth = depth;
    }

    pub fn set_super_sampling_factor(&mut self, factor: u32) {
        self.super_sampling_factor = factor.max(1);
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn light_count(&self) -> usize {
        self.lights.len()
    }

    /// Find the nearest intersection along the ray.
    ///
    /// Strict `<` on t means the first-inserted object wins when two
    /// surfaces are exactly coincident.
    fn nearest_hit(&self, ray: &Ray) -> Option<(usize, glint_math::Hit)> {
        let mut nearest = glint_math::Hit::NO_HIT;
        let mut nearest_idx = None;

        for (idx, object) in self.objects.iter().enumerate() {
            let hit = object.intersect(ray);
            if hit.t < nearest.t {
                nearest = hit;
                nearest_idx = Some(idx);
            }
        }

        nearest_idx.map(|idx| (idx, nearest))
    }

    /// Whether anything blocks the path from `point` toward a light at
    /// distance `light_distance` along unit direction `dir`, excluding the
    /// object the point lies on.
    fn in_shadow(&self, point: Vec3, dir: Vec3, light_distance: f32, skip: usize) -> bool {
        let shadow_ray = Ray::new(point + dir * RAY_EPSILON, dir);
        for (idx, object) in self.objects.iter().enumerate() {
            if idx == skip {
                continue;
            }
            if object.intersect(&shadow_ray).t < light_distance {
                return true;
            }
        }
        false
    }

    /// Trace a ray into the scene and return its color.
    ///
    /// Phong shading with hard shadows and one mirror-reflection branch per
    /// bounce; `remaining_depth == 0` skips the reflection branch. The
    /// result is not clamped here - clamping happens once per pixel after
    /// the sub-samples are averaged.
    pub fn trace(&self, ray: &Ray, remaining_depth: u32) -> Color {
        // No hit: background is black
        let Some((idx, hit)) = self.nearest_hit(ray) else {
            return Color::ZERO;
        };

        let object = &self.objects[idx];
        let material = &object.material;

        let point = ray.at(hit.t);
        let normal = hit.normal;
        let view = -ray.direction();

        let surface = object.surface_color(point);
        let ambient = surface * material.ka;

        let mut reflection = Color::ZERO;
        if remaining_depth > 0 {
            let dir = reflect(view, normal);
            let bounced = Ray::new(point + dir * RAY_EPSILON, dir);
            reflection = self.trace(&bounced, remaining_depth - 1) * material.ks;
        }

        let mut diffuse = Color::ZERO;
        let mut specular = Color::ZERO;
        for light in &self.lights {
            let to_light = light.position - point;
            let distance = to_light.length();
            if distance <= RAY_EPSILON {
                continue;
            }
            let l = to_light / distance;

            // A blocked light contributes neither diffuse nor specular
            if self.shadows && self.in_shadow(point, l, distance, idx) {
                continue;
            }

            diffuse += l.dot(normal).max(0.0) * light.color;
            let reflected_light = reflect(l, normal);
            specular += reflected_light
                .dot(view)
                .max(0.0)
                .powf(material.shininess)
                * light.color;
        }

        ambient + diffuse * surface * material.kd + specular * material.ks + reflection
    }

    /// Render the scene into the image, one eye ray bundle per pixel.
    ///
    /// Pixel rows are independent, so they are distributed over rayon's
    /// thread pool; each pixel cell is written exactly once.
    pub fn render(&self, img: &mut ImageBuffer) {
        let width = img.width() as usize;
        let height = img.height();

        img.pixels_mut()
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| {
                // Image rows count down from the top; scene space counts up
                let scene_y = height - 1 - y as u32;
                for (x, pixel) in row.iter_mut().enumerate() {
                    *pixel = self.render_pixel(x as u32, scene_y);
                }
            });
    }

    /// Average an n x n grid of sub-pixel samples, then clamp.
    fn render_pixel(&self, x: u32, scene_y: u32) -> Color {
        let n = self.super_sampling_factor.max(1);
        let step = 1.0 / n as f32;

        let mut accumulated = Color::ZERO;
        for i in 0..n {
            for j in 0..n {
                let sx = x as f32 + (i as f32 + 0.5) * step;
                let sy = scene_y as f32 + (j as f32 + 0.5) * step;
                let through = Vec3::new(sx, sy, 0.0);
                let ray = Ray::new(self.eye, (through - self.eye).normalize());
                accumulated += self.trace(&ray, self.max_recursion_depth);
            }
        }

        (accumulated / (n * n) as f32).clamp(Vec3::ZERO, Vec3::ONE)
    }
}

/// Reflect a vector about a normal: `2 (v . n) n - v`.
///
/// `v` points away from the surface; so does the result.
#[inline]
fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    2.0 * v.dot(n) * n - v
}
