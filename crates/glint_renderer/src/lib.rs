//! Glint Renderer - recursive CPU ray tracing.
//!
//! A Whitted-style ray tracer with Phong shading: hard shadows, bounded
//! mirror reflection, and grid super-sampling for anti-aliasing.

mod image_buffer;
mod material;
mod object;
mod plane;
mod raytracer;
mod scene;
mod sphere;
mod triangle;

pub use image_buffer::ImageBuffer;
pub use material::{Color, Light, Material, SurfaceColor};
pub use object::{Object, Primitive};
pub use plane::Plane;
pub use raytracer::{render_scene_file, Raytracer, RenderError};
pub use scene::Scene;
pub use sphere::Sphere;
pub use triangle::Triangle;

/// Re-export math types from glint_math
pub use glint_math::{Hit, Ray, Vec2, Vec3};
