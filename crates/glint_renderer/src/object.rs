//! Primitive trait and the material-carrying scene object.

use glint_math::{Hit, Ray, Vec2, Vec3};

use crate::material::{Color, Material, SurfaceColor};

/// Trait for geometry that rays can intersect.
///
/// Implementations return [`Hit::NO_HIT`] for misses, hits behind the ray
/// origin, and all geometric degeneracies; no NaN may escape into a hit
/// record that the shader consumes.
pub trait Primitive: Send + Sync {
    /// Intersect a ray with this primitive.
    fn intersect(&self, ray: &Ray) -> Hit;

    /// Texture coordinates for a point on the primitive's surface.
    fn texture_coords(&self, p: Vec3) -> Vec2;
}

/// A scene object: one primitive plus its material.
///
/// Objects are created during ingestion and immutable afterwards, so the
/// renderer can read them concurrently without synchronization.
pub struct Object {
    primitive: Box<dyn Primitive>,
    pub material: Material,
}

impl Object {
    /// Create a new object from a primitive and its material.
    pub fn new(primitive: impl Primitive + 'static, material: Material) -> Self {
        Self {
            primitive: Box::new(primitive),
            material,
        }
    }

    /// Intersect a ray with the object's primitive.
    pub fn intersect(&self, ray: &Ray) -> Hit {
        self.primitive.intersect(ray)
    }

    /// The material's base color at a surface point: the constant color,
    /// or the texture sampled at the primitive's texture coordinates.
    pub fn surface_color(&self, p: Vec3) -> Color {
        match &self.material.surface {
            SurfaceColor::Solid(color) => *color,
            SurfaceColor::Textured(texture) => {
                let uv = self.primitive.texture_coords(p);
                texture.sample(uv.x, uv.y)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sphere::Sphere;
    use glint_core::Texture;
    use std::sync::Arc;

    #[test]
    fn test_solid_surface_color_ignores_point() {
        let object = Object::new(
            Sphere::new(Vec3::ZERO, 1.0),
            Material::solid(Color::new(0.2, 0.4, 0.6), 1.0, 0.0, 0.0, 1.0),
        );
        assert_eq!(object.surface_color(Vec3::X), Color::new(0.2, 0.4, 0.6));
        assert_eq!(object.surface_color(Vec3::Y), Color::new(0.2, 0.4, 0.6));
    }

    #[test]
    fn test_textured_surface_color_samples_texture() {
        let texture = Arc::new(Texture::solid_color(Vec3::new(0.9, 0.1, 0.1)));
        let object = Object::new(
            Sphere::new(Vec3::ZERO, 1.0),
            Material::textured(texture, 1.0, 0.0, 0.0, 1.0),
        );
        let color = object.surface_color(Vec3::Z);
        assert!((color.x - 0.9).abs() < 1e-5);
        assert!((color.y - 0.1).abs() < 1e-5);
    }
}
