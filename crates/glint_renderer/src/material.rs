//! Phong materials and point lights.

use std::sync::Arc;

use glint_core::Texture;
use glint_math::Vec3;

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// Where a material takes its base color from: a constant color or a
/// texture image sampled at the hit point's texture coordinates.
#[derive(Clone, Debug)]
pub enum SurfaceColor {
    Solid(Color),
    Textured(Arc<Texture>),
}

/// Phong material: ambient/diffuse/specular coefficients plus a shininess
/// exponent. The coefficients conventionally sum near 1 but that is not
/// enforced.
#[derive(Clone, Debug)]
pub struct Material {
    pub surface: SurfaceColor,
    /// Ambient coefficient
    pub ka: f32,
    /// Diffuse coefficient
    pub kd: f32,
    /// Specular coefficient (also scales the mirror reflection)
    pub ks: f32,
    /// Specular highlight exponent
    pub shininess: f32,
}

impl Material {
    /// Create a material with a constant base color.
    pub fn solid(color: Color, ka: f32, kd: f32, ks: f32, shininess: f32) -> Self {
        Self {
            surface: SurfaceColor::Solid(color),
            ka,
            kd,
            ks,
            shininess,
        }
    }

    /// Create a material that samples its base color from a texture.
    pub fn textured(texture: Arc<Texture>, ka: f32, kd: f32, ks: f32, shininess: f32) -> Self {
        Self {
            surface: SurfaceColor::Textured(texture),
            ka,
            kd,
            ks,
            shininess,
        }
    }
}

/// A point light with a position and a color/intensity. Channels may exceed
/// 1.0 to model bright sources.
#[derive(Clone, Copy, Debug)]
pub struct Light {
    pub position: Vec3,
    pub color: Color,
}

impl Light {
    pub fn new(position: Vec3, color: Color) -> Self {
        Self { position, color }
    }
}
