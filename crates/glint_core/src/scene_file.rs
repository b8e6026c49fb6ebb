//! Scene description records.
//!
//! A scene file is a JSON document naming the camera eye, the lights, the
//! primitive objects, and any mesh instances. Deserialization is fail-fast:
//! a missing required field or an unknown object type aborts the load and
//! no partial scene is produced.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur while reading a scene description.
#[derive(Error, Debug)]
pub enum SceneFileError {
    #[error("could not open scene file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed scene description: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for scene-file operations.
pub type SceneFileResult<T> = Result<T, SceneFileError>;

/// Top-level scene description.
#[derive(Debug, Clone, Deserialize)]
pub struct SceneFile {
    /// Camera eye position
    #[serde(rename = "Eye")]
    pub eye: [f32; 3],

    /// Whether shadow rays are cast (default off)
    #[serde(rename = "Shadows", default)]
    pub shadows: bool,

    /// Reflection recursion limit (default 0 = local shading only)
    #[serde(rename = "MaxRecursionDepth", default)]
    pub max_recursion_depth: u32,

    /// Super-sampling grid factor per pixel axis (default 1 = off)
    #[serde(rename = "SuperSamplingFactor", default = "default_super_sampling")]
    pub super_sampling_factor: u32,

    #[serde(rename = "Lights", default)]
    pub lights: Vec<LightRecord>,

    #[serde(rename = "Objects", default)]
    pub objects: Vec<ObjectRecord>,

    #[serde(rename = "Meshes", default)]
    pub meshes: Vec<MeshRecord>,
}

fn default_super_sampling() -> u32 {
    1
}

impl SceneFile {
    /// Read and parse a scene description from disk.
    pub fn from_file<P: AsRef<Path>>(path: P) -> SceneFileResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parse a scene description from a JSON string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> SceneFileResult<Self> {
        let scene: SceneFile = serde_json::from_str(content)?;
        log::debug!(
            "parsed scene description: {} lights, {} objects, {} meshes",
            scene.lights.len(),
            scene.objects.len(),
            scene.meshes.len()
        );
        Ok(scene)
    }
}

/// A point light: position plus color/intensity (channels may exceed 1).
#[derive(Debug, Clone, Deserialize)]
pub struct LightRecord {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

/// A primitive object, tagged by its `type` field.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ObjectRecord {
    Sphere {
        position: [f32; 3],
        radius: f32,
        material: MaterialRecord,
    },
    Triangle {
        vertices: [[f32; 3]; 3],
        material: MaterialRecord,
    },
    Plane {
        point: [f32; 3],
        normal: [f32; 3],
        material: MaterialRecord,
    },
}

/// Phong material parameters with either a base color or a texture path.
///
/// Exactly one of `color` / `texture` must be present; that rule is
/// enforced at ingestion, where the texture can actually be resolved.
#[derive(Debug, Clone, Deserialize)]
pub struct MaterialRecord {
    #[serde(default)]
    pub color: Option<[f32; 3]>,

    /// Texture image path, relative to the scene file
    #[serde(default)]
    pub texture: Option<String>,

    /// Ambient coefficient
    pub ka: f32,
    /// Diffuse coefficient
    pub kd: f32,
    /// Specular coefficient
    pub ks: f32,
    /// Shininess exponent
    pub n: f32,
}

/// A mesh instance: model path plus placement and material.
#[derive(Debug, Clone, Deserialize)]
pub struct MeshRecord {
    /// Path to the OBJ model, relative to the scene file
    pub model: String,

    #[serde(default)]
    pub translation: [f32; 3],

    #[serde(default = "default_scale")]
    pub scale: f32,

    /// Recenter/rescale the model to the unit cube before placing it, so
    /// `scale` means the same thing regardless of how the model was authored
    #[serde(default)]
    pub unitize: bool,

    pub material: MaterialRecord,
}

fn default_scale() -> f32 {
    1.0
}
