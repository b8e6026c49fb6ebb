//! Glint Core - asset ingestion for the ray tracer.
//!
//! This crate provides:
//!
//! - **Mesh loading**: Wavefront OBJ parsing into interleaved vertex records
//! - **Scene descriptions**: JSON scene-file records
//! - **Textures**: image decoding and UV sampling

pub mod mesh;
pub mod scene_file;
pub mod texture;

// Re-export commonly used types
pub use mesh::{MeshError, ObjMesh, Vertex};
pub use scene_file::{
    LightRecord, MaterialRecord, MeshRecord, ObjectRecord, SceneFile, SceneFileError,
};
pub use texture::{Texture, TextureError};
