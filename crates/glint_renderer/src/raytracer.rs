//! Scene ingestion and the render entry point.
//!
//! Builds a [`Scene`] from scene-description records: camera eye, lights,
//! primitive objects, and mesh instances expanded into per-triangle
//! objects. Ingestion is fail-fast; in particular a mesh that cannot be
//! loaded aborts the whole scene rather than silently rendering without it.

use std::path::Path;
use std::sync::Arc;

use glint_core::{
    MaterialRecord, MeshError, ObjMesh, ObjectRecord, SceneFile, SceneFileError, Texture,
    TextureError,
};
use glint_math::Vec3;
use thiserror::Error;

use crate::image_buffer::ImageBuffer;
use crate::material::{Light, Material};
use crate::object::Object;
use crate::plane::Plane;
use crate::scene::Scene;
use crate::sphere::Sphere;
use crate::triangle::Triangle;

/// Errors that can occur while ingesting or rendering a scene.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("scene description error: {0}")]
    SceneFile(#[from] SceneFileError),

    #[error("mesh error: {0}")]
    Mesh(#[from] MeshError),

    #[error("texture error: {0}")]
    Texture(#[from] TextureError),

    #[error("material must have exactly one of 'color' or 'texture'")]
    AmbiguousMaterial,

    #[error("could not write output image: {0}")]
    Output(#[from] image::ImageError),
}

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// A scene plus the machinery to build it from description records.
pub struct Raytracer {
    scene: Scene,
}

impl Raytracer {
    /// Read a scene description file and build the scene from it.
    ///
    /// Relative mesh and texture paths resolve against the scene file's
    /// directory.
    pub fn from_file<P: AsRef<Path>>(path: P) -> RenderResult<Self> {
        let path = path.as_ref();
        let records = SceneFile::from_file(path)?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        Self::from_records(&records, base_dir)
    }

    /// Build the scene from already-parsed description records.
    pub fn from_records(records: &SceneFile, base_dir: &Path) -> RenderResult<Self> {
        let mut scene = Scene::new();
        scene.set_eye(Vec3::from(records.eye));
        scene.set_shadows(records.shadows);
        scene.set_max_recursion_depth(records.max_recursion_depth);
        scene.set_super_sampling_factor(records.super_sampling_factor);

        for light in &records.lights {
            scene.add_light(Light::new(
                Vec3::from(light.position),
                Vec3::from(light.color),
            ));
        }

        for mesh in &records.meshes {
            add_mesh_instance(&mut scene, mesh, base_dir)?;
        }

        for object in &records.objects {
            scene.add_object(build_object(object, base_dir)?);
        }

        log::info!(
            "scene ready: {} objects, {} lights",
            scene.object_count(),
            scene.light_count()
        );
        Ok(Self { scene })
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Render at the given resolution and write the result as a PNG.
    pub fn render_to_file<P: AsRef<Path>>(
        &self,
        width: u32,
        height: u32,
        path: P,
    ) -> RenderResult<()> {
        let mut img = ImageBuffer::new(width, height);
        log::info!("tracing {width}x{height}...");
        self.scene.render(&mut img);
        log::info!("writing image to {}", path.as_ref().display());
        img.write_png(path)?;
        Ok(())
    }
}

/// Load a scene description, render it, and write the output image.
///
/// This is the one-call entry point; see [`Raytracer`] for the staged API.
pub fn render_scene_file<P, Q>(scene_path: P, width: u32, height: u32, out_path: Q) -> RenderResult<()>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    Raytracer::from_file(scene_path)?.render_to_file(width, height, out_path)
}

/// Expand one mesh instance into per-triangle objects.
fn add_mesh_instance(
    scene: &mut Scene,
    record: &glint_core::MeshRecord,
    base_dir: &Path,
) -> RenderResult<()> {
    let mut mesh = ObjMesh::from_file(base_dir.join(&record.model))?;
    if record.unitize {
        mesh.unitize();
    }

    let material = build_material(&record.material, base_dir)?;
    let translation = Vec3::from(record.translation);

    for corners in mesh.vertex_data().chunks_exact(3) {
        let [a, b, c] = [
            corners[0].position * record.scale + translation,
            corners[1].position * record.scale + translation,
            corners[2].position * record.scale + translation,
        ];
        scene.add_object(Object::new(Triangle::new(a, b, c), material.clone()));
    }

    log::debug!(
        "expanded mesh {} into {} triangles",
        record.model,
        mesh.triangle_count()
    );
    Ok(())
}

/// Build one primitive object from its description record.
fn build_object(record: &ObjectRecord, base_dir: &Path) -> RenderResult<Object> {
    Ok(match record {
        ObjectRecord::Sphere {
            position,
            radius,
            material,
        } => Object::new(
            Sphere::new(Vec3::from(*position), *radius),
            build_material(material, base_dir)?,
        ),
        ObjectRecord::Triangle { vertices, material } => Object::new(
            Triangle::new(
                Vec3::from(vertices[0]),
                Vec3::from(vertices[1]),
                Vec3::from(vertices[2]),
            ),
            build_material(material, base_dir)?,
        ),
        ObjectRecord::Plane {
            point,
            normal,
            material,
        } => Object::new(
            Plane::new(Vec3::from(*point), Vec3::from(*normal)),
            build_material(material, base_dir)?,
        ),
    })
}

/// Resolve a material record: a constant color or a texture, never both.
fn build_material(record: &MaterialRecord, base_dir: &Path) -> RenderResult<Material> {
    match (&record.color, &record.texture) {
        (Some(color), None) => Ok(Material::solid(
            Vec3::from(*color),
            record.ka,
            record.kd,
            record.ks,
            record.n,
        )),
        (None, Some(path)) => {
            let texture = Texture::from_file(base_dir.join(path))?;
            Ok(Material::textured(
                Arc::new(texture),
                record.ka,
                record.kd,
                record.ks,
                record.n,
            ))
        }
        _ => Err(RenderError::AmbiguousMaterial),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPHERE_SCENE: &str = r#"{
        "Eye": [0.5, 0.5, 10.0],
        "Shadows": false,
        "Lights": [{ "position": [0.5, 8.0, 5.0], "color": [1.0, 1.0, 1.0] }],
        "Objects": [{
            "type": "sphere",
            "position": [0.5, 0.5, -5.0],
            "radius": 1.0,
            "material": { "color": [1.0, 1.0, 1.0], "ka": 0.1, "kd": 0.9, "ks": 0.0, "n": 1.0 }
        }]
    }"#;

    #[test]
    fn test_ingest_primitives() {
        let records = SceneFile::from_str(SPHERE_SCENE).unwrap();
        let raytracer = Raytracer::from_records(&records, Path::new(".")).unwrap();
        assert_eq!(raytracer.scene().object_count(), 1);
        assert_eq!(raytracer.scene().light_count(), 1);
    }

    #[test]
    fn test_material_with_color_and_texture_rejected() {
        let record = MaterialRecord {
            color: Some([1.0, 0.0, 0.0]),
            texture: Some("checker.png".to_string()),
            ka: 0.1,
            kd: 0.9,
            ks: 0.0,
            n: 1.0,
        };
        assert!(matches!(
            build_material(&record, Path::new(".")),
            Err(RenderError::AmbiguousMaterial)
        ));
    }

    #[test]
    fn test_material_with_neither_color_nor_texture_rejected() {
        let record = MaterialRecord {
            color: None,
            texture: None,
            ka: 0.1,
            kd: 0.9,
            ks: 0.0,
            n: 1.0,
        };
        assert!(build_material(&record, Path::new(".")).is_err());
    }

    #[test]
    fn test_mesh_instance_expands_into_triangles() {
        let dir = std::env::temp_dir().join("glint_mesh_expand_test");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("quad.obj"),
            "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n",
        )
        .unwrap();

        let scene_json = r#"{
            "Eye": [0, 0, 10],
            "Meshes": [{
                "model": "quad.obj",
                "translation": [0, 0, -5],
                "scale": 2.0,
                "material": { "color": [1, 1, 1], "ka": 1.0, "kd": 0.0, "ks": 0.0, "n": 1 }
            }]
        }"#;
        let records = SceneFile::from_str(scene_json).unwrap();
        let raytracer = Raytracer::from_records(&records, &dir).unwrap();

        // One quad fan-triangulates into two triangles
        assert_eq!(raytracer.scene().object_count(), 2);

        // The scaled + translated quad spans x,y in [0, 2] at z = -5
        let ray = glint_math::Ray::new(
            Vec3::new(1.0, 1.0, 10.0),
            Vec3::new(0.0, 0.0, -1.0),
        );
        assert_eq!(raytracer.scene().trace(&ray, 0), Vec3::ONE);
    }

    #[test]
    fn test_missing_mesh_aborts_ingestion() {
        let scene_json = r#"{
            "Eye": [0, 0, 10],
            "Meshes": [{
                "model": "does_not_exist.obj",
                "material": { "color": [1, 1, 1], "ka": 1.0, "kd": 0.0, "ks": 0.0, "n": 1 }
            }]
        }"#;
        let records = SceneFile::from_str(scene_json).unwrap();
        assert!(matches!(
            Raytracer::from_records(&records, Path::new("/nonexistent")),
            Err(RenderError::Mesh(_))
        ));
    }

    #[test]
    fn test_render_to_file_writes_png() {
        let records = SceneFile::from_str(SPHERE_SCENE).unwrap();
        let raytracer = Raytracer::from_records(&records, Path::new(".")).unwrap();

        let out = std::env::temp_dir().join("glint_render_test.png");
        raytracer.render_to_file(8, 8, &out).unwrap();

        let decoded = image::open(&out).unwrap();
        assert_eq!(decoded.width(), 8);
        assert_eq!(decoded.height(), 8);
        std::fs::remove_file(&out).ok();
    }
}
