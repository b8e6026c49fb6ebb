//! Wavefront OBJ mesh loading.
//!
//! Parses the line-oriented OBJ subset used by the renderer (`v`, `vn`,
//! `vt`, `f`) into a flat, interleaved sequence of per-triangle vertex
//! records. Faces with more than three corners are fan-triangulated from
//! the first corner.

use std::fs;
use std::path::Path;

use glint_math::{Vec2, Vec3};
use thiserror::Error;

/// Errors that can occur while loading a mesh file.
#[derive(Error, Debug)]
pub enum MeshError {
    #[error("could not open mesh file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed mesh data at line {line}: {message}")]
    Malformed { line: usize, message: String },
}

/// Result type for mesh loading.
pub type MeshResult<T> = Result<T, MeshError>;

/// One interleaved vertex record: position, normal, texture coordinate.
///
/// The normal is zero when the face carried no normal index, and the
/// texture coordinate is (0, 0) when the file has no `vt` records.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
}

/// A triangulated mesh: three [`Vertex`] records per triangle, ready to be
/// wrapped as renderer triangles (or uploaded as a vertex buffer).
#[derive(Debug, Clone, Default)]
pub struct ObjMesh {
    vertices: Vec<Vertex>,
    has_tex_coords: bool,
}

impl ObjMesh {
    /// Load a mesh from an OBJ file on disk.
    pub fn from_file<P: AsRef<Path>>(path: P) -> MeshResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let mesh = Self::from_str(&content)?;
        log::debug!(
            "loaded mesh {} ({} triangles)",
            path.display(),
            mesh.triangle_count()
        );
        Ok(mesh)
    }

    /// Parse a mesh from OBJ text.
    ///
    /// Lines starting with `#` are comments; unrecognized record types are
    /// silently ignored; malformed numeric tokens fail the load.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> MeshResult<Self> {
        let mut parser = Parser::default();
        for (idx, line) in content.lines().enumerate() {
            parser.parse_line(line, idx + 1)?;
        }
        Ok(ObjMesh {
            vertices: parser.vertices,
            has_tex_coords: parser.has_tex_coords,
        })
    }

    /// The interleaved vertex records, three per triangle.
    pub fn vertex_data(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Number of triangles after face expansion.
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Whether the source file carried `vt` records.
    pub fn has_tex_coords(&self) -> bool {
        self.has_tex_coords
    }

    /// Recenter and uniformly rescale the mesh so its largest axis-aligned
    /// extent spans the unit cube (max extent == 2.0).
    ///
    /// The scale factor is computed over the full expanded vertex set,
    /// duplicates included, so it matches what the renderer actually sees.
    pub fn unitize(&mut self) {
        let Some((min, max)) = self.bounds() else {
            return;
        };

        let extent = max - min;
        let largest = extent.x.max(extent.y).max(extent.z);
        if largest <= 0.0 {
            return;
        }

        let center = (min + max) * 0.5;
        let scale = 2.0 / largest;
        for vertex in &mut self.vertices {
            vertex.position = (vertex.position - center) * scale;
        }
    }

    /// Axis-aligned bounds of the vertex positions, or None for an empty mesh.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = self.vertices.first()?.position;
        let mut min = first;
        let mut max = first;
        for vertex in &self.vertices {
            min = min.min(vertex.position);
            max = max.max(vertex.position);
        }
        Some((min, max))
    }
}

/// Index-space state accumulated while walking the file line by line.
#[derive(Default)]
struct Parser {
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    tex_coords: Vec<Vec2>,
    vertices: Vec<Vertex>,
    has_tex_coords: bool,
}

impl Parser {
    fn parse_line(&mut self, line: &str, line_num: usize) -> MeshResult<()> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(());
        }

        let mut tokens = trimmed.split_whitespace();
        match tokens.next() {
            Some("v") => {
                let p = parse_vec3(&mut tokens, line_num)?;
                self.positions.push(p);
            }
            Some("vn") => {
                let n = parse_vec3(&mut tokens, line_num)?;
                self.normals.push(n);
            }
            Some("vt") => {
                self.has_tex_coords = true;
                let u = parse_float(tokens.next(), line_num)?;
                let v = parse_float(tokens.next(), line_num)?;
                self.tex_coords.push(Vec2::new(u, v));
            }
            Some("f") => {
                self.parse_face(tokens, line_num)?;
            }
            // Other record types (g, o, s, mtllib, ...) are ignored
            _ => {}
        }
        Ok(())
    }

    fn parse_face<'a>(
        &mut self,
        tokens: impl Iterator<Item = &'a str>,
        line_num: usize,
    ) -> MeshResult<()> {
        let mut corners = Vec::new();
        for token in tokens {
            corners.push(self.parse_corner(token, line_num)?);
        }
        if corners.len() < 3 {
            return Err(MeshError::Malformed {
                line: line_num,
                message: format!("face with {} corners", corners.len()),
            });
        }

        // Fan triangulation from the first corner
        for k in 2..corners.len() {
            self.vertices.push(corners[0]);
            self.vertices.push(corners[k - 1]);
            self.vertices.push(corners[k]);
        }
        Ok(())
    }

    /// Parse one face corner: `i`, `i/t`, `i//n` or `i/t/n` (1-based).
    fn parse_corner(&self, token: &str, line_num: usize) -> MeshResult<Vertex> {
        let mut elements = token.split('/');

        let position = self.lookup(&self.positions, elements.next(), line_num, "vertex")?;
        let uv = match elements.next() {
            Some("") | None => Vec2::ZERO,
            tex => self.lookup(&self.tex_coords, tex, line_num, "texture coordinate")?,
        };
        let normal = match elements.next() {
            Some("") | None => Vec3::ZERO,
            norm => self.lookup(&self.normals, norm, line_num, "normal")?,
        };

        Ok(Vertex {
            position,
            normal,
            uv,
        })
    }

    fn lookup<T: Copy>(
        &self,
        pool: &[T],
        token: Option<&str>,
        line_num: usize,
        what: &str,
    ) -> MeshResult<T> {
        let token = token.ok_or_else(|| MeshError::Malformed {
            line: line_num,
            message: format!("missing {what} index"),
        })?;
        let index: usize = token.parse().map_err(|_| MeshError::Malformed {
            line: line_num,
            message: format!("invalid {what} index '{token}'"),
        })?;
        // OBJ indices count from 1
        index
            .checked_sub(1)
            .and_then(|i| pool.get(i))
            .copied()
            .ok_or_else(|| MeshError::Malformed {
                line: line_num,
                message: format!("{what} index {index} out of range"),
            })
    }
}

fn parse_vec3<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    line_num: usize,
) -> MeshResult<Vec3> {
    let x = parse_float(tokens.next(), line_num)?;
    let y = parse_float(tokens.next(), line_num)?;
    let z = parse_float(tokens.next(), line_num)?;
    Ok(Vec3::new(x, y, z))
}

fn parse_float(token: Option<&str>, line_num: usize) -> MeshResult<f32> {
    let token = token.ok_or_else(|| MeshError::Malformed {
        line: line_num,
        message: "missing numeric token".to_string(),
    })?;
    token.parse().map_err(|_| MeshError::Malformed {
        line: line_num,
        message: format!("invalid numeric token '{token}'"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUAD: &str = "\
# a unit quad in the XY plane
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vn 0 0 1
f 1//1 2//1 3//1 4//1
";

    #[test]
    fn test_parse_triangle_positions() {
        let mesh = ObjMesh::from_str("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();
        assert_eq!(mesh.triangle_count(), 1);
        assert!(!mesh.has_tex_coords());

        let verts = mesh.vertex_data();
        assert_eq!(verts[0].position, Vec3::ZERO);
        assert_eq!(verts[1].position, Vec3::X);
        assert_eq!(verts[2].position, Vec3::Y);
        // No vt records: uv defaults to (0, 0)
        assert_eq!(verts[0].uv, Vec2::ZERO);
    }

    #[test]
    fn test_fan_triangulation() {
        let mesh = ObjMesh::from_str(QUAD).unwrap();
        assert_eq!(mesh.triangle_count(), 2);

        let verts = mesh.vertex_data();
        // Fan from corner 0: (0,1,2) then (0,2,3)
        assert_eq!(verts[3].position, Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(verts[4].position, Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(verts[5].position, Vec3::new(0.0, 1.0, 0.0));
        for v in verts {
            assert_eq!(v.normal, Vec3::Z);
        }
    }

    #[test]
    fn test_tex_coords_interleaved() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nvt 1 0\nvt 0 1\nf 1/1 2/2 3/3\n";
        let mesh = ObjMesh::from_str(src).unwrap();
        assert!(mesh.has_tex_coords());
        assert_eq!(mesh.vertex_data()[1].uv, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_comments_and_unknown_records_ignored() {
        let src = "# comment\no cube\ns off\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
        let mesh = ObjMesh::from_str(src).unwrap();
        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn test_malformed_numeric_token_fails() {
        let err = ObjMesh::from_str("v 0 zero 0\n").unwrap_err();
        match err {
            MeshError::Malformed { line, .. } => assert_eq!(line, 1),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_out_of_range_index_fails() {
        assert!(ObjMesh::from_str("v 0 0 0\nf 1 2 3\n").is_err());
    }

    #[test]
    fn test_unitize_max_extent_is_two() {
        let src = "v 0 0 0\nv 4 0 0\nv 0 2 0\nf 1 2 3\n";
        let mut mesh = ObjMesh::from_str(src).unwrap();
        mesh.unitize();

        let (min, max) = mesh.bounds().unwrap();
        let extent = max - min;
        let largest = extent.x.max(extent.y).max(extent.z);
        assert!((largest - 2.0).abs() < 1e-5);
        // Recentered on the bounding-box center
        assert!((min.x + max.x).abs() < 1e-5);
        assert!((min.y + max.y).abs() < 1e-5);
    }

    #[test]
    fn test_unitize_preserves_aspect_ratio() {
        let src = "v 0 0 0\nv 4 0 0\nv 0 2 0\nf 1 2 3\n";
        let mut mesh = ObjMesh::from_str(src).unwrap();
        mesh.unitize();

        let (min, max) = mesh.bounds().unwrap();
        let extent = max - min;
        // x:y was 2:1 and must stay 2:1
        assert!((extent.x - 2.0 * extent.y).abs() < 1e-5);
    }
}
