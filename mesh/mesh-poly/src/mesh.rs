//! Polygon mesh buffers.

use crate::{Aabb, Face, MeshError, MeshResult};
use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A vertex buffer plus a face buffer of triangles and quads.
///
/// This is the hand-off format for renderers and exporters: positions are
/// stored in generation order and faces index into them.
///
/// # Winding Order
///
/// Faces use **counter-clockwise (CCW) winding** when viewed from outside.
/// For a closed mesh [`PolyMesh::signed_volume`] is then positive.
///
/// # Example
///
/// ```
/// use mesh_poly::{Face, PolyMesh, Point3};
///
/// let mut mesh = PolyMesh::new();
/// mesh.vertices.push(Point3::new(0.0, 0.0, 0.0));
/// mesh.vertices.push(Point3::new(1.0, 0.0, 0.0));
/// mesh.vertices.push(Point3::new(1.0, 1.0, 0.0));
/// mesh.vertices.push(Point3::new(0.0, 1.0, 0.0));
/// mesh.faces.push(Face::Quad([0, 1, 2, 3]));
///
/// assert!(mesh.validate().is_ok());
/// assert_eq!(mesh.triangulate().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PolyMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3<f64>>,

    /// Faces as indices into `vertices`.
    pub faces: Vec<Face>,
}

impl PolyMesh {
    /// Create a new empty mesh.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Create a mesh with pre-allocated capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            faces: Vec::with_capacity(face_count),
        }
    }

    /// Create a mesh from vertices and faces.
    #[inline]
    #[must_use]
    pub const fn from_parts(vertices: Vec<Point3<f64>>, faces: Vec<Face>) -> Self {
        Self { vertices, faces }
    }

    /// Number of vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of faces of either arity.
    #[inline]
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Number of quad faces.
    #[must_use]
    pub fn quad_count(&self) -> usize {
        self.faces.iter().filter(|f| f.is_quad()).count()
    }

    /// Number of triangle faces.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.face_count() - self.quad_count()
    }

    /// Check if the mesh has no geometry.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }

    /// Check that every face index is in range and no face repeats a vertex.
    ///
    /// # Errors
    ///
    /// Returns the first problem found, in face order.
    pub fn validate(&self) -> MeshResult<()> {
        let vertex_count = self.vertices.len();
        for (face_idx, face) in self.faces.iter().enumerate() {
            if let Some(&index) = face
                .indices()
                .iter()
                .find(|&&i| i as usize >= vertex_count)
            {
                return Err(MeshError::IndexOutOfRange {
                    face: face_idx,
                    index,
                    vertex_count,
                });
            }
            if face.has_repeated_vertex() {
                return Err(MeshError::DegenerateFace { face: face_idx });
            }
        }
        Ok(())
    }

    /// Split every face into triangles, preserving winding.
    #[must_use]
    pub fn triangulate(&self) -> Vec<[u32; 3]> {
        let mut tris = Vec::with_capacity(self.faces.len() * 2);
        for face in &self.faces {
            tris.extend(face.triangles());
        }
        tris
    }

    /// Signed volume enclosed by the mesh.
    ///
    /// Sums the signed tetrahedra formed by each triangle and the origin.
    /// Positive for a closed mesh with outward-facing winding, negative when
    /// inside-out, meaningless for open meshes.
    ///
    /// Assumes [`PolyMesh::validate`] passes.
    #[must_use]
    pub fn signed_volume(&self) -> f64 {
        let volume: f64 = self
            .triangulate()
            .iter()
            .map(|&[a, b, c]| {
                let v0 = self.vertices[a as usize].coords;
                let v1 = self.vertices[b as usize].coords;
                let v2 = self.vertices[c as usize].coords;
                v0.dot(&v1.cross(&v2))
            })
            .sum();
        volume / 6.0
    }

    /// Total surface area.
    ///
    /// Assumes [`PolyMesh::validate`] passes.
    #[must_use]
    pub fn surface_area(&self) -> f64 {
        self.triangulate()
            .iter()
            .map(|&[a, b, c]| {
                let v0 = self.vertices[a as usize];
                let e1 = self.vertices[b as usize] - v0;
                let e2 = self.vertices[c as usize] - v0;
                e1.cross(&e2).norm() * 0.5
            })
            .sum()
    }

    /// Bounds of the vertex buffer.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(self.vertices.iter())
    }

    /// Translate every vertex.
    pub fn translate(&mut self, offset: Vector3<f64>) {
        for vertex in &mut self.vertices {
            *vertex += offset;
        }
    }

    /// Append another mesh, shifting its face indices past this mesh's
    /// vertices.
    ///
    /// This places several meshes in one scene; shared space is not merged.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::TooManyVertices`] if the combined vertex buffer
    /// cannot be addressed with `u32` indices.
    pub fn merge(&mut self, other: &Self) -> MeshResult<()> {
        let combined = self.vertices.len() + other.vertices.len();
        if u32::try_from(combined).is_err() {
            return Err(MeshError::TooManyVertices { count: combined });
        }
        #[allow(clippy::cast_possible_truncation)]
        let offset = self.vertices.len() as u32;

        self.vertices.extend_from_slice(&other.vertices);
        self.faces.extend(other.faces.iter().map(|f| f.offset(offset)));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Axis-aligned unit cube built from outward-wound quads.
    fn quad_cube() -> PolyMesh {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(0.0, 1.0, 1.0),
        ];
        let faces = vec![
            Face::Quad([0, 3, 2, 1]), // bottom
            Face::Quad([4, 5, 6, 7]), // top
            Face::Quad([0, 1, 5, 4]), // front
            Face::Quad([1, 2, 6, 5]), // right
            Face::Quad([2, 3, 7, 6]), // back
            Face::Quad([3, 0, 4, 7]), // left
        ];
        PolyMesh::from_parts(vertices, faces)
    }

    #[test]
    fn cube_is_valid_and_counts() {
        let cube = quad_cube();
        assert!(cube.validate().is_ok());
        assert_eq!(cube.vertex_count(), 8);
        assert_eq!(cube.face_count(), 6);
        assert_eq!(cube.quad_count(), 6);
        assert_eq!(cube.triangle_count(), 0);
        assert_eq!(cube.triangulate().len(), 12);
    }

    #[test]
    fn cube_volume_and_area() {
        let cube = quad_cube();
        assert_relative_eq!(cube.signed_volume(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(cube.surface_area(), 6.0, epsilon = 1e-12);
    }

    #[test]
    fn inside_out_volume_is_negative() {
        let mut cube = quad_cube();
        cube.faces = cube.faces.iter().map(Face::reversed).collect();
        assert_relative_eq!(cube.signed_volume(), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn validate_reports_out_of_range() {
        let mut cube = quad_cube();
        cube.faces.push(Face::Tri([0, 1, 8]));
        assert_eq!(
            cube.validate(),
            Err(MeshError::IndexOutOfRange {
                face: 6,
                index: 8,
                vertex_count: 8
            })
        );
    }

    #[test]
    fn validate_reports_degenerate() {
        let mut cube = quad_cube();
        cube.faces.insert(0, Face::Tri([2, 2, 3]));
        assert_eq!(cube.validate(), Err(MeshError::DegenerateFace { face: 0 }));
    }

    #[test]
    fn merge_offsets_indices() {
        let mut scene = quad_cube();
        let mut other = quad_cube();
        other.translate(Vector3::new(3.0, 0.0, 0.0));
        scene.merge(&other).unwrap();

        assert_eq!(scene.vertex_count(), 16);
        assert_eq!(scene.face_count(), 12);
        assert_eq!(scene.faces[6], Face::Quad([8, 11, 10, 9]));
        assert!(scene.validate().is_ok());
        assert_relative_eq!(scene.signed_volume(), 2.0, epsilon = 1e-12);
        assert_relative_eq!(scene.bounds().max.x, 4.0);
    }

    #[test]
    fn empty_mesh() {
        let mesh = PolyMesh::new();
        assert!(mesh.is_empty());
        assert!(mesh.validate().is_ok());
        assert!(mesh.bounds().is_empty());
    }
}
