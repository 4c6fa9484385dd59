//! Mesh data structures and functionality

use crate::point::*;
use serde::{Deserialize, Serialize};

/// A triangle mesh with vertices and faces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriangleMesh {
    pub vertices: Vec<Point3d>,
    pub faces: Vec<[usize; 3]>,
}

impl TriangleMesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Create a mesh from vertices and faces
    pub fn from_vertices_and_faces(vertices: Vec<Point3d>, faces: Vec<[usize; 3]>) -> Self {
        Self { vertices, faces }
    }

    /// A `width` x `height` quad centered on the origin in the XY plane,
    /// facing +Z.
    pub fn quad(width: f64, height: f64) -> Self {
        let hw = width / 2.0;
        let hh = height / 2.0;
        Self::from_vertices_and_faces(
            vec![
                Point3d::new(-hw, -hh, 0.0),
                Point3d::new(hw, -hh, 0.0),
                Point3d::new(hw, hh, 0.0),
                Point3d::new(-hw, hh, 0.0),
            ],
            vec![[0, 1, 2], [0, 2, 3]],
        )
    }

    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of faces
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check if the mesh is empty
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }

    /// Add a vertex to the mesh
    pub fn add_vertex(&mut self, vertex: Point3d) -> usize {
        let index = self.vertices.len();
        self.vertices.push(vertex);
        index
    }

    /// Add a face to the mesh
    pub fn add_face(&mut self, face: [usize; 3]) {
        self.faces.push(face);
    }

    /// Corner positions of every face whose indices are in range
    pub fn triangles(&self) -> impl Iterator<Item = [Point3d; 3]> + '_ {
        self.faces.iter().filter_map(move |face| {
            let a = self.vertices.get(face[0])?;
            let b = self.vertices.get(face[1])?;
            let c = self.vertices.get(face[2])?;
            Some([*a, *b, *c])
        })
    }

    /// Validate that every face references existing vertices
    pub fn validate(&self) -> crate::Result<()> {
        let count = self.vertices.len();
        if let Some(face) = self.faces.iter().find(|f| f.iter().any(|&i| i >= count)) {
            return Err(crate::Error::InvalidData(format!(
                "Face {:?} references a vertex outside 0..{}",
                face, count
            )));
        }
        Ok(())
    }
}

impl Default for TriangleMesh {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quad_lies_in_xy_plane() {
        let quad = TriangleMesh::quad(4.0, 2.0);
        assert_eq!(quad.vertex_count(), 4);
        assert_eq!(quad.face_count(), 2);
        assert!(quad.vertices.iter().all(|v| v.z == 0.0));
        assert!(quad.vertices.iter().all(|v| v.y.abs() == 1.0));
        assert!(quad.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_dangling_index() {
        let mesh = TriangleMesh::from_vertices_and_faces(
            vec![Point3d::origin(), Point3d::new(1.0, 0.0, 0.0)],
            vec![[0, 1, 2]],
        );
        assert!(mesh.validate().is_err());
        assert_eq!(mesh.triangles().count(), 0);
    }
}
