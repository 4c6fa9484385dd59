//! Core traits for pointmark

use crate::{mesh::*, point::*, transform::Transform3D};

/// Trait for drawable/renderable objects
pub trait Drawable {
    /// Get the axis-aligned bounding box of the object as `(min, max)`
    fn bounding_box(&self) -> (Point3d, Point3d);

    /// Get the center point of the object
    fn center(&self) -> Point3d {
        let (min, max) = self.bounding_box();
        nalgebra::center(&min, &max)
    }
}

/// Trait for objects that can be transformed
pub trait Transformable {
    /// Apply a transformation to the object
    fn transform(&mut self, transform: &Transform3D);
}

impl Drawable for TriangleMesh {
    fn bounding_box(&self) -> (Point3d, Point3d) {
        if self.vertices.is_empty() {
            return (Point3d::origin(), Point3d::origin());
        }

        let mut min = self.vertices[0];
        let mut max = self.vertices[0];

        for vertex in &self.vertices {
            min = min.inf(vertex);
            max = max.sup(vertex);
        }

        (min, max)
    }
}

impl Transformable for TriangleMesh {
    fn transform(&mut self, transform: &Transform3D) {
        for vertex in &mut self.vertices {
            *vertex = transform.transform_point(vertex);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    #[test]
    fn test_mesh_bounding_box_and_center() {
        let mesh = TriangleMesh::from_vertices_and_faces(
            vec![
                Point3d::new(-1.0, 0.0, 2.0),
                Point3d::new(3.0, 4.0, 2.0),
                Point3d::new(1.0, -2.0, 6.0),
            ],
            vec![[0, 1, 2]],
        );
        let (min, max) = mesh.bounding_box();
        assert_relative_eq!(min, Point3d::new(-1.0, -2.0, 2.0));
        assert_relative_eq!(max, Point3d::new(3.0, 4.0, 6.0));
        assert_relative_eq!(mesh.center(), Point3d::new(1.0, 1.0, 4.0));
    }

    #[test]
    fn test_empty_mesh_bounds_at_origin() {
        let (min, max) = TriangleMesh::new().bounding_box();
        assert_eq!(min, Point3d::origin());
        assert_eq!(max, Point3d::origin());
    }

    #[test]
    fn test_transform_moves_vertices() {
        let mut mesh = TriangleMesh::quad(2.0, 2.0);
        mesh.transform(&Transform3D::translation(Vector3::new(0.0, 0.0, 5.0)));
        assert!(mesh.vertices.iter().all(|v| v.z == 5.0));
    }
}
