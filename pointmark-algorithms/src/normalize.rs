//! Fitting freshly loaded geometry into the default view volume

use pointmark_core::{Drawable, Point3d, Transform3D};

/// Largest dimension of a normalized model, in world units
pub const DEFAULT_NORMALIZED_EXTENT: f64 = 3.0;

/// Transform that moves the center of `bounds` to the origin and scales
/// uniformly so the largest dimension becomes `target_extent`.
///
/// Degenerate bounds (zero size) are only centered.
pub fn normalization_transform(bounds: (Point3d, Point3d), target_extent: f64) -> Transform3D {
    let (min, max) = bounds;
    let center = nalgebra::center(&min, &max);
    let size = max - min;
    let max_dim = size.x.max(size.y).max(size.z);

    let scale = if max_dim > 0.0 && max_dim.is_finite() {
        target_extent / max_dim
    } else {
        1.0
    };

    Transform3D::uniform_scaling(scale) * Transform3D::translation(-center.coords)
}

/// Normalization for any drawable object
pub fn normalize_drawable<D: Drawable + ?Sized>(object: &D, target_extent: f64) -> Transform3D {
    normalization_transform(object.bounding_box(), target_extent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pointmark_core::TriangleMesh;

    #[test]
    fn test_normalization_centers_and_scales() {
        let bounds = (Point3d::new(10.0, 0.0, 0.0), Point3d::new(16.0, 2.0, 1.0));
        let t = normalization_transform(bounds, DEFAULT_NORMALIZED_EXTENT);

        let center = t.transform_point(&Point3d::new(13.0, 1.0, 0.5));
        assert_relative_eq!(center, Point3d::origin(), epsilon = 1e-12);
        let (min, max) = (t.transform_point(&bounds.0), t.transform_point(&bounds.1));
        assert_relative_eq!(min, Point3d::new(-1.5, -0.5, -0.25), epsilon = 1e-12);
        assert_relative_eq!(max, Point3d::new(1.5, 0.5, 0.25), epsilon = 1e-12);
    }

    #[test]
    fn test_degenerate_bounds_only_centered() {
        let p = Point3d::new(2.0, 3.0, 4.0);
        let t = normalization_transform((p, p), DEFAULT_NORMALIZED_EXTENT);
        assert_relative_eq!(t.transform_point(&p), Point3d::origin(), epsilon = 1e-12);
        assert_relative_eq!(
            t.transform_point(&Point3d::new(3.0, 3.0, 4.0)),
            Point3d::new(1.0, 0.0, 0.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_normalize_mesh() {
        let mut mesh = TriangleMesh::quad(30.0, 10.0);
        for v in &mut mesh.vertices {
            v.x += 100.0;
        }
        let t = normalize_drawable(&mesh, 3.0);
        let (min, max) = mesh.bounding_box();
        assert_relative_eq!(t.transform_point(&min).x, -1.5, epsilon = 1e-12);
        assert_relative_eq!(t.transform_point(&max).x, 1.5, epsilon = 1e-12);
    }
}
