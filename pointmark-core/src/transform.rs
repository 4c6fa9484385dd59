//! 3D transformation utilities

use nalgebra::{Isometry3, Matrix4, Point3, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

/// A 3D transformation that can be applied to points and meshes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform3D {
    pub matrix: Matrix4<f64>,
}

impl Transform3D {
    /// Create an identity transformation
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Create a translation transformation
    pub fn translation(translation: Vector3<f64>) -> Self {
        Self {
            matrix: Matrix4::new_translation(&translation),
        }
    }

    /// Create a rotation transformation from a quaternion
    pub fn rotation(rotation: UnitQuaternion<f64>) -> Self {
        Self {
            matrix: rotation.to_homogeneous(),
        }
    }

    /// Create a uniform scaling transformation
    pub fn uniform_scaling(scale: f64) -> Self {
        Self {
            matrix: Matrix4::new_scaling(scale),
        }
    }

    /// Apply the transformation to a point
    pub fn transform_point(&self, point: &Point3<f64>) -> Point3<f64> {
        let homogeneous = self.matrix * point.to_homogeneous();
        Point3::from_homogeneous(homogeneous).unwrap_or(*point)
    }

    /// Apply the transformation to a vector
    pub fn transform_vector(&self, vector: &Vector3<f64>) -> Vector3<f64> {
        self.matrix.fixed_view::<3, 3>(0, 0) * vector
    }

    /// Compose this transformation with another; `other` is applied first
    pub fn compose(self, other: Self) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// Get the inverse transformation
    pub fn inverse(self) -> Option<Self> {
        self.matrix.try_inverse().map(|inv_matrix| Self {
            matrix: inv_matrix,
        })
    }

    /// Check if this is approximately the identity transformation
    pub fn is_identity(&self, epsilon: f64) -> bool {
        let identity = Matrix4::identity();
        (self.matrix - identity).norm() < epsilon
    }
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Mul for Transform3D {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        self.compose(rhs)
    }
}

impl From<Matrix4<f64>> for Transform3D {
    fn from(matrix: Matrix4<f64>) -> Self {
        Self { matrix }
    }
}

impl From<Isometry3<f64>> for Transform3D {
    fn from(isometry: Isometry3<f64>) -> Self {
        Self {
            matrix: isometry.to_homogeneous(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_compose_applies_right_first() {
        let scale = Transform3D::uniform_scaling(2.0);
        let shift = Transform3D::translation(Vector3::new(-1.0, 0.0, 0.0));
        // shift, then scale
        let combined = scale * shift;
        let p = combined.transform_point(&Point3::new(3.0, 1.0, 0.0));
        assert_relative_eq!(p, Point3::new(4.0, 2.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_inverse_roundtrip() {
        let t = Transform3D::translation(Vector3::new(1.0, 2.0, 3.0))
            * Transform3D::uniform_scaling(0.5);
        let inv = t.inverse().unwrap();
        assert!((t * inv).is_identity(1e-12));
        assert!(Transform3D::uniform_scaling(0.0).inverse().is_none());
    }

    #[test]
    fn test_rotation_lays_vertical_plane_flat() {
        let rot = Transform3D::rotation(UnitQuaternion::from_axis_angle(
            &Vector3::x_axis(),
            -std::f64::consts::FRAC_PI_2,
        ));
        let p = rot.transform_point(&Point3::new(1.0, 2.0, 0.0));
        assert_relative_eq!(p, Point3::new(1.0, 0.0, -2.0), epsilon = 1e-12);
        let n = rot.transform_vector(&Vector3::new(0.0, 0.0, 1.0));
        assert_relative_eq!(n, Vector3::new(0.0, 1.0, 0.0), epsilon = 1e-12);
    }
}
