//! Point, vector and ray types

use nalgebra::{Point2, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// A 3D point with double precision coordinates
pub type Point3d = Point3<f64>;

/// A 3D vector with double precision components
pub type Vector3d = Vector3<f64>;

/// A position in viewport (screen) space, in pixels
pub type ScreenPoint = Point2<f64>;

/// A half-line starting at `origin` and extending along `direction`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ray {
    pub origin: Point3d,
    /// Always unit length when built through [`Ray::new`]
    pub direction: Vector3d,
}

impl Ray {
    /// Create a ray, normalizing the direction.
    ///
    /// Returns `None` for a zero-length direction.
    pub fn new(origin: Point3d, direction: Vector3d) -> Option<Self> {
        let norm = direction.norm();
        if norm < 1e-12 || !norm.is_finite() {
            return None;
        }
        Some(Self {
            origin,
            direction: direction / norm,
        })
    }

    /// Create a ray from `origin` through `target`
    pub fn through(origin: Point3d, target: Point3d) -> Option<Self> {
        Self::new(origin, target - origin)
    }

    /// Point at parameter `t` along the ray
    pub fn at(&self, t: f64) -> Point3d {
        self.origin + self.direction * t
    }
}
