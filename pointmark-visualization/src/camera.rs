//! Camera utilities for 3D visualization

use nalgebra::{Matrix4, Perspective3, Point3, Rotation3, Unit, Vector3};
use serde::{Deserialize, Serialize};

use pointmark_core::{Ray, ScreenPoint};

/// Pixel rectangle the scene is drawn into
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            width,
            height,
        }
    }

    pub fn aspect_ratio(&self) -> f64 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }

    /// Normalized device coordinates of a pixel position: x right and y up,
    /// both in `-1.0..=1.0` inside the viewport.
    pub fn to_ndc(&self, screen: &ScreenPoint) -> Option<(f64, f64)> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return None;
        }
        let x = (screen.x - self.left) / self.width * 2.0 - 1.0;
        let y = -((screen.y - self.top) / self.height) * 2.0 + 1.0;
        Some((x, y))
    }
}

/// A perspective camera looking at a target point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub position: Point3<f64>,
    pub target: Point3<f64>,
    pub up: Vector3<f64>,
    /// Vertical field of view in radians
    pub fov: f64,
    pub aspect_ratio: f64,
    pub near: f64,
    pub far: f64,
}

impl Camera {
    /// Create a new camera
    pub fn new(
        position: Point3<f64>,
        target: Point3<f64>,
        up: Vector3<f64>,
        fov: f64,
        aspect_ratio: f64,
        near: f64,
        far: f64,
    ) -> Self {
        Self {
            position,
            target,
            up,
            fov,
            aspect_ratio,
            near,
            far,
        }
    }

    /// Get the view matrix
    pub fn view_matrix(&self) -> Matrix4<f64> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Get the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f64> {
        let perspective = Perspective3::new(self.aspect_ratio, self.fov, self.near, self.far);
        perspective.into_inner()
    }

    /// Distance between the camera and its target
    pub fn distance(&self) -> f64 {
        (self.position - self.target).norm()
    }

    /// World-space ray from the camera through a pixel of `viewport`
    pub fn ray_through(&self, screen: &ScreenPoint, viewport: &Viewport) -> Option<Ray> {
        let (x, y) = viewport.to_ndc(screen)?;
        let inverse = (self.projection_matrix() * self.view_matrix()).try_inverse()?;
        let near = inverse.transform_point(&Point3::new(x, y, -1.0));
        let far = inverse.transform_point(&Point3::new(x, y, 1.0));
        Ray::new(self.position, far - near)
    }

    /// Move the camera along its line of sight so the target distance is
    /// multiplied by `factor`, clamped to the range spanned by `min` and
    /// `max` in either order. A step that would not leave a finite positive
    /// distance is skipped.
    pub fn dolly(&mut self, factor: f64, min: f64, max: f64) {
        let offset = self.position - self.target;
        let distance = offset.norm();
        if distance <= f64::EPSILON {
            return;
        }
        let (lo, hi) = (min.min(max), min.max(max));
        let new_distance = distance * factor;
        if lo.is_nan() || !new_distance.is_finite() {
            return;
        }
        let new_distance = new_distance.clamp(lo, hi);
        if new_distance <= f64::EPSILON {
            return;
        }
        self.position = self.target + offset * (new_distance / distance);
    }

    /// Rotate the camera around the target by `yaw` about the up axis and
    /// `pitch` about the camera's right axis (radians). The polar angle is
    /// kept away from the poles.
    pub fn orbit(&mut self, yaw: f64, pitch: f64) {
        let offset = self.position - self.target;
        let radius = offset.norm();
        if radius <= f64::EPSILON {
            return;
        }
        let up = Unit::new_normalize(self.up);

        let offset = Rotation3::from_axis_angle(&up, yaw) * offset;

        let polar = offset.angle(&up.into_inner());
        let min_polar = 1e-3;
        let max_polar = std::f64::consts::PI - 1e-3;
        let new_polar = (polar - pitch).clamp(min_polar, max_polar);
        let offset = match Unit::try_new(up.cross(&offset), f64::EPSILON) {
            Some(right) => Rotation3::from_axis_angle(&right, new_polar - polar) * offset,
            None => offset,
        };

        self.position = self.target + offset;
    }
}

impl Default for Camera {
    /// Looking at the origin from (5, 5, 5) with a 50 degree field of view
    fn default() -> Self {
        Self::new(
            Point3::new(5.0, 5.0, 5.0),
            Point3::new(0.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            50f64.to_radians(),
            16.0 / 9.0,
            0.1,
            1000.0,
        )
    }
}
