//! Ray intersection primitives: planes, triangles and spheres

use nalgebra::Vector4;
use pointmark_core::{Point3d, Ray, Vector3d};
use serde::{Deserialize, Serialize};

const PARALLEL_EPSILON: f64 = 1e-9;

/// A 3D plane model defined by the equation ax + by + cz + d = 0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaneModel {
    /// Plane coefficients [a, b, c, d] where ax + by + cz + d = 0
    pub coefficients: Vector4<f64>,
}

impl PlaneModel {
    /// Create a new plane model from coefficients
    pub fn new(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self {
            coefficients: Vector4::new(a, b, c, d),
        }
    }

    /// The horizontal plane `y = height`, facing up
    pub fn horizontal(height: f64) -> Self {
        Self::new(0.0, 1.0, 0.0, -height)
    }

    /// Get the normal vector of the plane
    pub fn normal(&self) -> Vector3d {
        Vector3d::new(
            self.coefficients.x,
            self.coefficients.y,
            self.coefficients.z,
        )
    }

    /// Ray parameter where `ray` crosses the plane.
    ///
    /// `None` when the ray is parallel to the plane or the crossing lies
    /// behind the ray origin.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f64> {
        let normal = self.normal();
        let denom = normal.dot(&ray.direction);
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }
        let t = -(normal.dot(&ray.origin.coords) + self.coefficients.w) / denom;
        (t >= 0.0 && t.is_finite()).then_some(t)
    }
}

/// Möller-Trumbore ray/triangle test, double sided.
///
/// Returns the ray parameter of the hit.
pub fn ray_triangle_intersection(
    ray: &Ray,
    v0: &Point3d,
    v1: &Point3d,
    v2: &Point3d,
) -> Option<f64> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    let h = ray.direction.cross(&edge2);
    let a = edge1.dot(&h);

    if a.abs() < PARALLEL_EPSILON {
        return None;
    }

    let f = 1.0 / a;
    let s = ray.origin - v0;
    let u = f * s.dot(&h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(&edge1);
    let v = f * ray.direction.dot(&q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(&q);
    (t > PARALLEL_EPSILON).then_some(t)
}

/// Nearest non-negative ray parameter where `ray` enters a sphere.
///
/// A ray starting inside the sphere reports the exit point.
pub fn ray_sphere_intersection(ray: &Ray, center: &Point3d, radius: f64) -> Option<f64> {
    let oc = ray.origin - center;
    // direction is unit length, so the quadratic's leading coefficient is 1
    let b = oc.dot(&ray.direction);
    let c = oc.norm_squared() - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }
    let sqrt_d = discriminant.sqrt();
    let near = -b - sqrt_d;
    if near >= 0.0 {
        return Some(near);
    }
    let far = -b + sqrt_d;
    (far >= 0.0).then_some(far)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn down_ray(x: f64, z: f64) -> Ray {
        Ray::new(Point3d::new(x, 10.0, z), Vector3d::new(0.0, -1.0, 0.0)).unwrap()
    }

    #[test]
    fn test_horizontal_plane_hit() {
        let plane = PlaneModel::horizontal(0.0);
        let ray = Ray::through(Point3d::new(5.0, 5.0, 5.0), Point3d::new(1.0, 0.0, -1.0)).unwrap();
        let t = plane.intersect_ray(&ray).unwrap();
        assert_relative_eq!(ray.at(t), Point3d::new(1.0, 0.0, -1.0), epsilon = 1e-9);
    }

    #[test]
    fn test_plane_parallel_and_behind_miss() {
        let plane = PlaneModel::horizontal(0.0);
        let parallel = Ray::new(Point3d::new(0.0, 1.0, 0.0), Vector3d::new(1.0, 0.0, 0.0)).unwrap();
        assert!(plane.intersect_ray(&parallel).is_none());

        let away = Ray::new(Point3d::new(0.0, 1.0, 0.0), Vector3d::new(0.0, 1.0, 0.0)).unwrap();
        assert!(plane.intersect_ray(&away).is_none());
    }

    #[test]
    fn test_ray_triangle_hit_and_miss() {
        let v0 = Point3d::new(-1.0, 2.0, -1.0);
        let v1 = Point3d::new(1.0, 2.0, -1.0);
        let v2 = Point3d::new(0.0, 2.0, 1.0);

        let t = ray_triangle_intersection(&down_ray(0.0, 0.0), &v0, &v1, &v2).unwrap();
        assert_relative_eq!(t, 8.0, epsilon = 1e-9);

        assert!(ray_triangle_intersection(&down_ray(3.0, 0.0), &v0, &v1, &v2).is_none());
    }

    #[test]
    fn test_ray_sphere_nearest_entry() {
        let center = Point3d::new(0.0, 1.0, 0.0);
        let t = ray_sphere_intersection(&down_ray(0.0, 0.0), &center, 0.5).unwrap();
        assert_relative_eq!(t, 8.5, epsilon = 1e-9);

        assert!(ray_sphere_intersection(&down_ray(1.0, 0.0), &center, 0.5).is_none());
    }

    #[test]
    fn test_ray_sphere_from_inside() {
        let ray = Ray::new(Point3d::origin(), Vector3d::new(1.0, 0.0, 0.0)).unwrap();
        let t = ray_sphere_intersection(&ray, &Point3d::origin(), 2.0).unwrap();
        assert_relative_eq!(t, 2.0, epsilon = 1e-12);
    }
}
