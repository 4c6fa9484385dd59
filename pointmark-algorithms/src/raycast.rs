//! Ray casting against viewport hit targets
//!
//! Hit targets come in three flavours: model surfaces, the fallback ground
//! plane and point markers. [`SceneRayCaster`] finds the nearest one along a
//! ray; [`HitResolver`] layers the interaction rules on top (a marker in
//! front of a surface shadows it, and point drags always slide on a fixed
//! horizontal plane).

use log::trace;
use pointmark_core::{Point3d, PointId, Ray, Transform3D, TriangleMesh};

use crate::intersection::{ray_sphere_intersection, ray_triangle_intersection, PlaneModel};

/// Something a viewport ray can hit
#[derive(Debug, Clone, Copy)]
pub enum HitTarget<'a> {
    /// Model geometry placed in the world by `transform`
    Surface {
        mesh: &'a TriangleMesh,
        transform: Transform3D,
    },
    /// Invisible catch-all plane; `half_extent` bounds it in X and Z around
    /// the world origin, `None` leaves it unbounded
    GroundPlane {
        plane: PlaneModel,
        half_extent: Option<f64>,
    },
    /// Spherical marker drawn for a feature point
    Marker {
        id: &'a PointId,
        center: Point3d,
        radius: f64,
    },
}

/// What kind of target a hit landed on
#[derive(Debug, Clone, PartialEq)]
pub enum HitKind {
    Surface,
    Ground,
    Marker(PointId),
}

/// A single ray intersection
#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    /// World-space distance from the ray origin
    pub t: f64,
    pub point: Point3d,
    pub kind: HitKind,
}

/// Finds the nearest hit of a ray among a set of targets
pub trait RayCaster {
    fn cast_ray(&self, ray: &Ray, targets: &[HitTarget<'_>]) -> Option<Hit>;
}

/// Brute-force nearest-hit caster over every target
#[derive(Debug, Clone, Copy, Default)]
pub struct SceneRayCaster;

impl SceneRayCaster {
    fn hit_target(ray: &Ray, target: &HitTarget<'_>) -> Option<Hit> {
        match target {
            HitTarget::Surface { mesh, transform } => Self::hit_surface(ray, mesh, transform),
            HitTarget::GroundPlane { plane, half_extent } => {
                let t = plane.intersect_ray(ray)?;
                let point = ray.at(t);
                if let Some(extent) = half_extent {
                    if point.x.abs() > *extent || point.z.abs() > *extent {
                        return None;
                    }
                }
                Some(Hit { t, point, kind: HitKind::Ground })
            }
            HitTarget::Marker { id, center, radius } => {
                let t = ray_sphere_intersection(ray, center, *radius)?;
                Some(Hit {
                    t,
                    point: ray.at(t),
                    kind: HitKind::Marker((*id).clone()),
                })
            }
        }
    }

    fn hit_surface(ray: &Ray, mesh: &TriangleMesh, transform: &Transform3D) -> Option<Hit> {
        // Intersect in mesh space, then measure the distance in world space
        let inverse = transform.inverse()?;
        let local = Ray::new(
            inverse.transform_point(&ray.origin),
            inverse.transform_vector(&ray.direction),
        )?;

        let local_t = mesh
            .triangles()
            .filter_map(|[a, b, c]| ray_triangle_intersection(&local, &a, &b, &c))
            .min_by(f64::total_cmp)?;

        let point = transform.transform_point(&local.at(local_t));
        Some(Hit {
            t: (point - ray.origin).norm(),
            point,
            kind: HitKind::Surface,
        })
    }
}

impl RayCaster for SceneRayCaster {
    fn cast_ray(&self, ray: &Ray, targets: &[HitTarget<'_>]) -> Option<Hit> {
        targets
            .iter()
            .filter_map(|target| Self::hit_target(ray, target))
            .min_by(|a, b| a.t.total_cmp(&b.t))
    }
}

/// Interpretation of a click ray
#[derive(Debug, Clone, PartialEq)]
pub enum ClickTarget {
    /// The nearest thing under the pointer is a marker
    Marker(PointId),
    /// A surface or the ground plane was hit at this position
    Position(Point3d),
    /// Nothing was hit
    Miss,
}

/// Applies the interaction rules for clicks, additions and point drags
#[derive(Debug, Clone)]
pub struct HitResolver<C = SceneRayCaster> {
    caster: C,
    drag_plane: PlaneModel,
}

impl HitResolver<SceneRayCaster> {
    pub fn new() -> Self {
        Self::with_caster(SceneRayCaster)
    }
}

impl Default for HitResolver<SceneRayCaster> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: RayCaster> HitResolver<C> {
    /// Dragged points always slide on the horizontal plane through the
    /// world origin, whatever surface they were placed on.
    pub fn with_caster(caster: C) -> Self {
        Self {
            caster,
            drag_plane: PlaneModel::horizontal(0.0),
        }
    }

    pub fn drag_plane(&self) -> &PlaneModel {
        &self.drag_plane
    }

    /// Classify what a click ray lands on. A marker in front of everything
    /// else wins; otherwise the nearest surface or ground hit is reported.
    pub fn resolve_click(&self, ray: &Ray, targets: &[HitTarget<'_>]) -> ClickTarget {
        match self.caster.cast_ray(ray, targets) {
            Some(Hit { kind: HitKind::Marker(id), .. }) => ClickTarget::Marker(id),
            Some(hit) => ClickTarget::Position(hit.point),
            None => {
                trace!("click ray missed every target");
                ClickTarget::Miss
            }
        }
    }

    /// New position for a dragged point, or `None` when the ray runs
    /// parallel to (or away from) the drag plane.
    pub fn resolve_drag(&self, ray: &Ray) -> Option<Point3d> {
        self.drag_plane.intersect_ray(ray).map(|t| ray.at(t))
    }
}
