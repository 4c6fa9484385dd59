//! Tunable parameters of a labeling session

use serde::{Deserialize, Serialize};

use pointmark_algorithms::DEFAULT_NORMALIZED_EXTENT;
use pointmark_core::{Palette, Point3d};
use pointmark_io::{ImagePlaneLoader, LoaderRegistry, ModelKind};
use pointmark_visualization::{Camera, MarkerStyle, OrbitConfig, OrbitControls};

use crate::gesture::CLICK_MOVE_THRESHOLD_PX;

/// Initial camera pose, restored by the reset view action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub position: Point3d,
    pub target: Point3d,
    pub fov_degrees: f64,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            position: Point3d::new(5.0, 5.0, 5.0),
            target: Point3d::origin(),
            fov_degrees: 50.0,
        }
    }
}

/// Configuration for a [`LabelingSession`](crate::LabelingSession)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelingConfig {
    /// Pointer travel in pixels below which a gesture still counts as a click
    pub click_threshold_px: f64,
    pub marker: MarkerStyle,
    /// Largest dimension triangulated meshes are scaled to
    pub normalized_extent: f64,
    pub image_plane_size: f64,
    /// Half size of the catch plane used for adding points off the model;
    /// `None` makes it unbounded
    pub ground_half_extent: Option<f64>,
    pub palette: Palette,
    pub camera: CameraPose,
    pub orbit: OrbitConfig,
}

impl Default for LabelingConfig {
    fn default() -> Self {
        Self {
            click_threshold_px: CLICK_MOVE_THRESHOLD_PX,
            marker: MarkerStyle::default(),
            normalized_extent: DEFAULT_NORMALIZED_EXTENT,
            image_plane_size: 4.0,
            ground_half_extent: Some(10.0),
            palette: Palette::default(),
            camera: CameraPose::default(),
            orbit: OrbitConfig::default(),
        }
    }
}

impl LabelingConfig {
    /// Camera at the configured initial pose
    pub fn initial_camera(&self, aspect_ratio: f64) -> Camera {
        Camera {
            position: self.camera.position,
            target: self.camera.target,
            fov: self.camera.fov_degrees.to_radians(),
            aspect_ratio,
            ..Camera::default()
        }
    }

    pub fn orbit_controls(&self, aspect_ratio: f64) -> OrbitControls {
        OrbitControls::new(self.initial_camera(aspect_ratio), self.orbit.clone())
    }

    /// Loader registry with the image plane loader sized from this config.
    /// Mesh loaders are registered by the host.
    pub fn loader_registry(&self) -> LoaderRegistry {
        let mut registry = LoaderRegistry::new().with_normalized_extent(self.normalized_extent);
        registry.register(
            ModelKind::Image,
            Box::new(ImagePlaneLoader {
                size: self.image_plane_size,
            }),
        );
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults() {
        let config = LabelingConfig::default();
        assert_eq!(config.click_threshold_px, 6.0);
        assert_eq!(config.marker.radius, 0.08);
        assert_eq!(config.palette.len(), 8);

        let camera = config.initial_camera(1.5);
        assert_eq!(camera.position, Point3d::new(5.0, 5.0, 5.0));
        assert_relative_eq!(camera.fov, 50f64.to_radians());
        assert!(config.loader_registry().supports(ModelKind::Image));
        assert!(!config.loader_registry().supports(ModelKind::MeshBinary));
    }

    #[test]
    fn test_config_file_with_inverted_zoom_range_is_rejected() {
        let partial: LabelingConfig =
            serde_json::from_str(r#"{"click_threshold_px":8.0}"#).unwrap();
        assert_eq!(partial.click_threshold_px, 8.0);
        assert_eq!(partial.orbit, OrbitConfig::default());

        let inverted = r#"{"orbit":{"zoom_step":1.2,"min_distance":50.0,"max_distance":10.0}}"#;
        assert!(serde_json::from_str::<LabelingConfig>(inverted).is_err());
    }
}
