//! Orbit-style camera controls driven by toolbar commands and pointer drags

use log::debug;
use pointmark_core::{Error, Result};
use serde::{Deserialize, Serialize};

use crate::camera::Camera;

/// Camera operations the interaction core is allowed to trigger
pub trait CameraControls {
    /// Move one discrete step closer to the target
    fn zoom_in(&mut self);

    /// Move one discrete step away from the target
    fn zoom_out(&mut self);

    /// Restore the initial pose and target
    fn reset(&mut self);

    /// Enable or suspend pointer-driven orbiting
    fn set_enabled(&mut self, enabled: bool);

    fn is_enabled(&self) -> bool;

    /// Orbit by a pointer movement in pixels. Ignored while disabled.
    fn orbit(&mut self, _dx: f64, _dy: f64) {}
}

/// Orbit controller parameters
///
/// Deserialization rejects values [`OrbitConfig::validate`] refuses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "OrbitConfigFields")]
pub struct OrbitConfig {
    /// Distance factor applied per zoom step
    pub zoom_step: f64,
    pub min_distance: f64,
    pub max_distance: f64,
    /// Radians of rotation per dragged pixel
    pub rotate_speed: f64,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            zoom_step: 1.2,
            min_distance: 0.5,
            max_distance: 100.0,
            rotate_speed: 0.005,
        }
    }
}

impl OrbitConfig {
    /// Check that zooming stays within a finite, non-empty distance range
    pub fn validate(&self) -> Result<()> {
        let values = [self.zoom_step, self.min_distance, self.max_distance, self.rotate_speed];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(Error::InvalidData(format!("Orbit settings must be finite: {:?}", self)));
        }
        if self.zoom_step <= 0.0 {
            return Err(Error::InvalidData(format!(
                "Zoom step must be positive, got {}",
                self.zoom_step
            )));
        }
        if self.min_distance <= 0.0 || self.min_distance > self.max_distance {
            return Err(Error::InvalidData(format!(
                "Invalid zoom distance range {}..={}",
                self.min_distance, self.max_distance
            )));
        }
        Ok(())
    }
}

/// Unchecked form read from configuration files
#[derive(Deserialize)]
#[serde(default)]
struct OrbitConfigFields {
    zoom_step: f64,
    min_distance: f64,
    max_distance: f64,
    rotate_speed: f64,
}

impl Default for OrbitConfigFields {
    fn default() -> Self {
        let OrbitConfig { zoom_step, min_distance, max_distance, rotate_speed } =
            OrbitConfig::default();
        Self { zoom_step, min_distance, max_distance, rotate_speed }
    }
}

impl TryFrom<OrbitConfigFields> for OrbitConfig {
    type Error = Error;

    fn try_from(fields: OrbitConfigFields) -> Result<Self> {
        let OrbitConfigFields { zoom_step, min_distance, max_distance, rotate_speed } = fields;
        let config = Self { zoom_step, min_distance, max_distance, rotate_speed };
        config.validate()?;
        Ok(config)
    }
}

/// Orbits a [`Camera`] around its target
#[derive(Debug, Clone)]
pub struct OrbitControls {
    camera: Camera,
    initial: Camera,
    config: OrbitConfig,
    enabled: bool,
}

impl OrbitControls {
    pub fn new(camera: Camera, config: OrbitConfig) -> Self {
        Self {
            initial: camera.clone(),
            camera,
            config,
            enabled: true,
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Keep the projection in sync with the drawing surface
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f64) {
        self.camera.aspect_ratio = aspect_ratio;
        self.initial.aspect_ratio = aspect_ratio;
    }
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self::new(Camera::default(), OrbitConfig::default())
    }
}

impl CameraControls for OrbitControls {
    fn zoom_in(&mut self) {
        let OrbitConfig { zoom_step, min_distance, max_distance, .. } = self.config;
        self.camera.dolly(1.0 / zoom_step, min_distance, max_distance);
        debug!("zoom in, distance {:.3}", self.camera.distance());
    }

    fn zoom_out(&mut self) {
        let OrbitConfig { zoom_step, min_distance, max_distance, .. } = self.config;
        self.camera.dolly(zoom_step, min_distance, max_distance);
        debug!("zoom out, distance {:.3}", self.camera.distance());
    }

    fn reset(&mut self) {
        self.camera = self.initial.clone();
        debug!("camera reset");
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn orbit(&mut self, dx: f64, dy: f64) {
        if !self.enabled {
            return;
        }
        let speed = self.config.rotate_speed;
        // dragging right swings the camera left around the target
        self.camera.orbit(-dx * speed, dy * speed);
    }
}
