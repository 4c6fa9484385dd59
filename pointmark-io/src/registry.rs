//! Loader registry for format-agnostic model loading
//!
//! Decoding happens in [`ModelLoader`] implementations supplied by the host
//! application. The registry picks the loader for a source's kind and applies
//! the post-load placement (normalization for triangulated meshes).

use log::{debug, info};
use nalgebra::{UnitQuaternion, Vector3};
use std::collections::HashMap;

use pointmark_algorithms::{normalize_drawable, DEFAULT_NORMALIZED_EXTENT};
use pointmark_core::{Error, Result, Transform3D, Transformable, TriangleMesh};

use crate::format::ModelKind;
use crate::model::{LoadedModel, ModelSource};

/// Decodes a model source into hittable triangle meshes
pub trait ModelLoader {
    /// Read the geometry behind `source`
    fn load(&self, source: &ModelSource) -> Result<Vec<TriangleMesh>>;

    /// Get the format name this loader handles
    fn format_name(&self) -> &'static str;
}

/// Builds the flat plane an image is displayed on.
///
/// The texture itself is the renderer's business; only the `size` x `size`
/// plane lying on the ground (y = 0) is needed for hit testing.
#[derive(Debug, Clone, Copy)]
pub struct ImagePlaneLoader {
    pub size: f64,
}

impl Default for ImagePlaneLoader {
    fn default() -> Self {
        Self { size: 4.0 }
    }
}

impl ModelLoader for ImagePlaneLoader {
    fn load(&self, _source: &ModelSource) -> Result<Vec<TriangleMesh>> {
        let mut plane = TriangleMesh::quad(self.size, self.size);
        // Lay the upright quad flat, facing up
        plane.transform(&Transform3D::rotation(UnitQuaternion::from_axis_angle(
            &Vector3::x_axis(),
            -std::f64::consts::FRAC_PI_2,
        )));
        Ok(vec![plane])
    }

    fn format_name(&self) -> &'static str {
        "image"
    }
}

/// Hands out meshes that were decoded elsewhere
#[derive(Debug, Clone, Default)]
pub struct InMemoryLoader {
    meshes: Vec<TriangleMesh>,
}

impl InMemoryLoader {
    pub fn new(meshes: Vec<TriangleMesh>) -> Self {
        Self { meshes }
    }
}

impl ModelLoader for InMemoryLoader {
    fn load(&self, _source: &ModelSource) -> Result<Vec<TriangleMesh>> {
        if self.meshes.is_empty() {
            return Err(Error::Load("No geometry available".to_string()));
        }
        Ok(self.meshes.clone())
    }

    fn format_name(&self) -> &'static str {
        "memory"
    }
}

/// Registry that maps model kinds to loaders
pub struct LoaderRegistry {
    loaders: HashMap<ModelKind, Box<dyn ModelLoader>>,
    normalized_extent: f64,
}

impl LoaderRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            loaders: HashMap::new(),
            normalized_extent: DEFAULT_NORMALIZED_EXTENT,
        }
    }

    /// Largest dimension triangulated meshes are scaled to
    pub fn with_normalized_extent(mut self, extent: f64) -> Self {
        self.normalized_extent = extent;
        self
    }

    /// Register a loader for a kind, replacing any previous one
    pub fn register(&mut self, kind: ModelKind, loader: Box<dyn ModelLoader>) {
        debug!("registering {} loader for {}", loader.format_name(), kind);
        self.loaders.insert(kind, loader);
    }

    pub fn supports(&self, kind: ModelKind) -> bool {
        self.loaders.contains_key(&kind)
    }

    /// Load a source with the loader registered for its kind
    pub fn load(&self, source: &ModelSource) -> Result<LoadedModel> {
        let loader = self.loaders.get(&source.kind).ok_or_else(|| {
            Error::Unsupported(format!("No loader registered for {} models", source.kind))
        })?;

        let surfaces = loader.load(source)?;
        for mesh in &surfaces {
            mesh.validate()?;
        }

        let mut model = LoadedModel::new(source.clone(), surfaces, Transform3D::identity());
        if source.kind.needs_normalization() {
            model.transform = normalize_drawable(&model, self.normalized_extent);
        }

        info!(
            "loaded {} ({} surfaces, {} triangles)",
            source.file_name,
            model.surfaces.len(),
            model.triangle_count()
        );
        Ok(model)
    }
}

impl Default for LoaderRegistry {
    /// Registry with the image plane loader preinstalled
    fn default() -> Self {
        let mut registry = Self::new();
        registry.register(ModelKind::Image, Box::new(ImagePlaneLoader::default()));
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pointmark_core::{Drawable, Point3d};

    struct FailingLoader;

    impl ModelLoader for FailingLoader {
        fn load(&self, _source: &ModelSource) -> Result<Vec<TriangleMesh>> {
            Err(Error::Load("corrupt header".to_string()))
        }

        fn format_name(&self) -> &'static str {
            "failing"
        }
    }

    fn box_mesh(min: Point3d, max: Point3d) -> TriangleMesh {
        let corner = Point3d::new(max.x, min.y, min.z);
        TriangleMesh::from_vertices_and_faces(vec![min, corner, max], vec![[0, 1, 2]])
    }

    #[test]
    fn test_image_plane_lies_on_ground() {
        let registry = LoaderRegistry::default();
        let model = registry
            .load(&ModelSource::new("blob:1", "photo.png", ModelKind::Image))
            .unwrap();
        assert_eq!(model.surfaces.len(), 1);
        let (min, max) = model.bounding_box();
        assert_relative_eq!(min, Point3d::new(-2.0, 0.0, -2.0), epsilon = 1e-12);
        assert_relative_eq!(max, Point3d::new(2.0, 0.0, 2.0), epsilon = 1e-12);
        assert!(model.transform.is_identity(1e-12));
    }

    #[test]
    fn test_stl_is_normalized() {
        let mut registry = LoaderRegistry::new();
        registry.register(
            ModelKind::MeshTextTriangulated,
            Box::new(InMemoryLoader::new(vec![box_mesh(
                Point3d::new(100.0, 0.0, 0.0),
                Point3d::new(130.0, 6.0, 3.0),
            )])),
        );
        let model = registry
            .load(&ModelSource::new("blob:2", "part.stl", ModelKind::MeshTextTriangulated))
            .unwrap();

        let (min, max) = model.bounding_box();
        let world_min = model.transform.transform_point(&min);
        let world_max = model.transform.transform_point(&max);
        assert_relative_eq!(world_min, Point3d::new(-1.5, -0.3, -0.15), epsilon = 1e-9);
        assert_relative_eq!(world_max, Point3d::new(1.5, 0.3, 0.15), epsilon = 1e-9);
    }

    #[test]
    fn test_gltf_is_not_normalized() {
        let mut registry = LoaderRegistry::new();
        registry.register(
            ModelKind::MeshBinary,
            Box::new(InMemoryLoader::new(vec![box_mesh(
                Point3d::origin(),
                Point3d::new(50.0, 1.0, 1.0),
            )])),
        );
        let model = registry
            .load(&ModelSource::new("blob:3", "scene.glb", ModelKind::MeshBinary))
            .unwrap();
        assert!(model.transform.is_identity(1e-12));
    }

    #[test]
    fn test_missing_loader_and_failures() {
        let mut registry = LoaderRegistry::new();
        let source = ModelSource::new("blob:4", "scene.glb", ModelKind::MeshBinary);
        assert!(matches!(registry.load(&source), Err(Error::Unsupported(_))));

        registry.register(ModelKind::MeshBinary, Box::new(FailingLoader));
        assert!(registry.supports(ModelKind::MeshBinary));
        assert!(matches!(registry.load(&source), Err(Error::Load(_))));
    }

    #[test]
    fn test_dangling_faces_rejected() {
        let mut registry = LoaderRegistry::new();
        let broken =
            TriangleMesh::from_vertices_and_faces(vec![Point3d::origin()], vec![[0, 1, 2]]);
        registry.register(ModelKind::MeshBinary, Box::new(InMemoryLoader::new(vec![broken])));
        let source = ModelSource::new("blob:5", "scene.gltf", ModelKind::MeshBinary);
        assert!(matches!(registry.load(&source), Err(Error::InvalidData(_))));
    }
}
