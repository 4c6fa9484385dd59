//! Loaded models and the sources they come from

use serde::{Deserialize, Serialize};

use pointmark_core::{Drawable, Point3d, Transform3D, TriangleMesh};

use crate::format::ModelKind;

/// A user-selected file ready to be loaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSource {
    /// Resource locator handed to the loader (object URL, path, ...)
    pub locator: String,
    /// Original file name, used for classification and messages
    pub file_name: String,
    pub kind: ModelKind,
}

impl ModelSource {
    pub fn new(locator: impl Into<String>, file_name: impl Into<String>, kind: ModelKind) -> Self {
        Self {
            locator: locator.into(),
            file_name: file_name.into(),
            kind,
        }
    }
}

/// Geometry of a successfully loaded model, in hittable form
#[derive(Debug, Clone)]
pub struct LoadedModel {
    pub source: ModelSource,
    /// Meshes in model space
    pub surfaces: Vec<TriangleMesh>,
    /// Model-to-world placement shared by every surface
    pub transform: Transform3D,
}

impl LoadedModel {
    pub fn new(source: ModelSource, surfaces: Vec<TriangleMesh>, transform: Transform3D) -> Self {
        Self {
            source,
            surfaces,
            transform,
        }
    }

    pub fn kind(&self) -> ModelKind {
        self.source.kind
    }

    pub fn triangle_count(&self) -> usize {
        self.surfaces.iter().map(TriangleMesh::face_count).sum()
    }
}

impl Drawable for LoadedModel {
    /// Axis-aligned bounds in model space over all surfaces
    fn bounding_box(&self) -> (Point3d, Point3d) {
        let mut boxes = self
            .surfaces
            .iter()
            .filter(|mesh| !mesh.vertices.is_empty())
            .map(Drawable::bounding_box);

        let Some(first) = boxes.next() else {
            return (Point3d::origin(), Point3d::origin());
        };
        boxes.fold(first, |(min, max), (lo, hi)| (min.inf(&lo), max.sup(&hi)))
    }
}
