//! Extension-based classification of user supplied files

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use pointmark_core::{Error, Result};

/// Kind of model a file decodes into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelKind {
    /// glTF scene (`.glb`, `.gltf`)
    MeshBinary,
    /// Triangle soup (`.stl`), normalized after loading
    MeshTextTriangulated,
    /// Raster image shown on a flat plane
    Image,
}

impl ModelKind {
    pub const ALL: [ModelKind; 3] = [
        ModelKind::MeshBinary,
        ModelKind::MeshTextTriangulated,
        ModelKind::Image,
    ];

    /// Lowercase extensions (without the dot) mapped to this kind
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            ModelKind::MeshBinary => &["glb", "gltf"],
            ModelKind::MeshTextTriangulated => &["stl"],
            ModelKind::Image => &["jpg", "jpeg", "png", "webp"],
        }
    }

    /// Whether the loaded geometry is re-centered and rescaled
    pub fn needs_normalization(self) -> bool {
        matches!(self, ModelKind::MeshTextTriangulated)
    }

    fn name(self) -> &'static str {
        match self {
            ModelKind::MeshBinary => "gltf",
            ModelKind::MeshTextTriangulated => "stl",
            ModelKind::Image => "image",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classify a file by its extension, case-insensitively.
///
/// Returns `None` for unrecognized or missing extensions.
pub fn classify(file_name: &str) -> Option<ModelKind> {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|s| s.to_str())?
        .to_ascii_lowercase();

    ModelKind::ALL
        .into_iter()
        .find(|kind| kind.extensions().contains(&ext.as_str()))
}

/// Classify a file, turning an unrecognized extension into the
/// user-facing rejection error.
pub fn classify_or_reject(file_name: &str) -> Result<ModelKind> {
    classify(file_name).ok_or_else(|| Error::UnsupportedFormat {
        file_name: file_name.to_string(),
    })
}

/// Accept filter for a file picker, e.g. `.glb,.gltf,.stl,...`
pub fn accept_filter() -> String {
    ModelKind::ALL
        .iter()
        .flat_map(|kind| kind.extensions())
        .map(|ext| format!(".{}", ext))
        .collect::<Vec<_>>()
        .join(",")
}
