//! Error types for pointmark

use thiserror::Error;

/// Extensions accepted by the file classifier, as shown to the user
pub const SUPPORTED_EXTENSIONS_HINT: &str = ".glb, .gltf, .stl, .jpg, .jpeg, .png, .webp";

/// Main error type for pointmark operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Model load failed: {0}")]
    Load(String),

    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    #[error("Unsupported file '{file_name}' (supported formats: {})", SUPPORTED_EXTENSIONS_HINT)]
    UnsupportedFormat { file_name: String },
}

/// Result type alias for pointmark operations
pub type Result<T> = std::result::Result<T, Error>;
