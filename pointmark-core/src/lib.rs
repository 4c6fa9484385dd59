//! Core data structures and traits for pointmark
//!
//! This crate provides the fundamental types shared by the labeling workspace:
//! feature points, colors, rays, triangle meshes, transforms and the labeling
//! mode, along with the common error type.

pub mod point;
pub mod feature;
pub mod color;
pub mod mode;
pub mod mesh;
pub mod traits;
pub mod transform;
pub mod clock;
pub mod error;

pub use point::*;
pub use feature::*;
pub use color::*;
pub use mode::*;
pub use mesh::*;
pub use traits::*;
pub use transform::*;
pub use clock::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point2, Point3, Vector3, Matrix4};

// Type aliases for easier imports
pub type Point = Point3d;
pub type Mesh = TriangleMesh;
