//! # Pointmark Algorithms
//!
//! Geometric algorithms behind viewport interaction.
//!
//! This crate turns world-space rays into hits against model surfaces, the
//! fallback ground plane and point markers, and computes the normalization
//! applied to freshly loaded meshes.

pub mod intersection;
pub mod raycast;
pub mod normalize;

// Re-export commonly used items
pub use intersection::*;
pub use raycast::*;
pub use normalize::*;
