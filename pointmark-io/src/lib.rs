//! Model input boundary for pointmark
//!
//! This crate classifies user supplied files by extension, dispatches them to
//! the loader registered for their kind, and tags every load with a model
//! generation so that late completions can be recognized as stale.

pub mod format;
pub mod model;
pub mod registry;
pub mod generation;

pub use format::*;
pub use model::*;
pub use registry::*;
pub use generation::*;
