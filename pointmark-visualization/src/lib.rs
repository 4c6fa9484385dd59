//! Visualization for pointmark
//!
//! This crate owns everything between the interaction core and a renderer:
//! - A perspective camera that turns pixels into world rays
//! - Orbit controls with discrete zoom and reset
//! - Sequenced one-shot view commands
//! - Pure render command lists and cursor hints

pub mod camera;
pub mod controls;
pub mod view;
pub mod render;

pub use camera::*;
pub use controls::*;
pub use view::*;
pub use render::*;
