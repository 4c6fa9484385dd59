//! Interaction core for pointmark
//!
//! Turns pointer gestures, toolbar actions and list edits into changes of a
//! single point store, following the current labeling mode. The
//! [`LabelingSession`] facade wires the store, the gesture classifier, the
//! hit resolver, the orbit camera and the model loading lifecycle together.

pub mod config;
pub mod store;
pub mod gesture;
pub mod dispatch;
pub mod list;
pub mod toolbar;
pub mod session;

pub use config::*;
pub use store::*;
pub use gesture::*;
pub use dispatch::*;
pub use list::*;
pub use toolbar::*;
pub use session::*;
