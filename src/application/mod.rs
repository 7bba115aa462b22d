//! Application layer: checkbox session, load state and rendering
//!
//! This layer drives the domain on behalf of a presentation layer and has no I/O.

pub mod error;
pub mod load;
pub mod render;
pub mod session;

pub use error::{ApplicationError, ApplicationResult};
pub use load::LoadState;
pub use render::{render_forest, CheckboxTreeConvert, Markers, RenderOptions};
pub use session::{Applied, CheckboxSession, ToggleEvent};
