//! Infrastructure layer: menu retrieval
//!
//! This layer talks to files, stdin and HTTP endpoints.

pub mod error;
pub mod source;

pub use error::{InfraError, InfraResult};
pub use source::{decode_menu, source_for, FileSource, HttpSource, MenuSource};
