//! Hierarchical menu checkbox tree.
//!
//! A menu forest is supplied once (file, stdin or HTTP), indexed, and bound
//! to a [`domain::Selection`] that tracks which checkboxes are checked.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
