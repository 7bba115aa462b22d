//! Domain layer: menu tree model and selection engine
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod error;
pub mod selection;
pub mod tree;

pub use arena::{ArenaNode, MenuArena};
pub use error::DomainError;
pub use selection::{ChildToggle, Selection, Toggled};
pub use tree::{descendant_ids, Forest, Node, NodeId};
