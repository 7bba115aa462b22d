//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::tree::NodeId;

/// Structural problems with a supplied menu.
///
/// The selection engine itself cannot fail; these arise only when indexing
/// or querying a menu by id.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("duplicate node id in menu: {0}")]
    DuplicateId(NodeId),

    #[error("unknown node id: {0}")]
    UnknownNode(NodeId),
}
