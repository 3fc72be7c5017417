//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::item::{Category, NodeId};
use crate::domain::payload::DropAction;

/// Domain errors represent rejected queries and mutations on the world tree.
/// None of them is fatal: a failed mutation leaves the tree untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("node not attached to the tree: {0}")]
    NotFound(NodeId),

    #[error("no bin accepts category: {0}")]
    UnknownCategory(Category),

    #[error("unrecognized drag payload: {0}")]
    UnrecognizedPayload(String),

    #[error("unsupported drop action: {0:?}")]
    UnsupportedAction(DropAction),

    #[error("dragged item not found: {0}")]
    UnresolvedReference(String),

    #[error("{item} ({category}) cannot be dropped into {target}")]
    CategoryMismatch {
        item: String,
        category: Category,
        target: String,
    },

    #[error("drop target is not a bin: {0}")]
    InvalidTarget(String),

    #[error("node cannot be moved: {0}")]
    NotMovable(String),

    #[error("root and bins are permanent: {0}")]
    PermanentNode(String),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
