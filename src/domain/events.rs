//! Change notifications produced by tree mutations.
//!
//! Mutations return the notifications they raised, in the order they were
//! raised. Structural notifications come in brackets: an `AboutTo*` event is
//! always followed by its matching completion event for the same range, and
//! row addressing observed before the bracket opened is stale until it closes.

use crate::domain::item::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelEvent {
    RowsAboutToBeInserted { parent: NodeId, first: usize, last: usize },
    RowsInserted { parent: NodeId, first: usize, last: usize },
    RowsAboutToBeRemoved { parent: NodeId, first: usize, last: usize },
    RowsRemoved { parent: NodeId, first: usize, last: usize },
    NameChanged(NodeId),
    OrderChanged(NodeId),
}

impl ModelEvent {
    /// Opening and closing events for inserting a single row.
    pub(crate) fn insert_bracket(parent: NodeId, row: usize) -> (Self, Self) {
        (
            ModelEvent::RowsAboutToBeInserted { parent, first: row, last: row },
            ModelEvent::RowsInserted { parent, first: row, last: row },
        )
    }

    /// Opening and closing events for removing a single row.
    pub(crate) fn remove_bracket(parent: NodeId, row: usize) -> (Self, Self) {
        (
            ModelEvent::RowsAboutToBeRemoved { parent, first: row, last: row },
            ModelEvent::RowsRemoved { parent, first: row, last: row },
        )
    }

    pub fn is_structural(&self) -> bool {
        !matches!(self, ModelEvent::NameChanged(_) | ModelEvent::OrderChanged(_))
    }
}

/// Outcome of a successful mutation: the affected node and the notifications
/// raised while mutating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mutation {
    pub node: NodeId,
    pub events: Vec<ModelEvent>,
}
