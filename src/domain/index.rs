//! Positional addressing over the world tree.
//!
//! A hierarchical list view addresses rows as `(row, parent)` pairs where the
//! root is implicit: `parent == None` means the top level, whose rows are the
//! bins. Every answer is computed from current tree state; nothing is cached
//! between calls.

use tracing::instrument;

use crate::domain::arena::WorldTree;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::item::{Item, NodeId};
use crate::domain::payload::{DragPayload, DropAction, WORLD_ITEM_MIME_TYPE};

/// Interaction capabilities of a row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemFlags {
    pub selectable: bool,
    pub enabled: bool,
    pub drag_enabled: bool,
    pub drop_enabled: bool,
}

impl ItemFlags {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Stateless translation between node handles and `(row, parent)` addresses.
#[derive(Debug, Clone, Copy)]
pub struct IndexAdapter<'a> {
    tree: &'a WorldTree,
}

impl<'a> IndexAdapter<'a> {
    pub fn new(tree: &'a WorldTree) -> Self {
        Self { tree }
    }

    fn resolve(&self, parent: Option<NodeId>) -> NodeId {
        parent.unwrap_or_else(|| self.tree.root())
    }

    /// Node displayed at `row` under `parent`, `None` if out of range.
    #[instrument(level = "trace", skip(self))]
    pub fn child_at(&self, parent: Option<NodeId>, row: usize) -> Option<NodeId> {
        self.tree
            .ordered_children(self.resolve(parent))
            .get(row)
            .copied()
    }

    /// Visible parent of `id`. The root is never addressed, so top-level rows
    /// (the bins) and the root itself have no parent.
    #[instrument(level = "trace", skip(self))]
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.tree
            .get(id)?
            .parent()
            .filter(|&parent| parent != self.tree.root())
    }

    /// Display row of `id` among its siblings.
    #[instrument(level = "trace", skip(self))]
    pub fn row_of(&self, id: NodeId) -> DomainResult<usize> {
        let parent = self
            .tree
            .get(id)
            .and_then(Item::parent)
            .ok_or(DomainError::NotFound(id))?;
        self.tree
            .ordered_children(parent)
            .iter()
            .position(|&child| child == id)
            .ok_or(DomainError::NotFound(id))
    }

    /// Number of rows under `parent`; 0 for leaf items and unknown nodes.
    #[instrument(level = "trace", skip(self))]
    pub fn child_count(&self, parent: Option<NodeId>) -> usize {
        self.tree
            .get(self.resolve(parent))
            .map_or(0, |node| node.children.len())
    }

    pub fn display_name(&self, id: NodeId) -> Option<&'a str> {
        self.tree.get(id).map(Item::name)
    }

    pub fn flags(&self, id: Option<NodeId>) -> ItemFlags {
        let Some(item) = id.and_then(|id| self.tree.get(id)) else {
            return ItemFlags::default();
        };
        ItemFlags {
            selectable: true,
            enabled: true,
            drag_enabled: item.is_leaf(),
            drop_enabled: item.is_bin(),
        }
    }

    pub fn supported_drop_actions(&self) -> &'static [DropAction] {
        &[DropAction::Move]
    }

    pub fn mime_types(&self) -> &'static [&'static str] {
        &[WORLD_ITEM_MIME_TYPE]
    }

    /// Drag payload for the given rows, `None` if nothing valid was selected.
    pub fn mime_data(&self, ids: &[NodeId]) -> Option<DragPayload> {
        let names: Vec<&str> = ids.iter().filter_map(|&id| self.display_name(id)).collect();
        if names.is_empty() {
            return None;
        }
        Some(DragPayload::from_names(names))
    }
}

impl WorldTree {
    pub fn adapter(&self) -> IndexAdapter<'_> {
        IndexAdapter::new(self)
    }
}
