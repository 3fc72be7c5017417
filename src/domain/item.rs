//! World items: the nodes of the scene graph.

use std::fmt;

use generational_arena::Index;
use serde::{Deserialize, Serialize};

/// Classification of a leaf item. Decides which bin the item lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Shape,
    Light,
}

impl Category {
    /// Display name of the bin holding items of this category.
    pub fn bin_label(self) -> &'static str {
        match self {
            Category::Shape => "Shapes",
            Category::Light => "Lights",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Shape => write!(f, "shape"),
            Category::Light => write!(f, "light"),
        }
    }
}

/// Stable handle of a node in the world tree.
///
/// Backed by a generational arena index, so a handle is never reused for a
/// different node even after its original node has been removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) Index);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (slot, generation) = self.0.into_raw_parts();
        write!(f, "#{slot}.{generation}")
    }
}

/// Role of a node inside the world tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Synthetic top-level node ("World")
    Root,
    /// Permanent container accepting only items of one category
    Bin(Category),
    /// Regular scene item
    Leaf(Category),
}

/// A node of the scene graph.
///
/// Leaf items are created by the application with [`Item::new`] and handed to
/// [`WorldTree::insert`](crate::domain::WorldTree::insert). Parent and child
/// links are owned by the tree and cannot be touched from outside.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    name: String,
    kind: NodeKind,
    order: u32,
    pub(crate) parent: Option<NodeId>,
    /// Children in attachment order; display order is derived from `order`
    pub(crate) children: Vec<NodeId>,
}

impl Item {
    pub fn new(name: impl Into<String>, category: Category) -> Self {
        Self::with_kind(name, NodeKind::Leaf(category))
    }

    pub(crate) fn with_kind(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            order: 0,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Updates the display name. Returns `true` if the name changed.
    pub fn set_name(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if name == self.name {
            return false;
        }
        self.name = name;
        true
    }

    pub fn order(&self) -> u32 {
        self.order
    }

    /// Updates the sibling order. Returns `true` if the order changed.
    ///
    /// Siblings are not renumbered and the item does not move inside its
    /// parent; that is the job of the move operation.
    pub fn set_order(&mut self, order: u32) -> bool {
        if order == self.order {
            return false;
        }
        self.order = order;
        true
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Category of a leaf item, `None` for the root and the bins.
    pub fn category(&self) -> Option<Category> {
        match self.kind {
            NodeKind::Leaf(category) => Some(category),
            NodeKind::Root | NodeKind::Bin(_) => None,
        }
    }

    /// Category accepted by a bin, `None` for everything else.
    pub fn category_filter(&self) -> Option<Category> {
        match self.kind {
            NodeKind::Bin(category) => Some(category),
            NodeKind::Root | NodeKind::Leaf(_) => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf(_))
    }

    pub fn is_bin(&self) -> bool {
        matches!(self.kind, NodeKind::Bin(_))
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_same_name_when_set_name_then_reports_no_change() {
        let mut item = Item::new("cube 1", Category::Shape);
        assert!(!item.set_name("cube 1"));
        assert!(item.set_name("cube 2"));
        assert_eq!(item.name(), "cube 2");
    }

    #[test]
    fn given_same_order_when_set_order_then_reports_no_change() {
        let mut item = Item::new("point light", Category::Light);
        assert_eq!(item.order(), 0);
        assert!(!item.set_order(0));
        assert!(item.set_order(3));
        assert_eq!(item.order(), 3);
    }

    #[test]
    fn given_node_kinds_then_category_and_filter_are_exclusive() {
        let leaf = Item::new("sphere", Category::Shape);
        assert_eq!(leaf.category(), Some(Category::Shape));
        assert_eq!(leaf.category_filter(), None);

        let bin = Item::with_kind("Lights", NodeKind::Bin(Category::Light));
        assert_eq!(bin.category(), None);
        assert_eq!(bin.category_filter(), Some(Category::Light));

        let root = Item::with_kind("World", NodeKind::Root);
        assert_eq!(root.category(), None);
        assert_eq!(root.category_filter(), None);
    }
}
