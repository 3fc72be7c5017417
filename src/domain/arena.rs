use generational_arena::Arena;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::events::{ModelEvent, Mutation};
use crate::domain::item::{Category, Item, NodeId, NodeKind};

pub const ROOT_NAME: &str = "World";

/// Arena-based scene graph: a synthetic root, one permanent bin per category,
/// and leaf items inside the bins.
///
/// Parent links are plain node handles; the tree owns every node. Display
/// order among siblings is derived on demand from each item's `order`, ties
/// keeping attachment order.
#[derive(Debug)]
pub struct WorldTree {
    /// Arena storage for all tree nodes
    arena: Arena<Item>,
    /// The "World" node
    root: NodeId,
    /// Category bins in row order under the root
    bins: Vec<NodeId>,
}

impl Default for WorldTree {
    fn default() -> Self {
        Self::new()
    }
}

impl WorldTree {
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let root = NodeId(arena.insert(Item::with_kind(ROOT_NAME, NodeKind::Root)));
        let mut tree = Self {
            arena,
            root,
            bins: Vec::new(),
        };
        for category in [Category::Light, Category::Shape] {
            let bin = Item::with_kind(category.bin_label(), NodeKind::Bin(category));
            let bin_id = NodeId(tree.arena.insert(bin));
            tree.attach_child(root, bin_id);
            tree.bins.push(bin_id);
        }
        tree
    }

    #[instrument(level = "trace", skip(self))]
    pub fn get(&self, id: NodeId) -> Option<&Item> {
        self.arena.get(id.0)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.arena.contains(id.0)
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Bins in the order they appear under the root.
    pub fn bins(&self) -> &[NodeId] {
        &self.bins
    }

    pub fn is_bin(&self, id: NodeId) -> bool {
        self.bins.contains(&id)
    }

    /// The bin collecting items of `category`.
    #[instrument(level = "trace", skip(self))]
    pub fn bin_for(&self, category: Category) -> Option<NodeId> {
        self.bins
            .iter()
            .copied()
            .find(|&bin| self.get(bin).and_then(Item::category_filter) == Some(category))
    }

    /// Number of leaf items in the tree.
    pub fn item_count(&self) -> usize {
        self.arena.iter().filter(|(_, item)| item.is_leaf()).count()
    }

    /// Children of `parent` sorted by order; equal orders keep attachment order.
    /// Unknown nodes have no children.
    #[instrument(level = "trace", skip(self))]
    pub fn ordered_children(&self, parent: NodeId) -> Vec<NodeId> {
        match self.get(parent) {
            Some(node) => node
                .children
                .iter()
                .copied()
                .sorted_by_key(|&child| self.get(child).map_or(u32::MAX, Item::order))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Adds a leaf item to the end of the bin matching its category.
    ///
    /// The item keeps whatever order it carries (0 for fresh items), so several
    /// fresh items share order 0 and display in insertion order until a move
    /// renumbers the bin.
    #[instrument(level = "debug", skip(self, item), fields(name = %item.name()))]
    pub fn insert(&mut self, mut item: Item) -> DomainResult<Mutation> {
        let category = item
            .category()
            .ok_or_else(|| DomainError::PermanentNode(item.name().to_string()))?;
        let bin = self
            .bin_for(category)
            .ok_or(DomainError::UnknownCategory(category))?;

        // stable sort puts the new child after every sibling with order <= its own
        let row = self
            .ordered_children(bin)
            .iter()
            .filter(|&&sibling| self.get(sibling).map_or(false, |s| s.order() <= item.order()))
            .count();

        item.parent = None;
        item.children.clear();
        let id = NodeId(self.arena.insert(item));

        let (about_to, done) = ModelEvent::insert_bracket(bin, row);
        let mut events = vec![about_to];
        self.attach_child(bin, id);
        events.push(done);

        debug!("inserted {} into {} at row {}", id, category.bin_label(), row);
        Ok(Mutation { node: id, events })
    }

    /// Takes a leaf item out of the tree and hands it back to the caller.
    ///
    /// The remaining siblings are renumbered `0..n-1` in display order.
    #[instrument(level = "debug", skip(self))]
    pub fn remove(&mut self, id: NodeId) -> DomainResult<(Item, Vec<ModelEvent>)> {
        let item = self.get(id).ok_or(DomainError::NotFound(id))?;
        if !item.is_leaf() {
            return Err(DomainError::PermanentNode(item.name().to_string()));
        }

        let mut events = Vec::new();
        if let Some(parent) = self.detach(id, &mut events) {
            let siblings = self.ordered_children(parent);
            self.renumber(parent, siblings, &mut events);
        }

        let item = self.arena.remove(id.0).ok_or(DomainError::NotFound(id))?;
        debug!("removed {} ({})", id, item.name());
        Ok((item, events))
    }

    /// Renames a leaf item. Returns the notification if the name changed.
    ///
    /// The root and the bins keep their names.
    #[instrument(level = "debug", skip(self, name))]
    pub fn rename(&mut self, id: NodeId, name: impl Into<String>) -> DomainResult<Option<ModelEvent>> {
        let item = self.arena.get_mut(id.0).ok_or(DomainError::NotFound(id))?;
        if !item.is_leaf() {
            return Err(DomainError::PermanentNode(item.name().to_string()));
        }
        Ok(item.set_name(name).then_some(ModelEvent::NameChanged(id)))
    }

    /// First node below `start` (depth-first, display order) named `name`.
    /// `start` itself is not a candidate.
    #[instrument(level = "trace", skip(self))]
    pub fn find_by_name(&self, start: NodeId, name: &str) -> Option<NodeId> {
        TreeIterator::new(self, start)
            .skip(1)
            .find(|(_, item)| item.name() == name)
            .map(|(id, _)| id)
    }

    /// Pre-order walk over the whole tree, siblings in display order.
    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self, self.root)
    }

    /// Leaf items in display order.
    pub fn items(&self) -> impl Iterator<Item = (NodeId, &Item)> {
        self.iter().filter(|(_, item)| item.is_leaf())
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut Item> {
        self.arena.get_mut(id.0)
    }

    /// Links `child` under `parent` as its last attached child.
    pub(crate) fn attach_child(&mut self, parent: NodeId, child: NodeId) {
        if let Some(node) = self.arena.get_mut(child.0) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.arena.get_mut(parent.0) {
            node.children.push(child);
        }
    }

    /// Unlinks `id` from its parent, bracketing the removal with notifications.
    /// Returns the former parent, `None` if the node was not attached.
    pub(crate) fn detach(&mut self, id: NodeId, events: &mut Vec<ModelEvent>) -> Option<NodeId> {
        let parent = self.get(id)?.parent?;
        let row = self.ordered_children(parent).iter().position(|&c| c == id)?;

        let (about_to, done) = ModelEvent::remove_bracket(parent, row);
        events.push(about_to);
        if let Some(node) = self.arena.get_mut(parent.0) {
            node.children.retain(|&c| c != id);
        }
        if let Some(node) = self.arena.get_mut(id.0) {
            node.parent = None;
        }
        events.push(done);
        Some(parent)
    }

    /// Assigns orders `0..n-1` following `sequence` and makes it the parent's
    /// attachment order, so later ties resolve to the same display sequence.
    pub(crate) fn renumber(
        &mut self,
        parent: NodeId,
        sequence: Vec<NodeId>,
        events: &mut Vec<ModelEvent>,
    ) {
        for (position, &child) in sequence.iter().enumerate() {
            let order = u32::try_from(position).unwrap_or(u32::MAX);
            if let Some(node) = self.arena.get_mut(child.0) {
                if node.set_order(order) {
                    events.push(ModelEvent::OrderChanged(child));
                }
            }
        }
        if let Some(node) = self.arena.get_mut(parent.0) {
            node.children = sequence;
        }
    }
}

/// Pre-order iterator starting at (and including) a given node.
pub struct TreeIterator<'a> {
    tree: &'a WorldTree,
    stack: Vec<NodeId>,
}

impl<'a> TreeIterator<'a> {
    fn new(tree: &'a WorldTree, start: NodeId) -> Self {
        let mut stack = Vec::new();
        if tree.contains(start) {
            stack.push(start);
        }
        Self { tree, stack }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (NodeId, &'a Item);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current) = self.stack.pop() {
            if let Some(node) = self.tree.get(current) {
                // Push children in reverse order for left-to-right traversal
                for child in self.tree.ordered_children(current).into_iter().rev() {
                    self.stack.push(child);
                }
                return Some((current, node));
            }
        }
        None
    }
}
