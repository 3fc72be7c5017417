//! Drag-and-drop reorder: decode, validate, detach, reinsert, renumber.
//!
//! A move either completes all steps or is rejected before anything is
//! touched. Rejections are ordinary errors; the tree stays exactly as it was.

use tracing::{debug, instrument};

use crate::domain::arena::{WorldTree, ROOT_NAME};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::events::{ModelEvent, Mutation};
use crate::domain::item::NodeId;
use crate::domain::payload::{DragPayload, DropAction};

impl WorldTree {
    /// Handles data dropped by a view onto `(row, parent)`.
    ///
    /// The payload names the dragged item; the name resolves to the first
    /// matching node in traversal order. `row == None` or a row past the end
    /// appends.
    #[instrument(level = "debug", skip(self, payload))]
    pub fn drop_payload(
        &mut self,
        payload: &DragPayload,
        action: DropAction,
        row: Option<usize>,
        parent: Option<NodeId>,
    ) -> DomainResult<Mutation> {
        if action != DropAction::Move {
            debug!("rejecting drop: action {:?}", action);
            return Err(DomainError::UnsupportedAction(action));
        }
        let name = payload.item_name()?;
        let dragged = self
            .find_by_name(self.root(), &name)
            .ok_or(DomainError::UnresolvedReference(name))?;
        // the root is implicit in positional addressing and never a target
        let target = parent.ok_or_else(|| DomainError::InvalidTarget(ROOT_NAME.into()))?;
        self.move_item(dragged, target, row)
    }

    /// Moves a leaf item to `row` of the bin `target`, then renumbers the bin
    /// so orders are `0..n-1` in display order.
    #[instrument(level = "debug", skip(self))]
    pub fn move_item(
        &mut self,
        id: NodeId,
        target: NodeId,
        row: Option<usize>,
    ) -> DomainResult<Mutation> {
        self.validate_move(id, target)?;

        let mut events = Vec::new();
        let source = self.detach(id, &mut events);
        if let Some(source) = source.filter(|&source| source != target) {
            let siblings = self.ordered_children(source);
            self.renumber(source, siblings, &mut events);
        }

        let mut siblings = self.ordered_children(target);
        let row = row.filter(|&row| row <= siblings.len()).unwrap_or(siblings.len());

        let order = u32::try_from(row).unwrap_or(u32::MAX);
        if let Some(item) = self.get_mut(id) {
            if item.set_order(order) {
                events.push(ModelEvent::OrderChanged(id));
            }
        }

        let (about_to, done) = ModelEvent::insert_bracket(target, row);
        events.push(about_to);
        self.attach_child(target, id);
        events.push(done);

        siblings.insert(row, id);
        self.renumber(target, siblings, &mut events);

        debug!("moved {} to row {} of {}", id, row, target);
        Ok(Mutation { node: id, events })
    }

    /// Checks everything a move needs before the first mutation.
    fn validate_move(&self, id: NodeId, target: NodeId) -> DomainResult<()> {
        let item = self.get(id).ok_or(DomainError::NotFound(id))?;
        let category = item
            .category()
            .ok_or_else(|| DomainError::NotMovable(item.name().to_string()))?;
        let bin = self
            .get(target)
            .ok_or_else(|| DomainError::InvalidTarget(target.to_string()))?;
        let filter = bin
            .category_filter()
            .ok_or_else(|| DomainError::InvalidTarget(bin.name().to_string()))?;
        if filter != category {
            debug!("rejecting drop: {} into {}", item.name(), bin.name());
            return Err(DomainError::CategoryMismatch {
                item: item.name().to_string(),
                category,
                target: bin.name().to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::item::{Category, Item};

    fn shapes_tree() -> (WorldTree, Vec<NodeId>) {
        let mut tree = WorldTree::new();
        let ids = ["a", "b", "c", "d"]
            .into_iter()
            .map(|name| tree.insert(Item::new(name, Category::Shape)).unwrap().node)
            .collect();
        (tree, ids)
    }

    fn display(tree: &WorldTree, bin: NodeId) -> Vec<(String, u32)> {
        tree.ordered_children(bin)
            .into_iter()
            .filter_map(|id| tree.get(id))
            .map(|item| (item.name().to_string(), item.order()))
            .collect()
    }

    #[test]
    fn given_move_down_then_row_counts_after_detach() {
        let (mut tree, ids) = shapes_tree();
        let shapes = tree.bin_for(Category::Shape).unwrap();
        tree.move_item(ids[0], shapes, Some(2)).unwrap();
        let names: Vec<_> = display(&tree, shapes).into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["b", "c", "a", "d"]);
    }

    #[test]
    fn given_row_past_end_then_appends() {
        let (mut tree, ids) = shapes_tree();
        let shapes = tree.bin_for(Category::Shape).unwrap();
        tree.move_item(ids[1], shapes, Some(99)).unwrap();
        assert_eq!(
            display(&tree, shapes),
            vec![("a".into(), 0), ("c".into(), 1), ("d".into(), 2), ("b".into(), 3)]
        );
    }

    #[test]
    fn given_move_then_events_bracket_remove_before_insert() {
        let (mut tree, ids) = shapes_tree();
        let shapes = tree.bin_for(Category::Shape).unwrap();
        let mutation = tree.move_item(ids[3], shapes, Some(0)).unwrap();
        let structural: Vec<_> = mutation
            .events
            .iter()
            .copied()
            .filter(ModelEvent::is_structural)
            .collect();
        assert_eq!(
            structural,
            vec![
                ModelEvent::RowsAboutToBeRemoved { parent: shapes, first: 3, last: 3 },
                ModelEvent::RowsRemoved { parent: shapes, first: 3, last: 3 },
                ModelEvent::RowsAboutToBeInserted { parent: shapes, first: 0, last: 0 },
                ModelEvent::RowsInserted { parent: shapes, first: 0, last: 0 },
            ]
        );
        // d already had order 0; everything pushed down by it was renumbered
        assert!(!mutation.events.contains(&ModelEvent::OrderChanged(ids[3])));
        for &id in &ids[..3] {
            assert!(mutation.events.contains(&ModelEvent::OrderChanged(id)));
        }
    }

    #[test]
    fn given_bin_as_dragged_node_then_not_movable() {
        let (mut tree, _) = shapes_tree();
        let lights = tree.bin_for(Category::Light).unwrap();
        let shapes = tree.bin_for(Category::Shape).unwrap();
        assert!(matches!(
            tree.move_item(lights, shapes, None),
            Err(DomainError::NotMovable(_))
        ));
    }

    #[test]
    fn given_leaf_as_target_then_invalid_target() {
        let (mut tree, ids) = shapes_tree();
        assert!(matches!(
            tree.move_item(ids[0], ids[1], None),
            Err(DomainError::InvalidTarget(_))
        ));
    }

    #[test]
    fn given_copy_action_then_unsupported() {
        let (mut tree, _) = shapes_tree();
        let shapes = tree.bin_for(Category::Shape);
        let payload = DragPayload::from_names(["a"]);
        assert_eq!(
            tree.drop_payload(&payload, DropAction::Copy, None, shapes),
            Err(DomainError::UnsupportedAction(DropAction::Copy))
        );
    }

    #[test]
    fn given_drop_on_root_then_invalid_target() {
        let (mut tree, _) = shapes_tree();
        let payload = DragPayload::from_names(["a"]);
        assert!(matches!(
            tree.drop_payload(&payload, DropAction::Move, Some(0), None),
            Err(DomainError::InvalidTarget(_))
        ));
    }
}
