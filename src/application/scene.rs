//! Scene service
//!
//! Owns a world tree populated from settings and offers the editor-level
//! actions: drag an item onto a bin, rename, remove, render.

use termtree::Tree;
use tracing::{debug, info, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::config::{SeedItem, Settings};
use crate::domain::{
    Category, DragPayload, DropAction, Item, ModelEvent, Mutation, NodeId, WorldTree,
};
use crate::tree_traits::WorldTreeConvert;

/// Service wrapping one world tree.
#[derive(Debug, Default)]
pub struct SceneService {
    tree: WorldTree,
}

impl SceneService {
    /// Create a service with an empty world (root and bins only).
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the world described by `settings.scene`.
    pub fn from_settings(settings: &Settings) -> ApplicationResult<Self> {
        let mut service = Self::new();
        service.seed(&settings.scene)?;
        info!("scene built with {} items", service.tree.item_count());
        Ok(service)
    }

    pub fn tree(&self) -> &WorldTree {
        &self.tree
    }

    /// Insert items in the given order.
    pub fn seed(&mut self, items: &[SeedItem]) -> ApplicationResult<Vec<ModelEvent>> {
        let mut events = Vec::new();
        for seed in items {
            let mutation = self.tree.insert(Item::new(&seed.name, seed.category))?;
            events.extend(mutation.events);
        }
        Ok(events)
    }

    /// Resolve an item by display name (first match in traversal order).
    pub fn find(&self, name: &str) -> ApplicationResult<NodeId> {
        self.tree
            .find_by_name(self.tree.root(), name)
            .ok_or_else(|| ApplicationError::UnknownItem(name.to_string()))
    }

    /// Drag the item named `name` and drop it onto the bin for `bin` at `row`.
    ///
    /// Goes through the same payload encoding and drop handling a tree view uses.
    #[instrument(level = "debug", skip(self))]
    pub fn drag(
        &mut self,
        name: &str,
        bin: Category,
        row: Option<usize>,
    ) -> ApplicationResult<Mutation> {
        let payload = DragPayload::from_names([name]);
        let target = self.tree.bin_for(bin);
        let mutation = self
            .tree
            .drop_payload(&payload, DropAction::Move, row, target)?;
        debug!("drag of {} produced {} events", name, mutation.events.len());
        Ok(mutation)
    }

    /// Rename the item named `name`.
    #[instrument(level = "debug", skip(self))]
    pub fn rename(&mut self, name: &str, new_name: &str) -> ApplicationResult<Option<ModelEvent>> {
        let id = self.find(name)?;
        Ok(self.tree.rename(id, new_name)?)
    }

    /// Remove the item named `name` and return it.
    #[instrument(level = "debug", skip(self))]
    pub fn remove(&mut self, name: &str) -> ApplicationResult<(Item, Vec<ModelEvent>)> {
        let id = self.find(name)?;
        Ok(self.tree.remove(id)?)
    }

    /// Text rendering of the whole world.
    pub fn render(&self, show_order: bool) -> Tree<String> {
        self.tree.to_tree_string(show_order)
    }

    /// Names of a bin's items in display order.
    pub fn bin_names(&self, bin: Category) -> Vec<String> {
        let adapter = self.tree.adapter();
        let parent = self.tree.bin_for(bin);
        (0..adapter.child_count(parent))
            .filter_map(|row| adapter.child_at(parent, row))
            .filter_map(|id| adapter.display_name(id))
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;

    #[test]
    fn given_default_settings_then_scene_is_seeded_into_bins() {
        let service = SceneService::from_settings(&Settings::default()).unwrap();
        assert_eq!(service.bin_names(Category::Shape), vec!["shape 1", "shape 2", "shape 3"]);
        assert_eq!(service.bin_names(Category::Light), vec!["point light", "ambient light"]);
    }

    #[test]
    fn given_drag_to_row_zero_then_bin_is_reordered() {
        let mut service = SceneService::from_settings(&Settings::default()).unwrap();
        service.drag("shape 3", Category::Shape, Some(0)).unwrap();
        assert_eq!(service.bin_names(Category::Shape), vec!["shape 3", "shape 1", "shape 2"]);
    }

    #[test]
    fn given_unknown_name_when_dragging_then_unresolved() {
        let mut service = SceneService::from_settings(&Settings::default()).unwrap();
        let err = service.drag("teapot", Category::Shape, None).unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Domain(DomainError::UnresolvedReference(_))
        ));
    }

    #[test]
    fn given_unknown_name_when_renaming_then_unknown_item() {
        let mut service = SceneService::new();
        assert!(matches!(
            service.rename("teapot", "kettle"),
            Err(ApplicationError::UnknownItem(_))
        ));
    }

    #[test]
    fn given_bin_renamed_to_leaf_name_then_rejected_and_leaf_still_draggable() {
        let mut service = SceneService::from_settings(&Settings::default()).unwrap();
        assert!(matches!(
            service.rename("Shapes", "shape 1"),
            Err(ApplicationError::Domain(DomainError::PermanentNode(_)))
        ));
        service.drag("shape 1", Category::Shape, Some(2)).unwrap();
        assert_eq!(service.bin_names(Category::Shape), vec!["shape 2", "shape 3", "shape 1"]);
    }

    #[test]
    fn given_remove_then_item_is_returned_and_gone() {
        let mut service = SceneService::from_settings(&Settings::default()).unwrap();
        let (item, _) = service.remove("shape 2").unwrap();
        assert_eq!(item.name(), "shape 2");
        assert_eq!(service.bin_names(Category::Shape), vec!["shape 1", "shape 3"]);
    }
}
