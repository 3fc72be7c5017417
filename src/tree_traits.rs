use termtree::Tree;
use tracing::instrument;

use crate::domain::{IndexAdapter, NodeId, WorldTree};

pub trait WorldTreeConvert {
    fn to_tree_string(&self, show_order: bool) -> Tree<String>;
}

// Built through the positional protocol only, like any other view would.
impl WorldTreeConvert for WorldTree {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self, show_order: bool) -> Tree<String> {
        fn label(adapter: &IndexAdapter<'_>, tree: &WorldTree, id: NodeId, show_order: bool) -> String {
            let name = adapter.display_name(id).unwrap_or_default();
            match tree.get(id) {
                Some(item) if show_order && item.is_leaf() => format!("{} [{}]", name, item.order()),
                _ => name.to_string(),
            }
        }

        fn build_tree(
            adapter: &IndexAdapter<'_>,
            tree: &WorldTree,
            parent: Option<NodeId>,
            parent_tree: &mut Tree<String>,
            show_order: bool,
        ) {
            for row in 0..adapter.child_count(parent) {
                if let Some(child) = adapter.child_at(parent, row) {
                    let mut child_tree = Tree::new(label(adapter, tree, child, show_order));
                    build_tree(adapter, tree, Some(child), &mut child_tree, show_order);
                    parent_tree.push(child_tree);
                }
            }
        }

        let adapter = self.adapter();
        let root_label = self
            .get(self.root())
            .map(|root| root.name().to_string())
            .unwrap_or_default();
        let mut root = Tree::new(root_label);
        build_tree(&adapter, self, None, &mut root, show_order);
        root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, Item};

    #[test]
    fn given_world_then_renders_bins_and_items() {
        let mut tree = WorldTree::new();
        tree.insert(Item::new("cube 1", Category::Shape)).unwrap();
        tree.insert(Item::new("point light", Category::Light)).unwrap();

        let rendered = tree.to_tree_string(false).to_string();
        let lines: Vec<_> = rendered.lines().collect();

        assert_eq!(lines[0], "World");
        assert!(lines[1].ends_with("Lights"));
        assert!(lines[2].ends_with("point light"));
        assert!(lines[3].ends_with("Shapes"));
        assert!(lines[4].ends_with("cube 1"));
    }

    #[test]
    fn given_show_order_then_leaves_carry_order() {
        let mut tree = WorldTree::new();
        tree.insert(Item::new("cube 1", Category::Shape)).unwrap();
        let rendered = tree.to_tree_string(true).to_string();
        assert!(rendered.contains("cube 1 [0]"));
        assert!(!rendered.contains("Shapes ["));
    }
}
