//! Domain layer: the world tree and its traversal/mutation protocol
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod error;
pub mod events;
pub mod index;
pub mod item;
pub mod moves;
pub mod payload;

pub use arena::{TreeIterator, WorldTree, ROOT_NAME};
pub use error::{DomainError, DomainResult};
pub use events::{ModelEvent, Mutation};
pub use index::{IndexAdapter, ItemFlags};
pub use item::{Category, Item, NodeId, NodeKind};
pub use payload::{DragPayload, DropAction, WORLD_ITEM_MIME_TYPE};
