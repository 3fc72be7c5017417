//! Scene-graph world model for the RayPainter editor.
//!
//! A "World" root holds one bin per item category ("Lights", "Shapes"); leaf
//! items live in the bin matching their category and are ordered among their
//! siblings by an explicit order field that drag-and-drop moves renumber.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod tree_traits;
pub mod util;

pub use domain::{
    Category, DomainError, DragPayload, DropAction, IndexAdapter, Item, ModelEvent, Mutation,
    NodeId, WorldTree,
};
