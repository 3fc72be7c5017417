//! Application layer: scene services
//!
//! This layer drives the world tree the way an editor shell does and turns
//! settings into a populated scene.

pub mod error;
pub mod scene;

pub use error::{ApplicationError, ApplicationResult};
pub use scene::SceneService;
