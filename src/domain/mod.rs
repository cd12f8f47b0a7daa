//! Domain layer: entities, classifier and renderer
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod element;
pub mod entities;
pub mod error;
pub mod render;
pub mod tree;

pub use element::{classify_at, classify_branch, classify_text, ClassifyMode, Element};
pub use entities::*;
pub use error::DomainError;
pub use render::Renderer;
pub use tree::{Align, Node, Tree};
