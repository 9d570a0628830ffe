//! Data Models
//!
//! This module contains the data structures of a manuscript outline:
//!
//! - `OutlineNode` - A chapter or part with its sibling position
//! - `Outline` - The full node collection passed to and returned by the engine

mod outline;
mod outline_node;

pub use outline::Outline;
pub use outline_node::{
    NodeKind, OutlineNode, DEFAULT_CHAPTER_TITLE, DEFAULT_PART_TITLE, ROOT_PARENT,
};
