//! Storyloom Core
//!
//! The outline engine for long-form manuscripts: an ordered forest of chapters
//! and parts, one level deep, edited by drag-and-drop.
//!
//! # Architecture
//!
//! - **Pure engine**: every edit is a total function `Outline -> Outline`;
//!   rejected edits return the input unchanged
//! - **Shared nodes**: nodes are `Arc`-shared, so untouched nodes keep their
//!   identity across edits and history snapshots stay cheap
//! - **Single writer**: `OutlineSession` owns the outline; persistence runs in
//!   a debounced background task
//!
//! # Modules
//!
//! - [`models`] - Outline nodes and the outline collection
//! - [`outline`] - The engine: flatten, move, insert, delete, rename, collapse
//! - [`operations`] - Serializable edit commands and the error taxonomy
//! - [`services`] - Session, undo/redo history and autosave
//! - [`db`] - Outline persistence
//! - [`config`] - Session configuration

pub mod config;
pub mod db;
pub mod models;
pub mod operations;
pub mod outline;
pub mod services;

// Re-export commonly used types
pub use config::{ConfigError, OutlineConfig};
pub use db::{JsonFileStore, MemoryStore, OutlineStore, StoreError};
pub use models::*;
pub use operations::{OutlineOperation, OutlineOperationError};
pub use outline::{flatten, move_node, DropPosition};
pub use services::*;
