//! Storage Layer
//!
//! This module handles outline persistence:
//!
//! - `OutlineStore` - Async persistence trait shared with the autosave task
//! - `JsonFileStore` - Single JSON file with atomic writes and repair on load
//! - `MemoryStore` - In-process store for tests and dry runs
//!
//! The wire format is a JSON array of outline nodes (camelCase keys, `"root"`
//! parent sentinel), the same shape the manuscript frontend persists.

mod error;
mod json_file_store;
mod memory_store;
mod outline_store;

pub use error::StoreError;
pub use json_file_store::JsonFileStore;
pub use memory_store::MemoryStore;
pub use outline_store::OutlineStore;
