//! Services
//!
//! This module contains the stateful layer around the pure outline engine:
//!
//! - `OutlineSession` - Current outline, undo/redo and change events
//! - `OutlineHistory` - Bounded snapshot log backing undo/redo
//! - `AutosaveProcessor` - Background task persisting the outline after edits settle
//!
//! Services coordinate between the engine and the storage layer; the engine
//! itself never performs I/O.

pub mod autosave;
pub mod error;
pub mod events;
pub mod history;
pub mod session;

pub use autosave::{AutosaveHandle, AutosaveProcessor};
pub use error::AutosaveError;
pub use events::OutlineEvent;
pub use history::{HistoryEntry, OutlineHistory};
pub use session::{ApplyOutcome, OutlineSession};
