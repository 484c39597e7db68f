//! Operator interaction: drag-to-reorder, adjacent moves and compaction
//!
//! Nothing here draws or persists. Gestures produce [`ReorderRequest`]s that
//! the session hands to a [`crate::collab::RackCollaborator`].

pub mod drag;
pub mod error;
pub mod reorder;
pub mod session;

pub use drag::{drop_index_for, DragController, DragGesture, DragState, DropOutcome};
pub use error::DragError;
pub use reorder::{apply_drop, compact_order, is_noop_drop, move_adjacent, Direction, ReorderRequest};
pub use session::RackSession;
