//! Rack snapshot model and loading
//!
//! A snapshot is the read-only input of one layout pass: the device list with
//! nested ports and the callout list.

pub mod snapshot;
pub mod types;

pub use snapshot::{parse_snapshot, RackSnapshot};
pub use types::*;
