//! Boundary with the persistence service
//!
//! The layout core never performs I/O itself. Everything that fetches a
//! snapshot or submits a new order goes through [`RackCollaborator`].

pub mod memory;

use thiserror::Error;

use crate::error::SnapshotError;
use crate::interaction::ReorderRequest;
use crate::model::{Callout, Device};

pub use memory::MemoryRack;

/// Failures reported by a collaborator
#[derive(Debug, Error)]
pub enum CollaboratorError {
    /// The service refused the request (e.g. concurrent modification)
    #[error("request rejected: {reason}")]
    Rejected { reason: String },

    /// The service could not be reached
    #[error("collaborator unavailable")]
    Unavailable,

    /// The service returned something that is not a usable snapshot
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

/// Persistence/network side of the rack view
pub trait RackCollaborator {
    /// Fetch the device list with nested ports
    fn fetch_devices(&mut self) -> Result<Vec<Device>, CollaboratorError>;

    /// Fetch all callouts
    fn fetch_callouts(&mut self) -> Result<Vec<Callout>, CollaboratorError>;

    /// Persist a new order; the receiver repacks rack units from 1
    fn submit_reorder(&mut self, request: &ReorderRequest) -> Result<(), CollaboratorError>;

    /// Resubmit the current order unchanged to close persisted gaps
    fn submit_compact(&mut self, request: &ReorderRequest) -> Result<(), CollaboratorError> {
        self.submit_reorder(request)
    }
}
