//! Errors for drag gestures

use thiserror::Error;

use crate::model::DeviceId;

/// Reasons a drag gesture cannot start
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DragError {
    /// Reordering is only available in edit mode
    #[error("drag requires edit mode")]
    NotEditMode,

    /// A gesture is already in progress
    #[error("a drag of device {0} is already in progress")]
    AlreadyDragging(DeviceId),

    /// The pressed device is not in the current order
    #[error("device {id} is not in the rack")]
    UnknownDevice { id: DeviceId },
}
