//! Drag-to-reorder state machine
//!
//! Two states, three transitions. `start` is only reachable from idle and only
//! in edit mode. `update` recomputes the candidate slot from the pointer's Y
//! against device midpoints of the current compact layout. `release` ends the
//! gesture (pointer up and pointer leave both land here) and yields either a
//! no-op or the full new order.

use crate::layout::{stack_midpoints, LayoutConfig};
use crate::model::{Device, DeviceId};

use super::error::DragError;
use super::reorder::{apply_drop, ReorderRequest};

/// An in-progress drag gesture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragGesture {
    pub device_id: DeviceId,
    /// Index of the dragged device in the compact order at start
    pub from_index: usize,
    /// Candidate insertion slot, `0..=device_count`
    pub drop_index: usize,
    /// Last pointer Y in stack-local coordinates
    pub pointer_y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragGesture),
}

/// What a released gesture produced
#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    /// Nothing was dragged, or the device landed in its own slot
    NoOp,
    /// New order to hand to the persistence side
    Reorder(ReorderRequest),
}

/// Insertion slot for a pointer at `pointer_y`: the first device whose
/// midpoint lies below the pointer, or `midpoints.len()` past the last one.
pub fn drop_index_for(pointer_y: f64, midpoints: &[f64]) -> usize {
    midpoints
        .iter()
        .position(|&mid| mid > pointer_y)
        .unwrap_or(midpoints.len())
}

/// Owns the transient drag state of one pointer
#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn gesture(&self) -> Option<&DragGesture> {
        match &self.state {
            DragState::Dragging(g) => Some(g),
            DragState::Idle => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// Idle -> Dragging. `devices` must be in compact order.
    pub fn start(
        &mut self,
        edit_mode: bool,
        device_id: DeviceId,
        devices: &[Device],
        pointer_y: f64,
    ) -> Result<(), DragError> {
        if !edit_mode {
            return Err(DragError::NotEditMode);
        }
        if let DragState::Dragging(g) = &self.state {
            return Err(DragError::AlreadyDragging(g.device_id));
        }
        let from_index = devices
            .iter()
            .position(|d| d.id == device_id)
            .ok_or(DragError::UnknownDevice { id: device_id })?;

        tracing::debug!(device = %device_id, from_index, "drag started");
        self.state = DragState::Dragging(DragGesture {
            device_id,
            from_index,
            drop_index: from_index,
            pointer_y,
        });
        Ok(())
    }

    /// Dragging -> Dragging. Returns the new drop index, or `None` when idle.
    pub fn update(
        &mut self,
        pointer_y: f64,
        devices: &[Device],
        config: &LayoutConfig,
    ) -> Option<usize> {
        let DragState::Dragging(gesture) = &mut self.state else {
            return None;
        };
        let midpoints = stack_midpoints(devices, config);
        gesture.pointer_y = pointer_y;
        gesture.drop_index = drop_index_for(pointer_y, &midpoints);
        Some(gesture.drop_index)
    }

    /// Dragging -> Idle. `order` is the compact order the gesture started on.
    pub fn release(&mut self, order: &[DeviceId]) -> DropOutcome {
        let DragState::Dragging(gesture) = std::mem::take(&mut self.state) else {
            return DropOutcome::NoOp;
        };
        match apply_drop(order, gesture.from_index, gesture.drop_index) {
            Some(device_ids) => {
                tracing::debug!(
                    device = %gesture.device_id,
                    from = gesture.from_index,
                    to = gesture.drop_index,
                    "drag produced reorder"
                );
                DropOutcome::Reorder(ReorderRequest::new(device_ids))
            }
            None => {
                tracing::debug!(device = %gesture.device_id, "drag dropped in place");
                DropOutcome::NoOp
            }
        }
    }
}
