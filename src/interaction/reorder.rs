//! Permutations of the compact device order

use serde::{Deserialize, Serialize};

use crate::model::{sort_by_rack_unit, Device, DeviceId};

/// Body of a reorder submission: every device id in its new order.
///
/// The receiver repacks contiguous rack units from 1 in this order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderRequest {
    pub device_ids: Vec<DeviceId>,
}

impl ReorderRequest {
    pub fn new(device_ids: Vec<DeviceId>) -> Self {
        Self { device_ids }
    }
}

/// Direction for a single-step move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// True when dropping at `drop_index` leaves the device where it was
pub fn is_noop_drop(from_index: usize, drop_index: usize) -> bool {
    drop_index == from_index || drop_index == from_index + 1
}

/// Move the device at `from_index` into insertion slot `drop_index`.
///
/// Slots range over `0..=order.len()`; slot `i` is "before the device
/// currently at `i`", and slots past the end clamp to `order.len()`.
/// Returns `None` for a no-op drop or an out-of-range source.
pub fn apply_drop(order: &[DeviceId], from_index: usize, drop_index: usize) -> Option<Vec<DeviceId>> {
    let drop_index = drop_index.min(order.len());
    if from_index >= order.len() || is_noop_drop(from_index, drop_index) {
        return None;
    }
    let mut next = order.to_vec();
    let moved = next.remove(from_index);
    let target = if drop_index > from_index {
        drop_index - 1
    } else {
        drop_index
    };
    next.insert(target, moved);
    Some(next)
}

/// Swap a device with its neighbour. `None` at the ends or for unknown ids.
pub fn move_adjacent(order: &[DeviceId], id: DeviceId, direction: Direction) -> Option<Vec<DeviceId>> {
    let idx = order.iter().position(|&d| d == id)?;
    let other = match direction {
        Direction::Up => idx.checked_sub(1)?,
        Direction::Down if idx + 1 < order.len() => idx + 1,
        Direction::Down => return None,
    };
    let mut next = order.to_vec();
    next.swap(idx, other);
    Some(next)
}

/// Current order, as used to close persisted gaps without a drag
pub fn compact_order(devices: &[Device]) -> Vec<DeviceId> {
    sort_by_rack_unit(devices).iter().map(|d| d.id).collect()
}
