//! Layout result types consumed by the renderer

use crate::model::{Device, DeviceId, Port};

use super::callout::CalloutLayout;
use super::geometry::{BoundingBox, CompactOffset};
use super::ports::PortGrid;

/// A positioned port cell, in rack-local coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct PortLayout {
    pub port: Port,
    pub bounds: BoundingBox,
    /// Matched by the active port search
    pub highlighted: bool,
}

/// A positioned device
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceLayout {
    pub device: Device,
    /// Index in the compact order
    pub index: usize,
    pub offset: CompactOffset,
    pub bounds: BoundingBox,
    pub grid: PortGrid,
    pub ports: Vec<PortLayout>,
    /// This device is the subject of an active drag gesture
    pub dragging: bool,
    /// Shares a persisted unit with another device; only set by
    /// [`super::mark_overlaps`]
    pub overlapping: bool,
}

impl DeviceLayout {
    pub fn id(&self) -> DeviceId {
        self.device.id
    }
}

/// Insertion marker drawn while a drag is in progress
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropIndicator {
    pub index: usize,
    pub bounds: BoundingBox,
}

/// The complete result of one layout pass
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RackLayout {
    /// Devices in compact order
    pub devices: Vec<DeviceLayout>,
    /// Callouts in ideal-Y order
    pub callouts: Vec<CalloutLayout>,
    pub total_units: u32,
    pub stack_height: f64,
    pub rack_width: f64,
    /// Width of the unit-number column at the left edge of every device
    pub unit_column: f64,
    /// Extent of devices and callouts
    pub bounds: BoundingBox,
    pub drop_indicator: Option<DropIndicator>,
}

impl RackLayout {
    pub fn device(&self, id: DeviceId) -> Option<&DeviceLayout> {
        self.devices.iter().find(|d| d.id() == id)
    }

    /// Device ids in compact order
    pub fn order(&self) -> Vec<DeviceId> {
        self.devices.iter().map(|d| d.id()).collect()
    }
}
