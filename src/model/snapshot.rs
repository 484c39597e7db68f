//! Snapshot decoding from the persistence service's JSON shape

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SnapshotError;

use super::types::{sort_by_rack_unit, Callout, Device, DeviceId};

/// One read-only rack snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RackSnapshot {
    #[serde(default)]
    pub devices: Vec<Device>,
    #[serde(default)]
    pub callouts: Vec<Callout>,
}

impl RackSnapshot {
    pub fn new(devices: Vec<Device>, callouts: Vec<Callout>) -> Self {
        Self { devices, callouts }
    }

    /// Load and validate a snapshot from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, SnapshotError> {
        let content = std::fs::read_to_string(path)?;
        parse_snapshot(&content)
    }

    /// Devices in ascending persisted rack-unit order
    pub fn sorted_devices(&self) -> Vec<Device> {
        sort_by_rack_unit(&self.devices)
    }

    /// Device ids in the current compact order
    pub fn order(&self) -> Vec<DeviceId> {
        self.sorted_devices().iter().map(|d| d.id).collect()
    }

    pub fn device(&self, id: DeviceId) -> Option<&Device> {
        self.devices.iter().find(|d| d.id == id)
    }

    /// Reject snapshots the layout cannot represent at all.
    ///
    /// Duplicate ids and overlapping persisted intervals are laid out as
    /// given; see [`crate::layout::lint`].
    pub fn validate(&self) -> Result<(), SnapshotError> {
        match self.devices.iter().find(|d| d.unit_size == 0) {
            Some(device) => Err(SnapshotError::ZeroUnitSize { id: device.id }),
            None => Ok(()),
        }
    }
}

/// Decode and validate a snapshot from JSON text
pub fn parse_snapshot(source: &str) -> Result<RackSnapshot, SnapshotError> {
    let snapshot: RackSnapshot = serde_json::from_str(source)?;
    snapshot.validate()?;
    tracing::debug!(
        devices = snapshot.devices.len(),
        callouts = snapshot.callouts.len(),
        "snapshot decoded"
    );
    Ok(snapshot)
}
