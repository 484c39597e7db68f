//! In-memory collaborator holding a single snapshot

use std::collections::HashMap;

use crate::interaction::ReorderRequest;
use crate::model::{sort_by_rack_unit, Callout, Device, DeviceId, PersistedUnit, RackSnapshot};

use super::{CollaboratorError, RackCollaborator};

/// A collaborator backed by an owned snapshot.
///
/// Reorders repack contiguous rack units starting at 1. Unknown ids in a
/// request are skipped; devices missing from the request keep their relative
/// order and are packed after the listed ones.
#[derive(Debug, Clone, Default)]
pub struct MemoryRack {
    snapshot: RackSnapshot,
    reject_next: Option<String>,
    submissions: usize,
}

impl MemoryRack {
    pub fn new(snapshot: RackSnapshot) -> Self {
        Self {
            snapshot,
            reject_next: None,
            submissions: 0,
        }
    }

    pub fn snapshot(&self) -> &RackSnapshot {
        &self.snapshot
    }

    pub fn into_snapshot(self) -> RackSnapshot {
        self.snapshot
    }

    /// Number of accepted reorder/compact submissions
    pub fn submissions(&self) -> usize {
        self.submissions
    }

    /// Make the next submission fail with `reason`
    pub fn reject_next(&mut self, reason: impl Into<String>) {
        self.reject_next = Some(reason.into());
    }

    fn repack(&mut self, device_ids: &[DeviceId]) -> u32 {
        let listed: Vec<DeviceId> = {
            let mut seen = Vec::with_capacity(device_ids.len());
            for id in device_ids {
                if !seen.contains(id) {
                    seen.push(*id);
                }
            }
            seen
        };
        let mut rest: Vec<DeviceId> = Vec::new();
        for device in sort_by_rack_unit(&self.snapshot.devices) {
            if !listed.contains(&device.id) && !rest.contains(&device.id) {
                rest.push(device.id);
            }
        }

        // duplicate ids pack together, in snapshot order
        let mut index: HashMap<DeviceId, Vec<usize>> = HashMap::new();
        for (i, device) in self.snapshot.devices.iter().enumerate() {
            index.entry(device.id).or_default().push(i);
        }

        let mut next_unit: u32 = 1;
        for id in listed.iter().chain(&rest) {
            let Some(slots) = index.get(id) else {
                tracing::debug!(device = %id, "skipping unknown device in reorder");
                continue;
            };
            for &i in slots {
                let device = &mut self.snapshot.devices[i];
                device.rack_unit = PersistedUnit(next_unit);
                next_unit = next_unit.saturating_add(device.unit_size);
            }
        }
        next_unit - 1
    }
}

impl RackCollaborator for MemoryRack {
    fn fetch_devices(&mut self) -> Result<Vec<Device>, CollaboratorError> {
        Ok(self.snapshot.devices.clone())
    }

    fn fetch_callouts(&mut self) -> Result<Vec<Callout>, CollaboratorError> {
        Ok(self.snapshot.callouts.clone())
    }

    fn submit_reorder(&mut self, request: &ReorderRequest) -> Result<(), CollaboratorError> {
        if let Some(reason) = self.reject_next.take() {
            return Err(CollaboratorError::Rejected { reason });
        }
        let total = self.repack(&request.device_ids);
        self.submissions += 1;
        tracing::info!(
            devices = request.device_ids.len(),
            total_units = total,
            "rack repacked"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DeviceType;

    fn device(id: u64, unit: u32, size: u32) -> Device {
        Device {
            id: DeviceId(id),
            name: String::new(),
            device_type: DeviceType::Other,
            rack_unit: PersistedUnit(unit),
            unit_size: size,
            port_count: None,
            notes: None,
            ports: vec![],
        }
    }

    fn units(rack: &MemoryRack) -> Vec<(u64, u32)> {
        sort_by_rack_unit(&rack.snapshot().devices)
            .iter()
            .map(|d| (d.id.0, d.rack_unit.0))
            .collect()
    }

    #[test]
    fn test_reorder_repacks_from_one() {
        let mut rack = MemoryRack::new(RackSnapshot::new(
            vec![device(1, 3, 1), device(2, 10, 2), device(3, 20, 1)],
            vec![],
        ));
        rack.submit_reorder(&ReorderRequest::new(vec![DeviceId(3), DeviceId(1), DeviceId(2)]))
            .unwrap();
        assert_eq!(units(&rack), vec![(3, 1), (1, 2), (2, 3)]);
        assert_eq!(rack.submissions(), 1);
    }

    #[test]
    fn test_unknown_and_missing_ids() {
        let mut rack = MemoryRack::new(RackSnapshot::new(
            vec![device(1, 1, 1), device(2, 2, 1), device(3, 3, 1)],
            vec![],
        ));
        rack.submit_reorder(&ReorderRequest::new(vec![DeviceId(99), DeviceId(3)]))
            .unwrap();
        assert_eq!(units(&rack), vec![(3, 1), (1, 2), (2, 3)]);
    }

    #[test]
    fn test_reject_next() {
        let mut rack = MemoryRack::new(RackSnapshot::new(vec![device(1, 5, 1)], vec![]));
        rack.reject_next("stale order");
        let err = rack
            .submit_compact(&ReorderRequest::new(vec![DeviceId(1)]))
            .unwrap_err();
        assert_eq!(err.to_string(), "request rejected: stale order");
        assert_eq!(units(&rack), vec![(1, 5)]);

        rack.submit_compact(&ReorderRequest::new(vec![DeviceId(1)]))
            .unwrap();
        assert_eq!(units(&rack), vec![(1, 1)]);
    }

    #[test]
    fn test_duplicate_ids_are_all_repacked() {
        let mut rack = MemoryRack::new(RackSnapshot::new(
            vec![device(1, 9, 1), device(2, 4, 2), device(1, 12, 1)],
            vec![],
        ));
        rack.submit_compact(&ReorderRequest::new(vec![DeviceId(2), DeviceId(1)]))
            .unwrap();
        assert_eq!(units(&rack), vec![(2, 1), (1, 3), (1, 4)]);
    }

    #[test]
    fn test_repack_saturates_on_huge_sizes() {
        let mut rack = MemoryRack::new(RackSnapshot::new(
            vec![device(1, 1, u32::MAX), device(2, 2, 5)],
            vec![],
        ));
        rack.submit_compact(&ReorderRequest::new(vec![DeviceId(1), DeviceId(2)]))
            .unwrap();
        assert_eq!(units(&rack), vec![(1, 1), (2, u32::MAX)]);
    }
}
