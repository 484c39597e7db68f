//! Application state for an interactive rack view
//!
//! A `RackSession` is passed by reference into input handlers. It owns the
//! current snapshot, view flags and the single drag controller, and forwards
//! finished permutations to the collaborator.

use std::collections::BTreeSet;

use crate::collab::{CollaboratorError, RackCollaborator};
use crate::layout::{self, LayoutConfig, RackLayout};
use crate::model::{Device, DeviceId, PortId, RackSnapshot};
use crate::stats::search_ports;

use super::drag::{DragController, DropOutcome};
use super::error::DragError;
use super::reorder::{compact_order, move_adjacent, Direction, ReorderRequest};

/// Mutable view state plus the collaborator it talks to
pub struct RackSession<C: RackCollaborator> {
    collaborator: C,
    config: LayoutConfig,
    snapshot: RackSnapshot,
    edit_mode: bool,
    selected_port: Option<(DeviceId, PortId)>,
    search: String,
    drag: DragController,
}

impl<C: RackCollaborator> RackSession<C> {
    /// Create a session and fetch the initial snapshot
    pub fn new(collaborator: C, config: LayoutConfig) -> Result<Self, CollaboratorError> {
        let mut session = Self {
            collaborator,
            config,
            snapshot: RackSnapshot::default(),
            edit_mode: false,
            selected_port: None,
            search: String::new(),
            drag: DragController::new(),
        };
        session.refresh()?;
        Ok(session)
    }

    /// Replace the snapshot with a fresh fetch
    pub fn refresh(&mut self) -> Result<(), CollaboratorError> {
        let devices = self.collaborator.fetch_devices()?;
        let callouts = self.collaborator.fetch_callouts()?;
        let snapshot = RackSnapshot::new(devices, callouts);
        snapshot.validate()?;
        self.snapshot = snapshot;
        if let Some((device, port)) = self.selected_port {
            let still_there = self
                .snapshot
                .device(device)
                .is_some_and(|d| d.ports.iter().any(|p| p.id == port));
            if !still_there {
                self.selected_port = None;
            }
        }
        Ok(())
    }

    pub fn snapshot(&self) -> &RackSnapshot {
        &self.snapshot
    }

    pub fn collaborator(&self) -> &C {
        &self.collaborator
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn edit_mode(&self) -> bool {
        self.edit_mode
    }

    pub fn set_edit_mode(&mut self, edit_mode: bool) {
        self.edit_mode = edit_mode;
    }

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    pub fn selected_port(&self) -> Option<(DeviceId, PortId)> {
        self.selected_port
    }

    /// Select a port. Free ports are only selectable in edit mode.
    pub fn select_port(&mut self, port_id: PortId) -> Option<(DeviceId, PortId)> {
        let edit_mode = self.edit_mode;
        self.selected_port = self.snapshot.devices.iter().find_map(|d| {
            d.ports
                .iter()
                .find(|p| p.id == port_id && (edit_mode || p.source_type.is_assigned()))
                .map(|p| (d.id, p.id))
        });
        self.selected_port
    }

    pub fn clear_selection(&mut self) {
        self.selected_port = None;
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    /// Ports matched by the current search
    pub fn search_matches(&self) -> BTreeSet<PortId> {
        search_ports(&self.snapshot.devices, &self.search)
    }

    /// Devices in compact order
    pub fn sorted_devices(&self) -> Vec<Device> {
        self.snapshot.sorted_devices()
    }

    /// Pointer pressed on a device's drag handle
    pub fn pointer_down(&mut self, device_id: DeviceId, pointer_y: f64) -> Result<(), DragError> {
        let devices = self.sorted_devices();
        self.drag
            .start(self.edit_mode, device_id, &devices, pointer_y)
            .inspect_err(|e| tracing::debug!("drag not started: {e}"))
    }

    /// Pointer moved, in stack-local Y
    pub fn pointer_move(&mut self, pointer_y: f64) -> Option<usize> {
        if !self.drag.is_dragging() {
            return None;
        }
        let devices = self.sorted_devices();
        self.drag.update(pointer_y, &devices, &self.config)
    }

    /// Pointer released; a reorder, if any, is submitted before returning
    pub fn pointer_up(&mut self) -> DropOutcome {
        let order = self.snapshot.order();
        let outcome = self.drag.release(&order);
        if let DropOutcome::Reorder(request) = &outcome {
            self.submit(request, false);
        }
        outcome
    }

    /// Pointer left the tracked surface; behaves exactly like release
    pub fn pointer_leave(&mut self) -> DropOutcome {
        self.pointer_up()
    }

    /// Swap a device with its neighbour. Returns whether a move was submitted.
    pub fn move_device(&mut self, device_id: DeviceId, direction: Direction) -> bool {
        if !self.edit_mode {
            return false;
        }
        match move_adjacent(&self.snapshot.order(), device_id, direction) {
            Some(order) => {
                self.submit(&ReorderRequest::new(order), false);
                true
            }
            None => false,
        }
    }

    /// Resubmit the current order so the persisted units lose their gaps
    pub fn compact(&mut self) {
        let request = ReorderRequest::new(compact_order(&self.snapshot.devices));
        self.submit(&request, true);
    }

    /// Hand a request off and re-fetch. Failures are logged, never retried.
    fn submit(&mut self, request: &ReorderRequest, compact: bool) {
        let result = if compact {
            self.collaborator.submit_compact(request)
        } else {
            self.collaborator.submit_reorder(request)
        };
        if let Err(e) = result {
            tracing::warn!("reorder submission failed: {e}");
        }
        if let Err(e) = self.refresh() {
            tracing::warn!("re-fetch after reorder failed: {e}");
        }
    }

    /// Lay out the current snapshot with search highlights and drag marks
    pub fn layout(&self) -> RackLayout {
        let mut result = layout::compute(&self.snapshot, &self.config);
        if !self.search.trim().is_empty() {
            layout::highlight_ports(&mut result, &self.search_matches());
        }
        if let Some(g) = self.drag.gesture() {
            layout::mark_drag(&mut result, g.device_id, g.drop_index);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collab::MemoryRack;
    use crate::model::{DeviceType, PersistedUnit, Port, PortType, SourceType};

    fn rack() -> MemoryRack {
        let device = |id: u64, unit: u32, size: u32| Device {
            id: DeviceId(id),
            name: format!("dev{id}"),
            device_type: DeviceType::Switch,
            rack_unit: PersistedUnit(unit),
            unit_size: size,
            port_count: None,
            notes: None,
            ports: vec![Port {
                id: PortId(id * 100),
                port_number: 1,
                port_type: PortType::Rj45,
                source_type: if id == 1 {
                    SourceType::AssignedManual
                } else {
                    SourceType::Free
                },
                label: Some(format!("host{id}")),
            }],
        };
        MemoryRack::new(RackSnapshot::new(
            vec![device(1, 1, 1), device(2, 4, 2), device(3, 9, 1)],
            vec![],
        ))
    }

    fn order_of(session: &RackSession<MemoryRack>) -> Vec<u64> {
        session.snapshot().order().iter().map(|d| d.0).collect()
    }

    #[test]
    fn test_drag_outside_edit_mode_is_refused() {
        let mut session = RackSession::new(rack(), LayoutConfig::default()).unwrap();
        assert_eq!(
            session.pointer_down(DeviceId(3), 150.0),
            Err(DragError::NotEditMode)
        );
        assert_eq!(session.pointer_move(0.0), None);
        assert_eq!(session.pointer_up(), DropOutcome::NoOp);
    }

    #[test]
    fn test_drag_submits_and_refetches() {
        let mut session = RackSession::new(rack(), LayoutConfig::default()).unwrap();
        session.set_edit_mode(true);
        session.pointer_down(DeviceId(3), 150.0).unwrap();
        assert_eq!(session.pointer_move(10.0), Some(0));
        assert!(session.layout().drop_indicator.is_some());

        let outcome = session.pointer_leave();
        assert!(matches!(outcome, DropOutcome::Reorder(_)));
        assert_eq!(order_of(&session), vec![3, 1, 2]);
        assert_eq!(session.collaborator().submissions(), 1);
        assert!(session.layout().drop_indicator.is_none());
    }

    #[test]
    fn test_rejected_reorder_keeps_fetched_state() {
        let mut backend = rack();
        backend.reject_next("concurrent edit");
        let mut session = RackSession::new(backend, LayoutConfig::default()).unwrap();
        session.set_edit_mode(true);
        session.pointer_down(DeviceId(3), 150.0).unwrap();
        session.pointer_move(0.0);
        session.pointer_up();
        assert_eq!(order_of(&session), vec![1, 2, 3]);
        assert!(!session.drag().is_dragging());
    }

    #[test]
    fn test_move_and_compact() {
        let mut session = RackSession::new(rack(), LayoutConfig::default()).unwrap();
        assert!(!session.move_device(DeviceId(1), Direction::Down));
        session.set_edit_mode(true);
        assert!(session.move_device(DeviceId(1), Direction::Down));
        assert_eq!(order_of(&session), vec![2, 1, 3]);
        assert!(!session.move_device(DeviceId(3), Direction::Down));

        session.compact();
        let units: Vec<u32> = session
            .sorted_devices()
            .iter()
            .map(|d| d.rack_unit.0)
            .collect();
        assert_eq!(units, vec![1, 3, 4]);
    }

    #[test]
    fn test_selection_and_search() {
        let mut session = RackSession::new(rack(), LayoutConfig::default()).unwrap();
        assert_eq!(session.select_port(PortId(200)), None);
        assert_eq!(
            session.select_port(PortId(100)),
            Some((DeviceId(1), PortId(100)))
        );
        session.set_edit_mode(true);
        assert_eq!(
            session.select_port(PortId(200)),
            Some((DeviceId(2), PortId(200)))
        );

        session.set_search("HOST1");
        assert_eq!(session.search_matches(), BTreeSet::from([PortId(100)]));
        let layout = session.layout();
        assert!(layout.device(DeviceId(1)).unwrap().ports[0].highlighted);
    }
}
