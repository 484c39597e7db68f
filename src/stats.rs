//! Port occupancy statistics and port search

use std::collections::BTreeSet;
use std::fmt;

use crate::model::{Device, PortId, SourceType};

/// Rack-wide port counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RackStats {
    pub devices: usize,
    pub total_units: u32,
    pub total_ports: usize,
    pub occupied_ports: usize,
    pub free_ports: usize,
    pub agent_ports: usize,
    /// Manual and custom assignments
    pub manual_ports: usize,
    /// Occupied share of all ports, rounded to a whole percent
    pub fill_percent: u32,
}

impl RackStats {
    pub fn from_devices(devices: &[Device]) -> Self {
        let ports = devices.iter().flat_map(|d| &d.ports);
        let mut stats = RackStats {
            devices: devices.len(),
            total_units: devices
                .iter()
                .fold(0u32, |acc, d| acc.saturating_add(d.unit_size)),
            ..Default::default()
        };
        for port in ports {
            stats.total_ports += 1;
            match port.source_type {
                SourceType::Free => stats.free_ports += 1,
                SourceType::AssignedAgent => stats.agent_ports += 1,
                SourceType::AssignedManual | SourceType::AssignedCustom => stats.manual_ports += 1,
            }
        }
        stats.occupied_ports = stats.total_ports - stats.free_ports;
        if stats.total_ports > 0 {
            stats.fill_percent =
                (stats.occupied_ports as f64 / stats.total_ports as f64 * 100.0).round() as u32;
        }
        stats
    }
}

impl fmt::Display for RackStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "devices:  {} ({}U)", self.devices, self.total_units)?;
        writeln!(
            f,
            "ports:    {} total, {} occupied, {} free",
            self.total_ports, self.occupied_ports, self.free_ports
        )?;
        writeln!(
            f,
            "assigned: {} agent, {} manual",
            self.agent_ports, self.manual_ports
        )?;
        write!(f, "fill:     {}%", self.fill_percent)
    }
}

/// Assigned ports matching `query` by device name, port label or port number.
///
/// Matching is case-insensitive substring; an empty query matches nothing.
pub fn search_ports(devices: &[Device], query: &str) -> BTreeSet<PortId> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return BTreeSet::new();
    }

    let mut ids = BTreeSet::new();
    for device in devices {
        let device_match = device.name.to_lowercase().contains(&q);
        for port in &device.ports {
            if !port.source_type.is_assigned() {
                continue;
            }
            let label_match = port
                .label
                .as_deref()
                .is_some_and(|l| l.to_lowercase().contains(&q));
            if device_match || label_match || port.port_number.to_string().contains(&q) {
                ids.insert(port.id);
            }
        }
    }
    ids
}
