//! Layout pass: snapshot in, positioned rack out
//!
//! Every pass recomputes everything from the snapshot; nothing is carried
//! between passes.

use std::collections::BTreeSet;

use crate::model::{sort_by_rack_unit, DeviceId, PortId, RackSnapshot};

use super::callout::place_callouts;
use super::config::LayoutConfig;
use super::geometry::{BoundingBox, UnitGeometry};
use super::lint::overlapping_devices;
use super::ports::{device_port_grid, port_block_origin};
use super::stack::{stack_height, stack_offsets, total_units};
use super::types::{DeviceLayout, DropIndicator, PortLayout, RackLayout};

/// Compute the compact layout of a snapshot
pub fn compute(snapshot: &RackSnapshot, config: &LayoutConfig) -> RackLayout {
    let geom = UnitGeometry::new(config);
    let sorted = sort_by_rack_unit(&snapshot.devices);
    let offsets = stack_offsets(&sorted, config);
    let (port_w, port_h) = config.port_size;

    let devices: Vec<DeviceLayout> = sorted
        .iter()
        .zip(offsets)
        .enumerate()
        .map(|(index, (device, offset))| {
            let bounds = BoundingBox::new(
                0.0,
                offset.0,
                config.rack_width,
                geom.height_of(device.unit_size),
            );
            let grid = device_port_grid(device, config);
            let origin = port_block_origin(device, &grid, config);
            let ports = device
                .ports
                .iter()
                .filter_map(|port| {
                    let cell = grid.positions.get(&port.id)?;
                    Some(PortLayout {
                        port: port.clone(),
                        bounds: BoundingBox::new(
                            origin.x + cell.x,
                            bounds.y + origin.y + cell.y,
                            port_w,
                            port_h,
                        ),
                        highlighted: false,
                    })
                })
                .collect();
            DeviceLayout {
                device: device.clone(),
                index,
                offset,
                bounds,
                grid,
                ports,
                dragging: false,
                overlapping: false,
            }
        })
        .collect();

    let callouts = place_callouts(&snapshot.callouts, &sorted, config);
    let height = stack_height(&sorted, config);

    let mut bounds = BoundingBox::new(0.0, 0.0, config.rack_width, height);
    for callout in &callouts {
        bounds = bounds.union(&callout.bounds);
    }

    tracing::debug!(
        devices = devices.len(),
        callouts = callouts.len(),
        height,
        "layout computed"
    );

    RackLayout {
        devices,
        callouts,
        total_units: total_units(&sorted),
        stack_height: height,
        rack_width: config.rack_width,
        unit_column: config.unit_number_width,
        bounds,
        drop_indicator: None,
    }
}

/// Mark the ports matched by a search
pub fn highlight_ports(layout: &mut RackLayout, ids: &BTreeSet<PortId>) {
    for device in &mut layout.devices {
        for port in &mut device.ports {
            port.highlighted = ids.contains(&port.port.id);
        }
    }
}

/// Flag devices whose persisted intervals collide.
///
/// The compact stacking is unaffected; overlapping devices are still laid
/// out one after another.
pub fn mark_overlaps(layout: &mut RackLayout) {
    let devices: Vec<_> = layout.devices.iter().map(|d| d.device.clone()).collect();
    let overlapping = overlapping_devices(&devices);
    for device in &mut layout.devices {
        device.overlapping = overlapping.contains(&device.id());
    }
}

/// Flag the dragged device and place the insertion marker at `drop_index`.
///
/// `drop_index == devices.len()` marks the slot after the last device.
pub fn mark_drag(layout: &mut RackLayout, dragged: DeviceId, drop_index: usize) {
    let mut dragged_height = 0.0;
    for device in &mut layout.devices {
        device.dragging = device.id() == dragged;
        if device.dragging {
            dragged_height = device.bounds.height;
        }
    }

    let y = layout
        .devices
        .get(drop_index)
        .map(|d| d.bounds.y)
        .unwrap_or(layout.stack_height);
    let width = layout
        .devices
        .first()
        .map(|d| d.bounds.width)
        .unwrap_or_default();

    layout.drop_indicator = Some(DropIndicator {
        index: drop_index.min(layout.devices.len()),
        bounds: BoundingBox::new(0.0, y, width, dragged_height),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        Callout, CalloutId, Device, DeviceType, PersistedUnit, Port, PortType, SourceType,
    };

    fn snapshot() -> RackSnapshot {
        let ports = (1..=3)
            .map(|n| Port {
                id: PortId(100 + u64::from(n)),
                port_number: n,
                port_type: PortType::Rj45,
                source_type: SourceType::Free,
                label: None,
            })
            .collect();
        RackSnapshot::new(
            vec![
                Device {
                    id: DeviceId(2),
                    name: "router".to_string(),
                    device_type: DeviceType::Router,
                    rack_unit: PersistedUnit(10),
                    unit_size: 1,
                    port_count: Some(3),
                    notes: None,
                    ports,
                },
                Device {
                    id: DeviceId(1),
                    name: "server".to_string(),
                    device_type: DeviceType::Server,
                    rack_unit: PersistedUnit(2),
                    unit_size: 2,
                    port_count: None,
                    notes: None,
                    ports: vec![],
                },
            ],
            vec![Callout {
                id: CalloutId(1),
                device_id: DeviceId(2),
                text: "new uplink".to_string(),
                color: "green".to_string(),
            }],
        )
    }

    #[test]
    fn test_compute_orders_and_stacks() {
        let config = LayoutConfig::default();
        let layout = compute(&snapshot(), &config);
        assert_eq!(layout.order(), vec![DeviceId(1), DeviceId(2)]);
        assert_eq!(layout.devices[1].bounds.y, 88.0);
        assert_eq!(layout.total_units, 3);
        assert_eq!(layout.stack_height, 132.0);
        assert_eq!(layout.callouts.len(), 1);
        assert!(layout.bounds.right() > config.rack_width);
    }

    #[test]
    fn test_port_positions_are_absolute() {
        let config = LayoutConfig::default();
        let layout = compute(&snapshot(), &config);
        let router = layout.device(DeviceId(2)).expect("router laid out");
        let second = &router.ports[1];
        // router block is centred: (44 - 14) / 2 = 15
        assert_eq!(second.bounds.x, config.port_area_start + 16.0);
        assert_eq!(second.bounds.y, 88.0 + 15.0);
    }

    #[test]
    fn test_highlight_and_drag_marks() {
        let config = LayoutConfig::default();
        let mut layout = compute(&snapshot(), &config);
        highlight_ports(&mut layout, &BTreeSet::from([PortId(102)]));
        let router = layout.device(DeviceId(2)).expect("router laid out");
        assert!(router.ports[1].highlighted);
        assert!(!router.ports[0].highlighted);

        mark_drag(&mut layout, DeviceId(2), 0);
        let indicator = layout.drop_indicator.expect("indicator set");
        assert_eq!(indicator.bounds.y, 0.0);
        assert_eq!(indicator.bounds.height, 44.0);
        assert!(layout.device(DeviceId(2)).map(|d| d.dragging).unwrap_or(false));

        mark_drag(&mut layout, DeviceId(1), 2);
        let indicator = layout.drop_indicator.expect("indicator set");
        assert_eq!(indicator.bounds.y, 132.0);
    }

    #[test]
    fn test_mark_overlaps_keeps_compact_stacking() {
        let config = LayoutConfig::default();
        let mut snap = snapshot();
        // router now sits inside the server's U2-U3
        snap.devices[0].rack_unit = PersistedUnit(3);
        let mut layout = compute(&snap, &config);
        assert!(layout.devices.iter().all(|d| !d.overlapping));

        mark_overlaps(&mut layout);
        assert!(layout.devices.iter().all(|d| d.overlapping));
        assert_eq!(layout.devices[1].bounds.y, 88.0);

        let clean = {
            let mut layout = compute(&snapshot(), &config);
            mark_overlaps(&mut layout);
            layout
        };
        assert!(clean.devices.iter().all(|d| !d.overlapping));
    }
}
