//! Port grid placement inside a device faceplate
//!
//! Ports are laid out in rows of clustered cells. Every `group_size` columns an
//! extra `group_gap` separates the clusters. Patch panels always use two rows
//! (first half on top); everything else wraps at a fixed per-row cap.

use std::collections::BTreeMap;

use crate::model::{Device, Port, PortId};

use super::config::LayoutConfig;
use super::geometry::{Point, UnitGeometry};

/// Computed port positions for one device
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PortGrid {
    /// Cell origin of each port, relative to the port block origin
    pub positions: BTreeMap<PortId, Point>,
    pub ports_per_row: usize,
    pub rows: usize,
    /// Height from the top of the first row to the bottom of the last cell
    pub block_height: f64,
}

/// Ports per row as the device type dictates
pub fn ports_per_row(device: &Device, config: &LayoutConfig) -> usize {
    let count = device.ports.len();
    if device.device_type.is_double_row() {
        count.div_ceil(2)
    } else {
        count.min(config.max_ports_per_row)
    }
}

/// Local cell origin of the port at `index` in port-number order
pub fn cell_position(
    index: usize,
    is_double_row: bool,
    ports_per_row: usize,
    geom: &UnitGeometry<'_>,
) -> Point {
    let per_row = ports_per_row.max(1);
    let (row, col) = if is_double_row {
        if index < per_row {
            (0, index)
        } else {
            (1, index - per_row)
        }
    } else {
        (index / per_row, index % per_row)
    };

    let group = col / geom.group_size();
    let x = col as f64 * geom.port_pitch() + group as f64 * geom.group_gap();
    let y = row as f64 * geom.row_pitch(is_double_row);
    Point::new(x, y)
}

/// Lay out ports by their rank in port-number order.
///
/// The input order is irrelevant; ties on `port_number` keep input order.
pub fn layout_ports(
    ports: &[Port],
    is_double_row: bool,
    ports_per_row: usize,
    geom: &UnitGeometry<'_>,
) -> BTreeMap<PortId, Point> {
    let mut ranked: Vec<&Port> = ports.iter().collect();
    ranked.sort_by_key(|p| p.port_number);

    ranked
        .into_iter()
        .enumerate()
        .map(|(i, port)| {
            (
                port.id,
                cell_position(i, is_double_row, ports_per_row, geom),
            )
        })
        .collect()
}

/// Full port grid for a device, including row count and block height
pub fn device_port_grid(device: &Device, config: &LayoutConfig) -> PortGrid {
    let geom = UnitGeometry::new(config);
    let double_row = device.device_type.is_double_row();
    let per_row = ports_per_row(device, config);

    if device.ports.is_empty() || per_row == 0 {
        return PortGrid::default();
    }

    let rows = if double_row {
        2
    } else {
        device.ports.len().div_ceil(per_row)
    };
    let pitch = geom.row_pitch(double_row);
    let block_height = rows as f64 * pitch - (pitch - config.port_size.1);

    PortGrid {
        positions: layout_ports(&device.ports, double_row, per_row, &geom),
        ports_per_row: per_row,
        rows,
        block_height,
    }
}

/// Origin of the port block relative to the device's top-left corner.
///
/// The block is centred vertically; switch-class devices reserve room for
/// their status LEDs above the first row.
pub fn port_block_origin(device: &Device, grid: &PortGrid, config: &LayoutConfig) -> Point {
    let geom = UnitGeometry::new(config);
    let height = geom.height_of(device.unit_size);
    let led = if device.device_type.has_status_leds() {
        config.status_led_height
    } else {
        0.0
    };
    let y = (height - grid.block_height - led) / 2.0 + led;
    Point::new(config.port_area_start, y)
}
