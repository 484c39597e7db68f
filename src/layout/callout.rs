//! Callout bubble placement
//!
//! Bubbles sit in a column to the right of the rack, each ideally centred on
//! its device. A single top-to-bottom sweep pushes bubbles down until
//! `placed[i + 1].y >= placed[i].y + placed[i].height + min_gap`. Bubbles are
//! never moved above their ideal position, so reading order follows device
//! order.

use std::collections::HashMap;

use crate::model::{sort_by_rack_unit, Callout, Device, DeviceId};

use super::config::LayoutConfig;
use super::geometry::{BoundingBox, Point, UnitGeometry};
use super::stack::stack_offsets;
use super::text::wrap_text;

/// Vertical extent of one bubble during the collision sweep
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub ideal_y: f64,
    pub y: f64,
    pub height: f64,
}

impl Placement {
    pub fn new(ideal_y: f64, height: f64) -> Self {
        Self {
            ideal_y,
            y: ideal_y,
            height,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Push placements down so adjacent ones keep `min_gap` between them.
///
/// `placements` must already be sorted by `ideal_y`.
pub fn sweep(placements: &mut [Placement], min_gap: f64) {
    let mut floor: Option<f64> = None;
    for p in placements.iter_mut() {
        p.y = match floor {
            Some(limit) if p.ideal_y < limit => limit,
            _ => p.ideal_y,
        };
        floor = Some(p.bottom() + min_gap);
    }
}

/// A placed callout bubble
#[derive(Debug, Clone, PartialEq)]
pub struct CalloutLayout {
    pub callout: Callout,
    pub device_id: DeviceId,
    pub lines: Vec<String>,
    /// Device centre minus half the bubble height
    pub ideal_y: f64,
    pub bounds: BoundingBox,
    /// Point on the device's right edge the connector starts from
    pub anchor: Point,
    /// Connector polyline from `anchor` to the bubble's left edge
    pub connector: Vec<Point>,
}

impl CalloutLayout {
    pub fn placed_y(&self) -> f64 {
        self.bounds.y
    }

    pub fn height(&self) -> f64 {
        self.bounds.height
    }
}

/// Bubble height for a callout's wrapped text
pub fn bubble_height(lines: usize, config: &LayoutConfig) -> f64 {
    config.callout_base_height + lines as f64 * config.callout_line_height
}

/// Place callouts next to their devices.
///
/// Callouts whose device is not in `devices` are dropped. The result is in
/// ideal-Y order.
pub fn place_callouts(
    callouts: &[Callout],
    devices: &[Device],
    config: &LayoutConfig,
) -> Vec<CalloutLayout> {
    let geom = UnitGeometry::new(config);
    let sorted = sort_by_rack_unit(devices);
    let offsets = stack_offsets(&sorted, config);

    let centers: HashMap<DeviceId, f64> = sorted
        .iter()
        .zip(&offsets)
        .map(|(d, top)| (d.id, top.0 + geom.height_of(d.unit_size) / 2.0))
        .collect();

    let mut items: Vec<(Callout, f64, Vec<String>)> = Vec::with_capacity(callouts.len());
    for callout in callouts {
        let Some(&center) = centers.get(&callout.device_id) else {
            tracing::debug!(
                callout = callout.id.0,
                device = %callout.device_id,
                "dropping callout for missing device"
            );
            continue;
        };
        let lines = wrap_text(&callout.text, config.callout_columns);
        items.push((callout.clone(), center, lines));
    }

    let mut placements: Vec<Placement> = items
        .iter()
        .map(|(_, center, lines)| {
            let height = bubble_height(lines.len(), config);
            Placement::new(center - height / 2.0, height)
        })
        .collect();

    let mut order: Vec<usize> = (0..items.len()).collect();
    order.sort_by(|&a, &b| placements[a].ideal_y.total_cmp(&placements[b].ideal_y));
    let mut sorted_placements: Vec<Placement> = order.iter().map(|&i| placements[i]).collect();
    sweep(&mut sorted_placements, config.callout_min_gap);
    for (slot, &i) in order.iter().enumerate() {
        placements[i] = sorted_placements[slot];
    }

    let bubble_x = config.rack_width + config.callout_offset;
    order
        .into_iter()
        .map(|i| {
            let (callout, center, lines) = items[i].clone();
            let p = placements[i];
            let bounds = BoundingBox::new(bubble_x, p.y, config.callout_width, p.height);
            let anchor = Point::new(config.rack_width, center);
            let connector = connector_path(anchor, &bounds);
            CalloutLayout {
                device_id: callout.device_id,
                callout,
                lines,
                ideal_y: p.ideal_y,
                bounds,
                anchor,
                connector,
            }
        })
        .collect()
}

/// Elbow connector from the device edge to the middle of the bubble's left side
fn connector_path(anchor: Point, bubble: &BoundingBox) -> Vec<Point> {
    let target = Point::new(bubble.x, bubble.center().y);
    if (target.y - anchor.y).abs() < f64::EPSILON {
        return vec![anchor, target];
    }
    let elbow_x = anchor.x + (bubble.x - anchor.x) / 2.0;
    vec![
        anchor,
        Point::new(elbow_x, anchor.y),
        Point::new(elbow_x, target.y),
        target,
    ]
}
