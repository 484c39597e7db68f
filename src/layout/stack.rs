//! Compact (gap-free) vertical stacking of devices
//!
//! This is the only conversion from device order to vertical position. The
//! persisted `rack_unit` decides the initial order and nothing else.

use crate::model::Device;

use super::config::LayoutConfig;
use super::geometry::{CompactOffset, UnitGeometry};

/// Top-edge offset of each device, in the given order.
///
/// `offset[i]` is the sum of the pixel heights of all devices before `i`.
pub fn stack_offsets(devices: &[Device], config: &LayoutConfig) -> Vec<CompactOffset> {
    let geom = UnitGeometry::new(config);
    devices
        .iter()
        .scan(CompactOffset::default(), |next, device| {
            let top = *next;
            *next = top + geom.height_of(device.unit_size);
            Some(top)
        })
        .collect()
}

/// Total stacked height in pixels
pub fn stack_height(devices: &[Device], config: &LayoutConfig) -> f64 {
    let geom = UnitGeometry::new(config);
    devices.iter().map(|d| geom.height_of(d.unit_size)).sum()
}

/// Total stacked height in rack units
pub fn total_units(devices: &[Device]) -> u32 {
    devices
        .iter()
        .fold(0u32, |acc, d| acc.saturating_add(d.unit_size))
}

/// Vertical midpoint of each device in the compact stacking
pub fn stack_midpoints(devices: &[Device], config: &LayoutConfig) -> Vec<f64> {
    let geom = UnitGeometry::new(config);
    stack_offsets(devices, config)
        .into_iter()
        .zip(devices)
        .map(|(top, device)| top.0 + geom.height_of(device.unit_size) / 2.0)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DeviceId, DeviceType, PersistedUnit};

    fn sized(sizes: &[u32]) -> Vec<Device> {
        let mut unit = 1;
        sizes
            .iter()
            .enumerate()
            .map(|(i, &size)| {
                let d = Device {
                    id: DeviceId(i as u64 + 1),
                    name: String::new(),
                    device_type: DeviceType::Other,
                    rack_unit: PersistedUnit(unit),
                    unit_size: size,
                    port_count: None,
                    notes: None,
                    ports: vec![],
                };
                unit += size + 3;
                d
            })
            .collect()
    }

    #[test]
    fn test_prefix_sums() {
        let config = LayoutConfig::default();
        let offsets: Vec<f64> = stack_offsets(&sized(&[1, 2, 1]), &config)
            .into_iter()
            .map(|o| o.0)
            .collect();
        assert_eq!(offsets, vec![0.0, 44.0, 132.0]);
        assert_eq!(stack_height(&sized(&[1, 2, 1]), &config), 176.0);
        assert_eq!(total_units(&sized(&[1, 2, 1])), 4);
    }

    #[test]
    fn test_persisted_gaps_are_ignored() {
        // sized() leaves 3-unit gaps between persisted positions
        let config = LayoutConfig::default();
        let offsets = stack_offsets(&sized(&[2, 2]), &config);
        assert_eq!(offsets[1], CompactOffset(88.0));
    }

    #[test]
    fn test_empty_input() {
        let config = LayoutConfig::default();
        assert!(stack_offsets(&[], &config).is_empty());
        assert_eq!(stack_height(&[], &config), 0.0);
    }

    #[test]
    fn test_total_units_saturates() {
        let mut devices = sized(&[1, 1]);
        devices[0].unit_size = u32::MAX;
        assert_eq!(total_units(&devices), u32::MAX);
    }

    #[test]
    fn test_offsets_are_non_decreasing() {
        let config = LayoutConfig::default();
        let offsets = stack_offsets(&sized(&[3, 1, 4, 1, 5, 9, 2, 6]), &config);
        assert_eq!(offsets[0], CompactOffset(0.0));
        assert!(offsets.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_midpoints() {
        let config = LayoutConfig::default();
        assert_eq!(
            stack_midpoints(&sized(&[1, 2, 1]), &config),
            vec![22.0, 88.0, 154.0]
        );
    }
}
