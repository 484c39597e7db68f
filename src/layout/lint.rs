//! Lint checks for rack snapshots.
//!
//! Parsing only rejects a `unit_size` of zero. Everything else the
//! persistence side should have prevented is laid out as given and reported
//! here: duplicate device ids, overlapping persisted intervals, gaps that a
//! compaction would remove, duplicate port numbers and callouts pointing at
//! missing devices.

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use crate::model::{sort_by_rack_unit, Device, DeviceId, RackSnapshot};

/// A lint warning about a snapshot defect
#[derive(Debug, Clone, PartialEq)]
pub struct LintWarning {
    pub category: LintCategory,
    pub message: String,
}

/// Category of lint defect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintCategory {
    Duplicate,
    Overlap,
    Gap,
    Port,
    Callout,
}

impl fmt::Display for LintCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintCategory::Duplicate => write!(f, "duplicate"),
            LintCategory::Overlap => write!(f, "overlap"),
            LintCategory::Gap => write!(f, "gap"),
            LintCategory::Port => write!(f, "port"),
            LintCategory::Callout => write!(f, "callout"),
        }
    }
}

impl fmt::Display for LintWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.category, self.message)
    }
}

/// Run all lint checks on a snapshot.
pub fn check(snapshot: &RackSnapshot) -> Vec<LintWarning> {
    let mut warnings = Vec::new();
    let sorted = sort_by_rack_unit(&snapshot.devices);
    check_duplicates(&sorted, &mut warnings);
    check_overlaps(&sorted, &mut warnings);
    check_gaps(&sorted, &mut warnings);
    check_ports(&sorted, &mut warnings);
    check_callouts(snapshot, &mut warnings);
    warnings
}

fn display_name(device: &Device) -> String {
    if device.name.is_empty() {
        format!("device {}", device.id)
    } else {
        format!("\"{}\"", device.name)
    }
}

// ── Duplicate device ids ──────────────────────────────────────────

fn check_duplicates(sorted: &[Device], warnings: &mut Vec<LintWarning>) {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    for device in sorted {
        if !seen.insert(device.id) && reported.insert(device.id) {
            warnings.push(LintWarning {
                category: LintCategory::Duplicate,
                message: format!("device id {} appears more than once", device.id),
            });
        }
    }
}

// ── Overlapping persisted intervals ───────────────────────────────

/// Pairs of devices whose persisted intervals intersect, in rack order
fn overlapping_pairs(sorted: &[Device]) -> Vec<(&Device, &Device)> {
    let mut pairs = Vec::new();
    for (i, a) in sorted.iter().enumerate() {
        let span_a = a.persisted_span();
        for b in &sorted[i + 1..] {
            // sorted by start, so nothing later can overlap either
            if b.persisted_span().start >= span_a.end {
                break;
            }
            pairs.push((a, b));
        }
    }
    pairs
}

/// Ids of every device that shares a persisted unit with another device.
///
/// The layout uses this to flag devices when linting is enabled.
pub fn overlapping_devices(devices: &[Device]) -> BTreeSet<DeviceId> {
    let sorted = sort_by_rack_unit(devices);
    let pairs = overlapping_pairs(&sorted);
    pairs
        .into_iter()
        .flat_map(|(a, b)| [a.id, b.id])
        .collect()
}

fn check_overlaps(sorted: &[Device], warnings: &mut Vec<LintWarning>) {
    for (a, b) in overlapping_pairs(sorted) {
        let (span_a, span_b) = (a.persisted_span(), b.persisted_span());
        warnings.push(LintWarning {
            category: LintCategory::Overlap,
            message: format!(
                "{} (U{}-U{}) overlaps {} (U{}-U{})",
                display_name(a),
                span_a.start,
                span_a.end - 1,
                display_name(b),
                span_b.start,
                span_b.end - 1
            ),
        });
    }
}

// ── Gaps between persisted positions ──────────────────────────────

fn check_gaps(sorted: &[Device], warnings: &mut Vec<LintWarning>) {
    let mut next_free: u64 = 1;
    for device in sorted {
        let start = device.persisted_span().start;
        if start > next_free {
            warnings.push(LintWarning {
                category: LintCategory::Gap,
                message: format!(
                    "U{}-U{} empty above {}; compact to close the gap",
                    next_free,
                    start - 1,
                    display_name(device)
                ),
            });
        }
        next_free = next_free.max(device.persisted_span().end);
    }
}

// ── Duplicate port numbers ────────────────────────────────────────

fn check_ports(sorted: &[Device], warnings: &mut Vec<LintWarning>) {
    for device in sorted {
        let mut seen = HashSet::new();
        for port in &device.ports {
            if !seen.insert(port.port_number) {
                warnings.push(LintWarning {
                    category: LintCategory::Port,
                    message: format!(
                        "{} has more than one port numbered {}",
                        display_name(device),
                        port.port_number
                    ),
                });
            }
        }
    }
}

// ── Dangling callouts ─────────────────────────────────────────────

fn check_callouts(snapshot: &RackSnapshot, warnings: &mut Vec<LintWarning>) {
    let ids: HashSet<_> = snapshot.devices.iter().map(|d| d.id).collect();
    for callout in &snapshot.callouts {
        if !ids.contains(&callout.device_id) {
            warnings.push(LintWarning {
                category: LintCategory::Callout,
                message: format!(
                    "callout {} refers to missing device {}",
                    callout.id.0, callout.device_id
                ),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        Callout, CalloutId, DeviceId, DeviceType, PersistedUnit, Port, PortId, PortType,
        SourceType,
    };

    fn device(id: u64, name: &str, unit: u32, size: u32) -> Device {
        Device {
            id: DeviceId(id),
            name: name.to_string(),
            device_type: DeviceType::Switch,
            rack_unit: PersistedUnit(unit),
            unit_size: size,
            port_count: None,
            notes: None,
            ports: vec![],
        }
    }

    #[test]
    fn test_clean_snapshot() {
        let snap = RackSnapshot::new(vec![device(1, "a", 1, 2), device(2, "b", 3, 1)], vec![]);
        assert!(check(&snap).is_empty());
    }

    #[test]
    fn test_overlap_detected() {
        let snap = RackSnapshot::new(vec![device(1, "a", 1, 3), device(2, "b", 2, 1)], vec![]);
        let warnings = check(&snap);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].category, LintCategory::Overlap);
        assert!(warnings[0].message.contains("\"a\""));
        assert!(warnings[0].message.contains("\"b\""));
    }

    #[test]
    fn test_gap_detected() {
        let snap = RackSnapshot::new(vec![device(1, "a", 1, 1), device(2, "", 4, 1)], vec![]);
        let warnings = check(&snap);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].category, LintCategory::Gap);
        assert!(warnings[0].message.contains("U2-U3"));
        assert!(warnings[0].message.contains("device 2"));
    }

    #[test]
    fn test_duplicate_port_number() {
        let mut dev = device(1, "sw", 1, 1);
        for id in 0..2 {
            dev.ports.push(Port {
                id: PortId(id),
                port_number: 5,
                port_type: PortType::Rj45,
                source_type: SourceType::Free,
                label: None,
            });
        }
        let warnings = check(&RackSnapshot::new(vec![dev], vec![]));
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].to_string(), "port: \"sw\" has more than one port numbered 5");
    }

    #[test]
    fn test_dangling_callout() {
        let snap = RackSnapshot::new(
            vec![device(1, "a", 1, 1)],
            vec![Callout {
                id: CalloutId(9),
                device_id: DeviceId(42),
                text: "old".to_string(),
                color: "red".to_string(),
            }],
        );
        let warnings = check(&snap);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].category, LintCategory::Callout);
    }

    #[test]
    fn test_duplicate_device_id_reported_once() {
        let snap = RackSnapshot::new(
            vec![device(1, "a", 1, 1), device(1, "b", 2, 1), device(1, "c", 3, 1)],
            vec![],
        );
        let warnings = check(&snap);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].to_string(), "duplicate: device id 1 appears more than once");
    }

    #[test]
    fn test_overlapping_devices() {
        let devices = vec![
            device(1, "a", 1, 3),
            device(2, "b", 2, 1),
            device(3, "c", 4, 1),
            device(4, "d", 6, 2),
            device(5, "e", 7, 1),
        ];
        assert_eq!(
            overlapping_devices(&devices),
            BTreeSet::from([DeviceId(1), DeviceId(2), DeviceId(4), DeviceId(5)])
        );
        assert!(overlapping_devices(&devices[2..4]).is_empty());
    }

    #[test]
    fn test_top_of_range_does_not_overflow() {
        let snap = RackSnapshot::new(
            vec![device(1, "a", 1, 1), device(2, "b", u32::MAX, 2), device(3, "c", u32::MAX - 1, u32::MAX)],
            vec![],
        );
        let categories: Vec<_> = check(&snap).into_iter().map(|w| w.category).collect();
        assert!(categories.contains(&LintCategory::Gap));
        assert!(overlapping_devices(&snap.devices).contains(&DeviceId(3)));
    }
}
