//! Rack data model: devices, ports and callouts
//!
//! These are read-only snapshot values handed to the layout pass. Field names
//! follow the wire shape used by the persistence service.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Device identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(pub u64);

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Port identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PortId(pub u64);

impl fmt::Display for PortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Callout identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalloutId(pub u64);

/// Persisted top rack unit of a device (1-based).
///
/// Only meaningful for establishing sort order; vertical placement always
/// goes through [`crate::layout::stack_offsets`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PersistedUnit(pub u32);

/// Device classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceType {
    PatchPanel,
    Switch,
    Hub,
    Router,
    Server,
    PoeSwitch,
    #[serde(rename = "isp", alias = "isp_switch")]
    IspSwitch,
    AuthRouter,
    #[default]
    #[serde(other)]
    Other,
}

impl DeviceType {
    /// Patch panels lay their ports out in two fixed rows
    pub fn is_double_row(self) -> bool {
        matches!(self, DeviceType::PatchPanel)
    }

    /// Switch-class devices carry a row of status LEDs above the ports
    pub fn has_status_leds(self) -> bool {
        matches!(
            self,
            DeviceType::Switch | DeviceType::Hub | DeviceType::PoeSwitch | DeviceType::IspSwitch
        )
    }

    /// Short badge text
    pub fn badge(self) -> &'static str {
        match self {
            DeviceType::PatchPanel => "PP",
            DeviceType::Switch => "SW",
            DeviceType::Hub => "HUB",
            DeviceType::Router => "RTR",
            DeviceType::Server => "SRV",
            DeviceType::PoeSwitch => "PoE",
            DeviceType::IspSwitch => "ISP",
            DeviceType::AuthRouter => "AUTH",
            DeviceType::Other => "?",
        }
    }

    /// Stylesheet token suffix
    pub fn token(self) -> &'static str {
        match self {
            DeviceType::PatchPanel => "patch-panel",
            DeviceType::Switch => "switch",
            DeviceType::Hub => "hub",
            DeviceType::Router => "router",
            DeviceType::Server => "server",
            DeviceType::PoeSwitch => "poe-switch",
            DeviceType::IspSwitch => "isp-switch",
            DeviceType::AuthRouter => "auth-router",
            DeviceType::Other => "other",
        }
    }
}

/// Physical port classification (display only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PortType {
    #[default]
    Rj45,
    Sfp,
    Uplink,
}

/// How a port got its assignment (display only, never affects layout)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    #[default]
    Free,
    /// Assigned from the remote agent inventory
    #[serde(rename = "mc", alias = "agent")]
    AssignedAgent,
    #[serde(rename = "manual")]
    AssignedManual,
    #[serde(rename = "custom")]
    AssignedCustom,
}

impl SourceType {
    pub fn is_assigned(self) -> bool {
        !matches!(self, SourceType::Free)
    }

    pub fn token(self) -> &'static str {
        match self {
            SourceType::Free => "free",
            SourceType::AssignedAgent => "agent",
            SourceType::AssignedManual => "manual",
            SourceType::AssignedCustom => "custom",
        }
    }
}

/// A single port on a device faceplate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Port {
    pub id: PortId,
    pub port_number: u32,
    #[serde(default)]
    pub port_type: PortType,
    #[serde(default)]
    pub source_type: SourceType,
    #[serde(default)]
    pub label: Option<String>,
}

/// A rack-mounted device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub device_type: DeviceType,
    pub rack_unit: PersistedUnit,
    pub unit_size: u32,
    #[serde(default)]
    pub port_count: Option<u32>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub ports: Vec<Port>,
}

impl Device {
    /// Persisted interval `[rack_unit, rack_unit + unit_size)`, widened so
    /// devices near `u32::MAX` cannot overflow
    pub fn persisted_span(&self) -> std::ops::Range<u64> {
        let start = u64::from(self.rack_unit.0);
        start..start + u64::from(self.unit_size)
    }
}

fn default_callout_color() -> String {
    "yellow".to_string()
}

/// A free-text annotation anchored to a device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Callout {
    pub id: CalloutId,
    /// Weak reference; unresolved callouts are dropped from layout
    pub device_id: DeviceId,
    pub text: String,
    #[serde(default = "default_callout_color")]
    pub color: String,
}

/// Sort devices by persisted rack unit, ties broken by id.
pub fn sort_by_rack_unit(devices: &[Device]) -> Vec<Device> {
    let mut sorted = devices.to_vec();
    sorted.sort_by_key(|d| (d.rack_unit, d.id));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_type_wire_names() {
        let ty: DeviceType = serde_json::from_str(r#""patch_panel""#).unwrap();
        assert_eq!(ty, DeviceType::PatchPanel);
        let ty: DeviceType = serde_json::from_str(r#""isp""#).unwrap();
        assert_eq!(ty, DeviceType::IspSwitch);
        let ty: DeviceType = serde_json::from_str(r#""toaster""#).unwrap();
        assert_eq!(ty, DeviceType::Other);
    }

    #[test]
    fn test_source_type_agent_alias() {
        let src: SourceType = serde_json::from_str(r#""mc""#).unwrap();
        assert_eq!(src, SourceType::AssignedAgent);
        assert!(src.is_assigned());
        assert!(!SourceType::Free.is_assigned());
    }

    #[test]
    fn test_sort_by_rack_unit_breaks_ties_by_id() {
        let mk = |id, unit| Device {
            id: DeviceId(id),
            name: String::new(),
            device_type: DeviceType::Other,
            rack_unit: PersistedUnit(unit),
            unit_size: 1,
            port_count: None,
            notes: None,
            ports: vec![],
        };
        let sorted = sort_by_rack_unit(&[mk(3, 5), mk(2, 1), mk(1, 5)]);
        let ids: Vec<u64> = sorted.iter().map(|d| d.id.0).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn test_persisted_span_past_u32_max() {
        let device = Device {
            id: DeviceId(1),
            name: String::new(),
            device_type: DeviceType::Other,
            rack_unit: PersistedUnit(u32::MAX),
            unit_size: 2,
            port_count: None,
            notes: None,
            ports: vec![],
        };
        assert_eq!(device.persisted_span(), 4294967295..4294967297);
    }

    #[test]
    fn test_callout_color_defaults_to_yellow() {
        let c: Callout = serde_json::from_str(r#"{"id":1,"device_id":2,"text":"hi"}"#).unwrap();
        assert_eq!(c.color, "yellow");
    }
}
