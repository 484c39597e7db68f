//! Layout engine for computing device, port and callout positions
//!
//! This module takes a rack snapshot and computes the compact layout:
//! devices stacked without gaps, ports placed in clustered grids, and callout
//! bubbles pushed apart so they never overlap.

pub mod callout;
pub mod config;
pub mod engine;
pub mod geometry;
pub mod lint;
pub mod ports;
pub mod stack;
pub mod text;
pub mod types;

pub use callout::{place_callouts, CalloutLayout, Placement};
pub use config::LayoutConfig;
pub use engine::{compute, highlight_ports, mark_drag, mark_overlaps};
pub use geometry::{BoundingBox, CompactOffset, Point, UnitGeometry};
pub use lint::{LintCategory, LintWarning};
pub use ports::{device_port_grid, layout_ports, ports_per_row, PortGrid};
pub use stack::{stack_height, stack_midpoints, stack_offsets, total_units};
pub use types::*;
