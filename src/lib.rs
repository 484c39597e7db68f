//! Rack Layout - compact rack visualisation with drag-to-reorder
//!
//! This library turns a rack snapshot (devices with nested ports plus free-form
//! callouts) into a gap-free stacked layout, places port grids and callout
//! bubbles, drives the drag-to-reorder gesture, and renders the result to SVG.
//!
//! # Example
//!
//! ```rust
//! use rack_layout::render;
//!
//! let svg = render(r#"{"devices": [{"id": 1, "name": "core", "device_type": "switch",
//!     "rack_unit": 3, "unit_size": 1, "ports": []}]}"#).unwrap();
//! assert!(svg.contains("<svg"));
//! ```

pub mod collab;
pub mod error;
pub mod interaction;
pub mod layout;
pub mod model;
pub mod renderer;
pub mod stats;
pub mod stylesheet;

pub use collab::{CollaboratorError, MemoryRack, RackCollaborator};
pub use error::SnapshotError;
pub use interaction::{DragController, DragError, DropOutcome, RackSession, ReorderRequest};
pub use layout::{LayoutConfig, LintWarning, RackLayout};
pub use model::{parse_snapshot, RackSnapshot};
pub use renderer::{render_svg, render_svg_with_stylesheet, SvgConfig};
pub use stats::RackStats;

use thiserror::Error;

pub use stylesheet::{Stylesheet, StylesheetError};

/// Errors that can occur during the render pipeline
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error("stylesheet error: {0}")]
    Stylesheet(#[from] StylesheetError),

    #[error("collaborator error: {0}")]
    Collaborator(#[from] CollaboratorError),

    #[error("drag error: {0}")]
    Drag(#[from] DragError),
}

/// Configuration for the complete render pipeline
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    /// Layout configuration
    pub layout: LayoutConfig,
    /// SVG output configuration
    pub svg: SvgConfig,
    /// Stylesheet for color resolution
    pub stylesheet: Stylesheet,
    /// Debug mode: outline port blocks and dump device geometry
    pub debug: bool,
    /// Collect lint warnings while rendering
    pub lint: bool,
    /// Draw edit-mode decorations
    pub edit_mode: bool,
}

impl RenderConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the layout configuration
    pub fn with_layout(mut self, config: LayoutConfig) -> Self {
        self.layout = config;
        self
    }

    /// Set the SVG configuration
    pub fn with_svg(mut self, config: SvgConfig) -> Self {
        self.svg = config;
        self
    }

    /// Set the stylesheet for color resolution
    pub fn with_stylesheet(mut self, stylesheet: Stylesheet) -> Self {
        self.stylesheet = stylesheet;
        self
    }

    /// Enable or disable debug mode
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_lint(mut self, lint: bool) -> Self {
        self.lint = lint;
        self
    }

    pub fn with_edit_mode(mut self, edit_mode: bool) -> Self {
        self.edit_mode = edit_mode;
        self
    }

    fn svg_config(&self) -> SvgConfig {
        self.svg
            .clone()
            .with_debug(self.debug)
            .with_edit_mode(self.edit_mode)
    }
}

/// Render snapshot JSON to SVG with default configuration
pub fn render(source: &str) -> Result<String, RenderError> {
    render_with_config(source, RenderConfig::default())
}

/// Render snapshot JSON to SVG with custom configuration
///
/// # Example
///
/// ```rust
/// use rack_layout::{render_with_config, LayoutConfig, RenderConfig, SvgConfig};
///
/// let config = RenderConfig::new()
///     .with_layout(LayoutConfig::default().with_unit_height(40.0))
///     .with_svg(SvgConfig::default().with_viewbox_padding(8.0));
///
/// let svg = render_with_config(r#"{"devices": []}"#, config).unwrap();
/// assert!(svg.contains("<svg"));
/// ```
pub fn render_with_config(source: &str, config: RenderConfig) -> Result<String, RenderError> {
    let (svg, warnings) = render_with_lint(source, config)?;
    for warning in &warnings {
        tracing::warn!("{warning}");
    }
    Ok(svg)
}

/// Render snapshot JSON and return the SVG together with lint warnings.
///
/// Warnings are only collected when `config.lint` is set.
pub fn render_with_lint(
    source: &str,
    config: RenderConfig,
) -> Result<(String, Vec<LintWarning>), RenderError> {
    let snapshot = parse_snapshot(source)?;
    let warnings = if config.lint {
        layout::lint::check(&snapshot)
    } else {
        vec![]
    };
    Ok((render_snapshot(&snapshot, &config), warnings))
}

/// Lay out and render an already decoded snapshot.
///
/// With `config.lint` set, devices with overlapping persisted intervals are
/// outlined in the `rack-warning` colour.
pub fn render_snapshot(snapshot: &RackSnapshot, config: &RenderConfig) -> String {
    let mut result = layout::compute(snapshot, &config.layout);
    if config.lint {
        layout::mark_overlaps(&mut result);
    }
    render_layout(&result, config)
}

/// Render a computed layout, e.g. one taken from a [`RackSession`]
pub fn render_layout(result: &RackLayout, config: &RenderConfig) -> String {
    if config.debug {
        eprintln!("=== Layout Debug ===");
        for device in &result.devices {
            let b = device.bounds;
            eprintln!(
                "[{}] {} unit={} y={:.1} h={:.1} ports={} rows={}",
                device.index,
                device.id(),
                device.device.rack_unit.0,
                b.y,
                b.height,
                device.ports.len(),
                device.grid.rows
            );
        }
        for callout in &result.callouts {
            eprintln!(
                "  callout {} -> {} ideal={:.1} y={:.1} h={:.1}",
                callout.callout.id.0,
                callout.device_id,
                callout.ideal_y,
                callout.placed_y(),
                callout.height()
            );
        }
        eprintln!("====================");
    }

    render_svg_with_stylesheet(result, &config.svg_config(), &config.stylesheet)
}
