//! SVG renderer for rack layouts
//!
//! This module takes a RackLayout and produces an SVG string with
//! prefixed CSS classes and colours resolved from a stylesheet.

pub mod config;
pub mod svg;

pub use config::SvgConfig;
pub use svg::{render_svg, render_svg_with_stylesheet, SvgBuilder, TextAnchor};
