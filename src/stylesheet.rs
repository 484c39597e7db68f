//! Stylesheet system for rack colours
//!
//! Device types, port assignment states and callout colour tags resolve to
//! concrete colours through a TOML stylesheet, so the same layout can be
//! rendered with different palettes.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading or parsing stylesheets
#[derive(Error, Debug)]
pub enum StylesheetError {
    #[error("Failed to read stylesheet file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse stylesheet TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// A stylesheet mapping colour tokens to concrete values
#[derive(Debug, Clone)]
pub struct Stylesheet {
    pub name: Option<String>,
    pub description: Option<String>,
    /// Colour mappings: token name -> hex colour
    pub colors: HashMap<String, String>,
}

/// TOML structure for deserializing stylesheets
#[derive(Deserialize)]
struct TomlStylesheet {
    metadata: Option<TomlMetadata>,
    colors: HashMap<String, String>,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
    description: Option<String>,
}

/// Default palette: dark rack frame, per-type stripe colours
const DEFAULT_PALETTE: &str = r##"
[colors]
# Frame
rack-frame = "#141414"
rack-rail = "#222222"
rack-text = "#3a3a3a"
rack-edit = "#f59e0b"
rack-warning = "#ef4444"

# Device type stripes
device-patch-panel = "#a07850"
device-switch = "#1d6fce"
device-hub = "#7c3aed"
device-router = "#059669"
device-server = "#c0392b"
device-poe-switch = "#d97706"
device-isp-switch = "#0891b2"
device-auth-router = "#65a30d"
device-other = "#555555"
device-face = "#141414"
device-text = "#d0d0d0"

# Port states
port-free = "#202020"
port-agent = "#14532d"
port-manual = "#1e1b4b"
port-custom = "#1e1b4b"
port-uplink = "#78350f"
port-highlight = "#fbbf24"

# Callout tags
callout-yellow = "#ca8a04"
callout-blue = "#3b82f6"
callout-red = "#dc2626"
callout-green = "#16a34a"
callout-text = "#f5f5f5"

# Drag
drop-indicator = "#3b82f6"
"##;

impl Stylesheet {
    /// Load stylesheet from TOML file
    pub fn from_file(path: &Path) -> Result<Self, StylesheetError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load stylesheet from TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, StylesheetError> {
        let parsed: TomlStylesheet = toml::from_str(content)?;

        Ok(Stylesheet {
            name: parsed.metadata.as_ref().and_then(|m| m.name.clone()),
            description: parsed.metadata.as_ref().and_then(|m| m.description.clone()),
            colors: parsed.colors,
        })
    }

    /// Resolve a colour token defined in this stylesheet
    pub fn resolve(&self, token: &str) -> Option<&str> {
        self.colors.get(token).map(|s| s.as_str())
    }

    /// Resolve a colour token with fallback to the default palette
    ///
    /// Fallback order:
    /// 1. This stylesheet
    /// 2. The default palette
    /// 3. Category default (`device-*`, `port-*`, `callout-*`)
    pub fn resolve_or_default(&self, token: &str) -> String {
        if let Some(color) = self.resolve(token) {
            return color.to_string();
        }

        let default = Self::default();
        if let Some(color) = default.resolve(token) {
            return color.to_string();
        }

        if token.starts_with("device") {
            return "#555555".to_string();
        }
        if token.starts_with("port") {
            return "#202020".to_string();
        }
        if token.starts_with("callout") {
            // unknown callout tags render like the default yellow
            return "#ca8a04".to_string();
        }

        "#333333".to_string()
    }
}

impl Default for Stylesheet {
    fn default() -> Self {
        Self::from_str(DEFAULT_PALETTE).expect("Default palette should be valid TOML")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stylesheet() {
        let stylesheet = Stylesheet::default();
        assert!(stylesheet.colors.contains_key("device-switch"));
        assert!(stylesheet.colors.contains_key("port-free"));
        assert!(stylesheet.colors.contains_key("callout-yellow"));
    }

    #[test]
    fn test_resolve_existing_token() {
        let stylesheet = Stylesheet::default();
        assert_eq!(stylesheet.resolve("device-patch-panel"), Some("#a07850"));
        assert_eq!(stylesheet.resolve("callout-red"), Some("#dc2626"));
    }

    #[test]
    fn test_resolve_missing_token() {
        assert_eq!(Stylesheet::default().resolve("nonexistent"), None);
    }

    #[test]
    fn test_resolve_or_default_fallback() {
        let empty = Stylesheet {
            name: None,
            description: None,
            colors: HashMap::new(),
        };
        assert_eq!(empty.resolve_or_default("port-agent"), "#14532d");
        assert_eq!(empty.resolve_or_default("callout-purple"), "#ca8a04");
        assert_eq!(empty.resolve_or_default("device-toaster"), "#555555");
        assert_eq!(empty.resolve_or_default("mystery"), "#333333");
    }

    #[test]
    fn test_parse_toml_with_metadata() {
        let toml_str = r##"
[metadata]
name = "Light"
description = "Light rack theme"

[colors]
rack-frame = "#eeeeee"
"##;
        let stylesheet = Stylesheet::from_str(toml_str).expect("Should parse");
        assert_eq!(stylesheet.name, Some("Light".to_string()));
        assert_eq!(stylesheet.description, Some("Light rack theme".to_string()));
        assert_eq!(stylesheet.resolve("rack-frame"), Some("#eeeeee"));
        // tokens missing from a partial theme still resolve
        assert_eq!(stylesheet.resolve_or_default("port-free"), "#202020");
    }

    #[test]
    fn test_invalid_toml_error() {
        assert!(Stylesheet::from_str("this is not valid toml {{{{").is_err());
    }
}
