//! Configuration for the rack layout engine

/// Configuration options for layout computation
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Height of one rack unit in pixels
    pub unit_height: f64,

    /// Port cell size (width, height)
    pub port_size: (f64, f64),

    /// Horizontal gap between adjacent port cells
    pub port_gap: f64,

    /// Number of ports per visual cluster
    pub group_size: usize,

    /// Extra horizontal gap inserted before every cluster after the first
    pub group_gap: f64,

    /// Vertical distance between port rows on single-row devices
    pub row_pitch: f64,

    /// Vertical distance between the two rows of a patch panel
    pub double_row_pitch: f64,

    /// Hard cap on ports per row for non patch-panel devices
    pub max_ports_per_row: usize,

    /// Space reserved above switch ports for status LEDs
    pub status_led_height: f64,

    /// Total device width including the unit-number column
    pub rack_width: f64,

    /// Width of the unit-number column on the left
    pub unit_number_width: f64,

    /// X offset where the port block begins inside a device
    pub port_area_start: f64,

    /// Callout wrap width in characters
    pub callout_columns: usize,

    /// Callout bubble width
    pub callout_width: f64,

    /// Bubble height before any text lines are added
    pub callout_base_height: f64,

    /// Height per wrapped text line
    pub callout_line_height: f64,

    /// Minimum vertical gap between placed bubbles
    pub callout_min_gap: f64,

    /// Horizontal distance between the rack edge and the bubble column
    pub callout_offset: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            unit_height: 44.0,
            port_size: (14.0, 14.0),
            port_gap: 2.0,
            group_size: 6,
            group_gap: 7.0,
            row_pitch: 17.0,
            double_row_pitch: 18.0,
            max_ports_per_row: 24,
            status_led_height: 6.0,
            rack_width: 560.0,
            unit_number_width: 28.0,
            port_area_start: 122.0,
            callout_columns: 28,
            callout_width: 180.0,
            callout_base_height: 12.0,
            callout_line_height: 12.0,
            callout_min_gap: 4.0,
            callout_offset: 40.0,
        }
    }
}

impl LayoutConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the rack unit height
    pub fn with_unit_height(mut self, height: f64) -> Self {
        self.unit_height = height;
        self
    }

    /// Set the port cell size and gap
    pub fn with_port_cell(mut self, width: f64, height: f64, gap: f64) -> Self {
        self.port_size = (width, height);
        self.port_gap = gap;
        self
    }

    /// Set the cluster gap
    pub fn with_group_gap(mut self, gap: f64) -> Self {
        self.group_gap = gap;
        self
    }

    /// Set the callout wrap width in characters
    pub fn with_callout_columns(mut self, columns: usize) -> Self {
        self.callout_columns = columns.max(1);
        self
    }

    /// Set the minimum gap between callout bubbles
    pub fn with_callout_min_gap(mut self, gap: f64) -> Self {
        self.callout_min_gap = gap;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LayoutConfig::default();
        assert_eq!(config.unit_height, 44.0);
        assert_eq!(config.port_size, (14.0, 14.0));
        assert_eq!(config.port_gap, 2.0);
        assert_eq!(config.group_size, 6);
        assert_eq!(config.group_gap, 7.0);
        assert_eq!(config.max_ports_per_row, 24);
        assert_eq!(config.callout_min_gap, 4.0);
    }

    #[test]
    fn test_builder_pattern() {
        let config = LayoutConfig::new()
            .with_unit_height(40.0)
            .with_callout_columns(0)
            .with_callout_min_gap(8.0);

        assert_eq!(config.unit_height, 40.0);
        assert_eq!(config.callout_columns, 1);
        assert_eq!(config.callout_min_gap, 8.0);
    }
}
