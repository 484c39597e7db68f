//! SVG generation from rack layouts

use crate::layout::{BoundingBox, CalloutLayout, DeviceLayout, Point, PortLayout, RackLayout};
use crate::model::PortType;
use crate::stylesheet::Stylesheet;

use super::SvgConfig;

/// Horizontal text anchoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    fn as_str(self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

/// Build SVG elements incrementally
pub struct SvgBuilder {
    config: SvgConfig,
    styles: Vec<String>,
    elements: Vec<String>,
    connections: Vec<String>,
    overlays: Vec<String>,
    indent: usize,
}

impl SvgBuilder {
    /// Create a new SVG builder
    pub fn new(config: SvgConfig) -> Self {
        Self {
            config,
            styles: vec![],
            elements: vec![],
            connections: vec![],
            overlays: vec![],
            indent: 1,
        }
    }

    /// Add CSS custom properties from a stylesheet
    pub fn add_stylesheet(&mut self, stylesheet: &Stylesheet) {
        let mut tokens: Vec<_> = stylesheet.colors.iter().collect();
        tokens.sort();
        let mut css = String::from(":root {\n");
        for (token, value) in tokens {
            css.push_str(&format!("    --{}: {};\n", token, value));
        }
        css.push_str("  }\n");
        let prefix = self.prefix();
        css.push_str(&format!(
            "  .{prefix}label {{ font-family: monospace; font-size: 9px; }}\n  .{prefix}dragging {{ opacity: 0.4; }}"
        ));
        self.styles.push(css);
    }

    fn prefix(&self) -> String {
        self.config.class_prefix.clone().unwrap_or_default()
    }

    fn class(&self, name: &str) -> String {
        format!("{}{}", self.prefix(), name)
    }

    fn class_list(&self, base: &str, classes: &[String]) -> String {
        std::iter::once(self.class(base))
            .chain(classes.iter().cloned())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn indent_str(&self) -> String {
        if self.config.pretty_print {
            "  ".repeat(self.indent)
        } else {
            String::new()
        }
    }

    fn newline(&self) -> &str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    /// Add a rectangle element, optionally with a hover title
    pub fn add_rect(
        &mut self,
        id: Option<&str>,
        bounds: &BoundingBox,
        classes: &[String],
        styles: &str,
        title: Option<&str>,
    ) {
        let id_attr = id.map(|i| format!(r#" id="{}""#, i)).unwrap_or_default();
        let open = format!(
            r#"{}<rect{} class="{}" x="{}" y="{}" width="{}" height="{}"{}"#,
            self.indent_str(),
            id_attr,
            self.class_list("rect", classes),
            bounds.x,
            bounds.y,
            bounds.width,
            bounds.height,
            styles
        );
        let element = match title {
            Some(t) => format!("{open}><title>{}</title></rect>", escape_xml(t)),
            None => format!("{open}/>"),
        };
        self.elements.push(element);
    }

    /// Add a circle element
    pub fn add_circle(&mut self, center: Point, r: f64, classes: &[String], styles: &str) {
        self.elements.push(format!(
            r#"{}<circle class="{}" cx="{}" cy="{}" r="{}"{}/>"#,
            self.indent_str(),
            self.class_list("circle", classes),
            center.x,
            center.y,
            r,
            styles
        ));
    }

    /// Add a text element
    pub fn add_text(
        &mut self,
        text: &str,
        position: Point,
        anchor: TextAnchor,
        classes: &[String],
        styles: &str,
    ) {
        self.elements.push(format!(
            r#"{}<text class="{}" x="{}" y="{}" text-anchor="{}"{}>{}</text>"#,
            self.indent_str(),
            self.class_list("label", classes),
            position.x,
            position.y,
            anchor.as_str(),
            styles,
            escape_xml(text)
        ));
    }

    /// Add a connector polyline, drawn above the devices
    pub fn add_connection_path(&mut self, path: &[Point], classes: &[String], styles: &str) {
        self.connections.push(format!(
            r#"{}<path class="{}" d="{}" fill="none"{}/>"#,
            self.indent_str(),
            self.class_list("connector", classes),
            path_to_d(path),
            styles
        ));
    }

    /// Add an element drawn on top of everything else
    pub fn add_overlay_line(&mut self, from: Point, to: Point, classes: &[String], styles: &str) {
        self.overlays.push(format!(
            r#"{}<line class="{}" x1="{}" y1="{}" x2="{}" y2="{}"{}/>"#,
            self.indent_str(),
            self.class_list("line", classes),
            from.x,
            from.y,
            to.x,
            to.y,
            styles
        ));
    }

    /// Add a group element with optional ID and classes
    pub fn start_group(&mut self, id: Option<&str>, classes: &[String]) {
        let id_attr = id.map(|i| format!(r#" id="{}""#, i)).unwrap_or_default();
        let class_attr = if classes.is_empty() {
            String::new()
        } else {
            format!(r#" class="{}""#, classes.join(" "))
        };

        self.elements
            .push(format!("{}<g{}{}>", self.indent_str(), id_attr, class_attr));
        self.indent += 1;
    }

    /// Close a group element
    pub fn end_group(&mut self) {
        self.indent = self.indent.saturating_sub(1);
        self.elements.push(format!("{}</g>", self.indent_str()));
    }

    /// Build the final SVG string
    pub fn build(self, viewbox: BoundingBox) -> String {
        let padding = self.config.viewbox_padding;
        let vb_x = viewbox.x - padding;
        let vb_y = viewbox.y - padding;
        let vb_w = viewbox.width + 2.0 * padding;
        let vb_h = viewbox.height + 2.0 * padding;

        let nl = self.newline();

        let mut svg = String::new();

        if self.config.standalone {
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            svg.push_str(nl);
        }

        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}">"#,
            vb_x, vb_y, vb_w, vb_h
        ));
        svg.push_str(nl);

        if !self.styles.is_empty() {
            svg.push_str("  <style>");
            svg.push_str(nl);
            for style in &self.styles {
                svg.push_str("    ");
                svg.push_str(style);
                svg.push_str(nl);
            }
            svg.push_str("  </style>");
            svg.push_str(nl);
        }

        for elem in self
            .elements
            .iter()
            .chain(&self.connections)
            .chain(&self.overlays)
        {
            svg.push_str(elem);
            svg.push_str(nl);
        }

        svg.push_str("</svg>");

        svg
    }
}

/// Render a rack layout to an SVG string (with default stylesheet)
pub fn render_svg(layout: &RackLayout, config: &SvgConfig) -> String {
    render_svg_with_stylesheet(layout, config, &Stylesheet::default())
}

/// Render a rack layout to an SVG string with a custom stylesheet
pub fn render_svg_with_stylesheet(
    layout: &RackLayout,
    config: &SvgConfig,
    stylesheet: &Stylesheet,
) -> String {
    let mut builder = SvgBuilder::new(config.clone());
    builder.add_stylesheet(stylesheet);

    let frame = BoundingBox::new(0.0, 0.0, layout.rack_width, layout.stack_height);
    let frame_stroke = if config.edit_mode {
        format!(
            r#" stroke="{}" stroke-width="2" stroke-dasharray="6 3""#,
            stylesheet.resolve_or_default("rack-edit")
        )
    } else {
        String::new()
    };
    builder.add_rect(
        Some("rack"),
        &frame,
        &[builder.class("frame")],
        &format!("{}{}", fill(stylesheet, "rack-frame"), frame_stroke),
        None,
    );

    let mut unit_number = 1;
    for device in &layout.devices {
        render_device(device, &mut unit_number, layout, config, stylesheet, &mut builder);
    }

    for callout in &layout.callouts {
        render_callout(callout, stylesheet, &mut builder);
    }

    if let Some(indicator) = &layout.drop_indicator {
        let y = indicator.bounds.y;
        builder.add_overlay_line(
            Point::new(indicator.bounds.x, y),
            Point::new(indicator.bounds.right(), y),
            &[builder.class("drop-indicator")],
            &format!(
                r#" stroke="{}" stroke-width="3""#,
                stylesheet.resolve_or_default("drop-indicator")
            ),
        );
    }

    builder.build(layout.bounds)
}

fn render_device(
    device: &DeviceLayout,
    unit_number: &mut u32,
    layout: &RackLayout,
    config: &SvgConfig,
    stylesheet: &Stylesheet,
    builder: &mut SvgBuilder,
) {
    let b = device.bounds;
    let token = device.device.device_type.token();
    let unit_height = b.height / f64::from(device.device.unit_size.max(1));
    let column = layout.unit_column;

    let mut classes = vec![builder.class("device"), builder.class(&format!("device-{token}"))];
    if device.dragging {
        classes.push(builder.class("dragging"));
    }
    if device.overlapping {
        classes.push(builder.class("overlap"));
    }
    builder.start_group(Some(&format!("device-{}", device.id())), &classes);

    for row in 0..device.device.unit_size {
        builder.add_text(
            &unit_number.to_string(),
            Point::new(
                column / 2.0,
                b.y + f64::from(row) * unit_height + unit_height / 2.0 + 3.0,
            ),
            TextAnchor::Middle,
            &[builder.class("unit-number")],
            &fill(stylesheet, "rack-text"),
        );
        *unit_number += 1;
    }

    let face = BoundingBox::new(b.x + column, b.y + 1.0, b.width - column, b.height - 2.0);
    let outline = if device.overlapping {
        format!(
            r#"stroke="{}" stroke-width="2""#,
            stylesheet.resolve_or_default("rack-warning")
        )
    } else {
        format!(r#"stroke="{}""#, stylesheet.resolve_or_default("rack-rail"))
    };
    builder.add_rect(
        None,
        &face,
        &[builder.class("faceplate")],
        &format!("{} {}", fill(stylesheet, "device-face"), outline),
        device.device.notes.as_deref(),
    );
    builder.add_rect(
        None,
        &BoundingBox::new(face.x, face.y, 4.0, face.height),
        &[builder.class("stripe")],
        &fill(stylesheet, &format!("device-{token}")),
        None,
    );

    let middle = b.center().y;
    builder.add_text(
        device.device.device_type.badge(),
        Point::new(face.x + 10.0, middle - 4.0),
        TextAnchor::Start,
        &[builder.class("badge")],
        &fill(stylesheet, &format!("device-{token}")),
    );
    builder.add_text(
        &device.device.name,
        Point::new(face.x + 10.0, middle + 8.0),
        TextAnchor::Start,
        &[builder.class("name")],
        &fill(stylesheet, "device-text"),
    );

    let leds = device.device.device_type.has_status_leds();
    for port in &device.ports {
        render_port(port, leds, stylesheet, builder);
    }

    if config.edit_mode {
        builder.add_text(
            "⋮⋮",
            Point::new(b.right() - 10.0, middle + 3.0),
            TextAnchor::Middle,
            &[builder.class("handle")],
            &fill(stylesheet, "device-text"),
        );
    }

    if config.debug {
        if let Some(block) = device
            .ports
            .iter()
            .map(|p| p.bounds)
            .reduce(|acc, r| acc.union(&r))
        {
            builder.add_rect(
                None,
                &block,
                &[builder.class("debug")],
                r##" fill="none" stroke="#ff00ff" stroke-dasharray="2 2""##,
                None,
            );
        }
        builder.add_text(
            &format!("#{} @{}", device.id(), device.device.rack_unit.0),
            Point::new(b.right() - 24.0, b.y + 10.0),
            TextAnchor::End,
            &[builder.class("debug")],
            r##" fill="#ff00ff""##,
        );
    }

    builder.end_group();
}

fn render_port(port: &PortLayout, leds: bool, stylesheet: &Stylesheet, builder: &mut SvgBuilder) {
    let source = port.port.source_type;
    let token = if port.port.port_type == PortType::Uplink && !source.is_assigned() {
        "uplink"
    } else {
        source.token()
    };

    let mut classes = vec![builder.class("port"), builder.class(&format!("port-{token}"))];
    let mut styles = fill(stylesheet, &format!("port-{token}"));
    if port.highlighted {
        classes.push(builder.class("highlight"));
        styles.push_str(&format!(
            r#" stroke="{}" stroke-width="2""#,
            stylesheet.resolve_or_default("port-highlight")
        ));
    }

    let title = match &port.port.label {
        Some(label) => format!("{}: {}", port.port.port_number, label),
        None => port.port.port_number.to_string(),
    };
    builder.add_rect(
        Some(&format!("port-{}", port.port.id)),
        &port.bounds,
        &classes,
        &styles,
        Some(&title),
    );

    if leds {
        let led_token = if source.is_assigned() { "port-agent" } else { "port-free" };
        builder.add_circle(
            Point::new(port.bounds.center().x, port.bounds.y - 3.0),
            1.5,
            &[builder.class("led")],
            &fill(stylesheet, led_token),
        );
    }
}

fn render_callout(callout: &CalloutLayout, stylesheet: &Stylesheet, builder: &mut SvgBuilder) {
    let color = stylesheet.resolve_or_default(&format!("callout-{}", callout.callout.color));
    builder.add_connection_path(
        &callout.connector,
        &[],
        &format!(r#" stroke="{}" stroke-width="1""#, color),
    );

    builder.start_group(
        Some(&format!("callout-{}", callout.callout.id.0)),
        &[builder.class("callout")],
    );
    builder.add_rect(
        None,
        &callout.bounds,
        &[builder.class("bubble")],
        &format!(r#" fill="{}" rx="4""#, color),
        None,
    );
    let b = callout.bounds;
    for (i, line) in callout.lines.iter().enumerate() {
        builder.add_text(
            line,
            Point::new(b.x + 6.0, b.y + 6.0 + 12.0 * (i as f64 + 1.0) - 3.0),
            TextAnchor::Start,
            &[],
            &fill(stylesheet, "callout-text"),
        );
    }
    builder.end_group();
}

fn fill(stylesheet: &Stylesheet, token: &str) -> String {
    format!(r#" fill="{}""#, stylesheet.resolve_or_default(token))
}

/// Convert a path of points to an SVG path d attribute
fn path_to_d(path: &[Point]) -> String {
    let Some((first, rest)) = path.split_first() else {
        return String::new();
    };

    let mut d = format!("M{} {}", first.x, first.y);
    for point in rest {
        d.push_str(&format!(" L{} {}", point.x, point.y));
    }
    d
}

/// Escape special XML characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
