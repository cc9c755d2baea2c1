//! Style mapping from layout geometry and element attributes.
//!
//! Produces [`Style`] objects, insertion-ordered maps from camelCase style
//! property names to [`StyleValue`]s, rendered as JavaScript object literals
//! by [`Style::to_object_literal`].
//!
//! Positioning comes from the layout metrics: rows stack vertically with a
//! `marginTop` gap, and nodes within a row flow left to right with a
//! `marginLeft` gap. Visual attributes are copied from the element's style.

use std::fmt;

use indexmap::IndexMap;
use log::warn;

use tessel_core::{
    color::Color,
    scene::{Element, ElementKind, ElementStyle},
};

use crate::{
    layout::{self, METRIC_DECIMALS, Row, RowNode},
    structure::FrameIndex,
};

/// Corner radius used when the editor marks corners rounded without a radius.
const DEFAULT_CORNER_RADIUS: f64 = 8.0;

/// A single style property value.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    /// Emitted as a bare number, which means pixels for length properties.
    Number(f64),
    /// Emitted as a double-quoted string literal.
    Text(String),
}

impl From<f64> for StyleValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Adding zero turns -0.0 into 0.0.
            Self::Number(value) => write!(f, "{}", value + 0.0),
            Self::Text(text) => {
                f.write_str("\"")?;
                for ch in text.chars() {
                    match ch {
                        '"' => f.write_str("\\\"")?,
                        '\\' => f.write_str("\\\\")?,
                        '\n' => f.write_str("\\n")?,
                        '\r' => f.write_str("\\r")?,
                        '\t' => f.write_str("\\t")?,
                        // JavaScript line terminators and other control characters.
                        '\u{2028}' | '\u{2029}' => write!(f, "\\u{{{:x}}}", ch as u32)?,
                        ch if ch.is_control() => write!(f, "\\u{{{:x}}}", ch as u32)?,
                        ch => write!(f, "{ch}")?,
                    }
                }
                f.write_str("\"")
            }
        }
    }
}

/// An ordered set of style properties.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    properties: IndexMap<&'static str, StyleValue>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a property, keeping its original position if already present.
    pub fn set(&mut self, name: &'static str, value: impl Into<StyleValue>) {
        self.properties.insert(name, value.into());
    }

    /// Builder-style [`Style::set`].
    pub fn with(mut self, name: &'static str, value: impl Into<StyleValue>) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&StyleValue> {
        self.properties.get(name)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Renders the style as a JavaScript object literal.
    ///
    /// # Examples
    ///
    /// ```
    /// # use tessel::style::Style;
    /// let style = Style::new().with("width", 120.0).with("display", "flex");
    /// assert_eq!(style.to_object_literal(), r#"{ width: 120, display: "flex" }"#);
    /// assert_eq!(Style::new().to_object_literal(), "{}");
    /// ```
    pub fn to_object_literal(&self) -> String {
        if self.properties.is_empty() {
            return "{}".to_string();
        }
        let entries: Vec<String> = self
            .properties
            .iter()
            .map(|(name, value)| format!("{name}: {value}"))
            .collect();
        format!("{{ {} }}", entries.join(", "))
    }
}

/// Style of the outermost container.
pub fn root_style() -> Style {
    Style::new()
        .with("position", "relative")
        .with("display", "flex")
        .with("flexDirection", "column")
}

/// Style of a row container, spaced from the row above it.
pub fn row_style(row: &Row<'_>, previous: Option<&Row<'_>>) -> Style {
    Style::new()
        .with("display", "flex")
        .with("flexDirection", "row")
        .with("alignItems", "flex-start")
        .with("marginTop", layout::compute_row_margin_top(row, previous))
}

/// Style of a node inside a row: its offset from the left neighbour, its
/// size, and for elements the visual attributes of its kind.
pub fn node_style(node: &RowNode<'_>, sibling: Option<&RowNode<'_>>, frames: &FrameIndex) -> Style {
    let bounds = node.bounds();
    let mut style = Style::new()
        .with("boxSizing", "border-box")
        .with("flexShrink", 0.0)
        .with("marginLeft", layout::compute_margin_left(node, sibling))
        .with("width", layout::round(bounds.width(), METRIC_DECIMALS))
        .with("height", layout::round(bounds.height(), METRIC_DECIMALS));

    match node {
        RowNode::Element(element) => apply_element_style(&mut style, element, frames),
        RowNode::Group { .. } => {
            style.set("display", "flex");
            style.set("flexDirection", "column");
        }
    }

    style
}

fn apply_element_style(style: &mut Style, element: &Element, frames: &FrameIndex) {
    let attributes = element.style();
    match element.kind() {
        ElementKind::Rectangle => apply_shape_style(style, element),
        ElementKind::Ellipse => {
            apply_shape_style(style, element);
            style.set("borderRadius", "50%");
        }
        ElementKind::Diamond => {
            apply_shape_style(style, element);
            style.set("clipPath", "polygon(50% 0, 100% 50%, 50% 100%, 0 50%)");
        }
        ElementKind::Frame => {
            apply_shape_style(style, element);
            style.set("display", "flex");
            style.set("flexDirection", "column");
            if let Some(padding) =
                layout::compute_frame_padding(element, frames.elements(element.id()))
            {
                style.set("paddingTop", padding.top());
                style.set("paddingRight", padding.right());
                style.set("paddingBottom", padding.bottom());
                style.set("paddingLeft", padding.left());
            }
        }
        ElementKind::Text => {
            if let Some(color) = css_color(element, attributes.stroke_color()) {
                style.set("color", color);
            }
            if let Some(font_size) = attributes.font_size() {
                style.set("fontSize", layout::round(font_size, METRIC_DECIMALS));
            }
            if let Some(align) = attributes.text_align() {
                style.set("textAlign", align);
            }
            style.set("whiteSpace", "pre-wrap");
        }
        ElementKind::Unsupported => {}
    }

    if attributes.opacity() < 100.0 {
        style.set(
            "opacity",
            layout::round(attributes.opacity() / 100.0, METRIC_DECIMALS),
        );
    }
}

fn apply_shape_style(style: &mut Style, element: &Element) {
    let attributes: &ElementStyle = element.style();

    if let Some(background) = css_color(element, attributes.background_color()) {
        style.set("backgroundColor", background);
    }

    let stroke_width = attributes.stroke_width().unwrap_or(1.0);
    let stroke = if stroke_width > 0.0 {
        css_color(element, attributes.stroke_color())
    } else {
        None
    };
    if let Some(stroke) = stroke {
        style.set(
            "border",
            format!(
                "{}px {} {}",
                layout::round(stroke_width, METRIC_DECIMALS),
                attributes.stroke_style().as_css(),
                stroke
            ),
        );
    }

    if let Some(roundness) = attributes.roundness() {
        let radius = roundness.radius().unwrap_or(DEFAULT_CORNER_RADIUS);
        style.set("borderRadius", layout::round(radius, METRIC_DECIMALS));
    }
}

/// Validates a color attribute and returns the CSS text to emit.
///
/// Transparent and invalid colors yield `None`; invalid ones are logged.
fn css_color(element: &Element, value: Option<&str>) -> Option<String> {
    let value = value?;
    if value.eq_ignore_ascii_case("transparent") {
        return None;
    }
    match Color::new(value) {
        Ok(color) if color.is_transparent() => None,
        Ok(_) => Some(value.to_string()),
        Err(err) => {
            warn!(element_id:% = element.id(), err:%; "Skipping invalid color");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use tessel_core::{
        geometry::{Point, Size},
        scene::{Roundness, StrokeStyle},
    };

    use super::*;
    use crate::{layout::split_into_rows, structure::Node};

    fn element(id: &str, kind: ElementKind, x: f64, y: f64, w: f64, h: f64) -> Element {
        Element::new(id, kind, Point::new(x, y), Size::new(w, h))
    }

    fn style_of(element: Element) -> Style {
        let nodes = [Node::Element(element)];
        let rows = split_into_rows(&nodes, 0.0);
        node_style(&rows[0].nodes()[0], None, &FrameIndex::default())
    }

    #[test]
    fn test_style_value_display() {
        assert_eq!(StyleValue::from(12.5).to_string(), "12.5");
        assert_eq!(StyleValue::from(100.0).to_string(), "100");
        assert_eq!(StyleValue::from(-0.0).to_string(), "0");
        assert_eq!(StyleValue::from("a \"b\"").to_string(), r#""a \"b\"""#);
        assert_eq!(StyleValue::from("x\ny").to_string(), r#""x\ny""#);
    }

    #[test]
    fn test_style_value_escapes_line_terminators() {
        assert_eq!(StyleValue::from("a\r\nb").to_string(), r#""a\r\nb""#);
        assert_eq!(StyleValue::from("a\tb").to_string(), r#""a\tb""#);
        assert_eq!(
            StyleValue::from("a\u{2028}b\u{2029}c").to_string(),
            r#""a\u{2028}b\u{2029}c""#
        );
        assert_eq!(StyleValue::from("bell\u{7}").to_string(), r#""bell\u{7}""#);
    }

    #[test]
    fn test_set_keeps_first_position() {
        let style = Style::new()
            .with("width", 1.0)
            .with("height", 2.0)
            .with("width", 3.0);

        assert_eq!(style.len(), 2);
        assert_eq!(style.to_object_literal(), "{ width: 3, height: 2 }");
    }

    #[test]
    fn test_rectangle_style() {
        let rect = element("r", ElementKind::Rectangle, 10.0, 0.0, 100.0, 50.0).with_style(
            ElementStyle::default()
                .with_stroke_color("#1e1e1e")
                .with_background_color("#ffc9c9")
                .with_stroke(2.0, StrokeStyle::Dashed)
                .with_roundness(Roundness::with_radius(4.0)),
        );
        let style = style_of(rect);

        assert_eq!(style.get("marginLeft"), Some(&StyleValue::Number(10.0)));
        assert_eq!(style.get("width"), Some(&StyleValue::Number(100.0)));
        assert_eq!(style.get("height"), Some(&StyleValue::Number(50.0)));
        assert_eq!(
            style.get("backgroundColor"),
            Some(&StyleValue::from("#ffc9c9"))
        );
        assert_eq!(
            style.get("border"),
            Some(&StyleValue::from("2px dashed #1e1e1e"))
        );
        assert_eq!(style.get("borderRadius"), Some(&StyleValue::Number(4.0)));
    }

    #[test]
    fn test_transparent_and_invalid_colors_are_skipped() {
        let rect = element("r", ElementKind::Rectangle, 0.0, 0.0, 10.0, 10.0).with_style(
            ElementStyle::default()
                .with_background_color("transparent")
                .with_stroke_color("not-a-color"),
        );
        let style = style_of(rect);

        assert!(style.get("backgroundColor").is_none());
        assert!(style.get("border").is_none());
    }

    #[test]
    fn test_zero_stroke_width_has_no_border() {
        let rect = element("r", ElementKind::Rectangle, 0.0, 0.0, 10.0, 10.0).with_style(
            ElementStyle::default()
                .with_stroke_color("black")
                .with_stroke(0.0, StrokeStyle::Solid),
        );
        assert!(style_of(rect).get("border").is_none());
    }

    #[test]
    fn test_ellipse_and_diamond() {
        let ellipse = style_of(element("e", ElementKind::Ellipse, 0.0, 0.0, 10.0, 10.0));
        assert_eq!(ellipse.get("borderRadius"), Some(&StyleValue::from("50%")));

        let diamond = style_of(element("d", ElementKind::Diamond, 0.0, 0.0, 10.0, 10.0));
        assert!(diamond.get("clipPath").is_some());
    }

    #[test]
    fn test_text_style() {
        let text = element("t", ElementKind::Text, 0.0, 0.0, 80.0, 20.0)
            .with_text("Hello")
            .with_style(
                ElementStyle::default()
                    .with_stroke_color("red")
                    .with_font_size(20.0)
                    .with_text_align("center")
                    .with_opacity(50.0),
            );
        let style = style_of(text);

        assert_eq!(style.get("color"), Some(&StyleValue::from("red")));
        assert_eq!(style.get("fontSize"), Some(&StyleValue::Number(20.0)));
        assert_eq!(style.get("textAlign"), Some(&StyleValue::from("center")));
        assert_eq!(style.get("opacity"), Some(&StyleValue::Number(0.5)));
        assert!(style.get("border").is_none());
    }

    #[test]
    fn test_row_style_margin_top() {
        let nodes = [
            Node::Element(element("a", ElementKind::Rectangle, 0.0, 20.0, 10.0, 10.0)),
            Node::Element(element("b", ElementKind::Rectangle, 0.0, 50.0, 10.0, 10.0)),
        ];
        let rows = split_into_rows(&nodes, 0.0);

        let first = row_style(&rows[0], None);
        let second = row_style(&rows[1], rows.first());
        assert_eq!(first.get("marginTop"), Some(&StyleValue::Number(20.0)));
        assert_eq!(second.get("marginTop"), Some(&StyleValue::Number(20.0)));
        assert_eq!(first.get("display"), Some(&StyleValue::from("flex")));
    }

    #[test]
    fn test_root_style_literal() {
        assert_eq!(
            root_style().to_object_literal(),
            r#"{ position: "relative", display: "flex", flexDirection: "column" }"#
        );
    }
}
