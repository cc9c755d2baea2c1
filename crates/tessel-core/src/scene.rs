//! Scene element model.
//!
//! A [`Scene`] is the editor's flat element store: every shape, text label
//! and frame on the board with absolute coordinates. Hierarchy is expressed
//! only through ids. An element names the frame it sits in (`frameId`) and
//! the groups it belongs to (`groupIds`, innermost group first). Nothing in
//! this module builds a tree; that happens in the `tessel` crate.
//!
//! Scenes deserialize from the editor's JSON document format. Unknown fields
//! are ignored and element types Tessel cannot express map to
//! [`ElementKind::Unsupported`].

use log::debug;
use serde::Deserialize;

use crate::{
    geometry::{Bounds, Point, Size},
    identifier::Id,
};

/// The kind of shape an element draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Rectangle,
    Ellipse,
    Diamond,
    Text,
    Frame,
    /// Arrows, lines, freehand strokes, images and anything newer.
    #[serde(other)]
    Unsupported,
}

/// Outline pattern of an element's stroke.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeStyle {
    Dashed,
    Dotted,
    #[default]
    #[serde(other)]
    Solid,
}

impl StrokeStyle {
    /// Returns the CSS `border-style` keyword for this stroke.
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::Dashed => "dashed",
            Self::Dotted => "dotted",
        }
    }
}

/// Corner rounding as stored by the editor. Its presence marks rounded corners.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Roundness {
    #[serde(rename = "type")]
    kind: u32,
    #[serde(default)]
    value: Option<f64>,
}

impl Roundness {
    /// Creates a roundness with an explicit corner radius.
    pub fn with_radius(radius: f64) -> Self {
        Self {
            kind: 0,
            value: Some(radius),
        }
    }

    /// Returns the editor's rounding algorithm tag.
    pub fn kind(&self) -> u32 {
        self.kind
    }

    /// Returns the explicit corner radius, if the editor stored one.
    pub fn radius(&self) -> Option<f64> {
        self.value
    }
}

/// Visual attributes of an element. None of these affect geometry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementStyle {
    #[serde(default)]
    stroke_color: Option<String>,
    #[serde(default)]
    background_color: Option<String>,
    #[serde(default)]
    stroke_width: Option<f64>,
    #[serde(default)]
    stroke_style: StrokeStyle,
    #[serde(default)]
    roundness: Option<Roundness>,
    #[serde(default = "default_opacity")]
    opacity: f64,
    #[serde(default)]
    font_size: Option<f64>,
    #[serde(default)]
    text_align: Option<String>,
}

fn default_opacity() -> f64 {
    100.0
}

impl Default for ElementStyle {
    fn default() -> Self {
        Self {
            stroke_color: None,
            background_color: None,
            stroke_width: None,
            stroke_style: StrokeStyle::default(),
            roundness: None,
            opacity: default_opacity(),
            font_size: None,
            text_align: None,
        }
    }
}

impl ElementStyle {
    pub fn with_stroke_color(mut self, color: impl Into<String>) -> Self {
        self.stroke_color = Some(color.into());
        self
    }

    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    pub fn with_stroke(mut self, width: f64, style: StrokeStyle) -> Self {
        self.stroke_width = Some(width);
        self.stroke_style = style;
        self
    }

    pub fn with_roundness(mut self, roundness: Roundness) -> Self {
        self.roundness = Some(roundness);
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = Some(font_size);
        self
    }

    pub fn with_text_align(mut self, align: impl Into<String>) -> Self {
        self.text_align = Some(align.into());
        self
    }

    pub fn stroke_color(&self) -> Option<&str> {
        self.stroke_color.as_deref()
    }

    pub fn background_color(&self) -> Option<&str> {
        self.background_color.as_deref()
    }

    pub fn stroke_width(&self) -> Option<f64> {
        self.stroke_width
    }

    pub fn stroke_style(&self) -> StrokeStyle {
        self.stroke_style
    }

    pub fn roundness(&self) -> Option<Roundness> {
        self.roundness
    }

    /// Opacity in percent, `0..=100`.
    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn font_size(&self) -> Option<f64> {
        self.font_size
    }

    pub fn text_align(&self) -> Option<&str> {
        self.text_align.as_deref()
    }
}

/// A single positioned element of a scene.
///
/// # Examples
///
/// ```
/// # use tessel_core::{geometry::{Point, Size}, scene::{Element, ElementKind}};
/// let position = Point::new(10.0, 20.0);
/// let label = Element::new("title", ElementKind::Text, position, Size::new(80.0, 24.0))
///     .with_text("Hello")
///     .with_frame_id("frame-1");
///
/// assert_eq!(label.bounds().max_x(), 90.0);
/// assert_eq!(label.frame_id().unwrap(), "frame-1");
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    id: Id,
    #[serde(rename = "type")]
    kind: ElementKind,
    x: f64,
    y: f64,
    #[serde(default)]
    width: f64,
    #[serde(default)]
    height: f64,
    #[serde(default)]
    frame_id: Option<Id>,
    #[serde(default)]
    group_ids: Vec<Id>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    is_deleted: bool,
    #[serde(flatten)]
    style: ElementStyle,
}

impl Element {
    /// Creates an element with default style at an absolute position.
    pub fn new(id: &str, kind: ElementKind, position: Point, size: Size) -> Self {
        Self {
            id: Id::new(id),
            kind,
            x: position.x(),
            y: position.y(),
            width: size.width(),
            height: size.height(),
            frame_id: None,
            group_ids: Vec::new(),
            text: None,
            is_deleted: false,
            style: ElementStyle::default(),
        }
    }

    /// Places the element inside the frame with the given id.
    pub fn with_frame_id(mut self, frame_id: &str) -> Self {
        self.frame_id = Some(Id::new(frame_id));
        self
    }

    /// Sets group membership, innermost group first.
    pub fn with_group_ids(mut self, group_ids: &[&str]) -> Self {
        self.group_ids = group_ids.iter().map(|id| Id::new(id)).collect();
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_style(mut self, style: ElementStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_deleted(mut self, is_deleted: bool) -> Self {
        self.is_deleted = is_deleted;
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    /// Returns the absolute top-left corner.
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Returns the rectangle `(x, y)`-`(x + width, y + height)`.
    pub fn bounds(&self) -> Bounds {
        Bounds::new_from_top_left(self.position(), self.size())
    }

    pub fn frame_id(&self) -> Option<Id> {
        self.frame_id
    }

    /// Group ids, innermost group first.
    pub fn group_ids(&self) -> &[Id] {
        &self.group_ids
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn is_deleted(&self) -> bool {
        self.is_deleted
    }

    pub fn style(&self) -> &ElementStyle {
        &self.style
    }
}

/// The editor's flat element store.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Scene {
    #[serde(default)]
    elements: Vec<Element>,
}

impl Scene {
    pub fn new(elements: Vec<Element>) -> Self {
        Self { elements }
    }

    /// Parses a scene from the editor's JSON document.
    ///
    /// # Errors
    ///
    /// Returns the [`serde_json::Error`] describing the first syntax or shape
    /// problem, including its line and column.
    pub fn from_json(source: &str) -> Result<Self, serde_json::Error> {
        let scene: Self = serde_json::from_str(source)?;
        debug!(elements_count = scene.elements.len(); "Scene parsed");
        Ok(scene)
    }

    /// Elements in document order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_editor_document() {
        let source = r##"{
            "type": "excalidraw",
            "version": 2,
            "elements": [
                {
                    "id": "r1",
                    "type": "rectangle",
                    "x": 10, "y": 20, "width": 100, "height": 50,
                    "strokeColor": "#1e1e1e",
                    "backgroundColor": "transparent",
                    "strokeWidth": 2,
                    "strokeStyle": "dashed",
                    "roundness": { "type": 3 },
                    "opacity": 80,
                    "groupIds": ["g-inner", "g-outer"],
                    "seed": 1234
                },
                {
                    "id": "t1",
                    "type": "text",
                    "x": 0, "y": 0, "width": 40, "height": 20,
                    "text": "Hi",
                    "fontSize": 16,
                    "textAlign": "center",
                    "frameId": "f1"
                }
            ],
            "appState": { "viewBackgroundColor": "#ffffff" }
        }"##;

        let scene = Scene::from_json(source).unwrap();
        assert_eq!(scene.elements().len(), 2);

        let rect = &scene.elements()[0];
        assert_eq!(rect.id(), "r1");
        assert_eq!(rect.kind(), ElementKind::Rectangle);
        assert_eq!(rect.bounds(), Bounds::new(10.0, 20.0, 110.0, 70.0));
        assert_eq!(rect.group_ids().len(), 2);
        assert_eq!(rect.group_ids()[1], "g-outer");
        assert_eq!(rect.style().stroke_style(), StrokeStyle::Dashed);
        assert_eq!(rect.style().stroke_width(), Some(2.0));
        assert!(rect.style().roundness().is_some());
        assert_eq!(rect.style().opacity(), 80.0);

        let text = &scene.elements()[1];
        assert_eq!(text.text(), Some("Hi"));
        assert_eq!(text.style().font_size(), Some(16.0));
        assert_eq!(text.style().text_align(), Some("center"));
        assert_eq!(text.frame_id().unwrap(), "f1");
        assert_eq!(text.style().opacity(), 100.0);
    }

    #[test]
    fn test_unknown_kind_is_unsupported() {
        let source = r#"{"elements": [{"id": "a", "type": "arrow", "x": 0, "y": 0}]}"#;
        let scene = Scene::from_json(source).unwrap();
        assert_eq!(scene.elements()[0].kind(), ElementKind::Unsupported);
    }

    #[test]
    fn test_unknown_stroke_style_falls_back_to_solid() {
        let source = r#"{"elements": [
            {"id": "a", "type": "ellipse", "x": 0, "y": 0, "strokeStyle": "wavy"}
        ]}"#;
        let scene = Scene::from_json(source).unwrap();
        let style = scene.elements()[0].style();
        assert_eq!(style.stroke_style(), StrokeStyle::Solid);
    }

    #[test]
    fn test_missing_document_elements_is_empty_scene() {
        let scene = Scene::from_json("{}").unwrap();
        assert!(scene.elements().is_empty());
    }

    #[test]
    fn test_invalid_json_reports_position() {
        let err = Scene::from_json("{\n  \"elements\": [,]\n}").unwrap_err();
        assert_eq!(err.line(), 2);
    }

    #[test]
    fn test_builder_constructors() {
        let element = Element::new(
            "e",
            ElementKind::Ellipse,
            Point::new(1.0, 2.0),
            Size::new(3.0, 4.0),
        )
        .with_group_ids(&["inner", "outer"])
        .with_style(ElementStyle::default().with_background_color("red"))
        .with_deleted(true);

        assert_eq!(element.position(), Point::new(1.0, 2.0));
        assert_eq!(element.size(), Size::new(3.0, 4.0));
        assert_eq!(element.group_ids()[0], "inner");
        assert_eq!(element.style().background_color(), Some("red"));
        assert!(element.is_deleted());
    }
}
