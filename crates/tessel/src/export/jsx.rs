//! JSX export backend.
//!
//! Emits a default-exported React function component. The markup nests one
//! `div` per row, group, frame and element:
//!
//! ```text
//! root            flex column
//! └─ row          flex row, marginTop
//!    ├─ element   marginLeft, width, height, visual style
//!    ├─ group     flex column holding its own rows
//!    └─ frame     padding, holding its own rows
//! ```
//!
//! Each construct is written on its own line without indentation; layout of
//! the source text is left to [`crate::format`].

use std::fmt::Write;

use log::debug;

use tessel_core::scene::{Element, ElementKind};

use super::{Error, Exporter};
use crate::{
    layout::{Row, RowNode, split_into_rows},
    structure::SceneTree,
    style::{self, Style, StyleValue},
};

/// Renders a [`SceneTree`] as a JSX function component.
#[derive(Debug, Clone)]
pub struct JsxExporter {
    component_name: String,
    threshold_gap: f64,
}

impl JsxExporter {
    /// Creates an exporter for a component named `component_name`, splitting
    /// rows with `threshold_gap`.
    pub fn new(component_name: impl Into<String>, threshold_gap: f64) -> Self {
        Self {
            component_name: component_name.into(),
            threshold_gap,
        }
    }

    pub fn component_name(&self) -> &str {
        &self.component_name
    }

    fn write_rows(
        &self,
        out: &mut String,
        rows: &[Row<'_>],
        tree: &SceneTree,
    ) -> Result<(), Error> {
        for (idx, row) in rows.iter().enumerate() {
            let previous = idx.checked_sub(1).map(|prev| &rows[prev]);
            open_tag(out, None, &style::row_style(row, previous))?;
            self.write_row_nodes(out, row, tree)?;
            writeln!(out, "</div>")?;
        }
        Ok(())
    }

    fn write_row_nodes(
        &self,
        out: &mut String,
        row: &Row<'_>,
        tree: &SceneTree,
    ) -> Result<(), Error> {
        let nodes = row.nodes();
        for (idx, node) in nodes.iter().enumerate() {
            let sibling = idx.checked_sub(1).map(|prev| &nodes[prev]);
            let style = style::node_style(node, sibling, tree.frames());

            match node {
                RowNode::Element(element) => self.write_element(out, element, &style, tree)?,
                RowNode::Group { group, rows } => {
                    let attribute = ("data-group-id", group.id().to_string());
                    open_tag(out, Some(attribute), &style)?;
                    self.write_rows(out, rows, tree)?;
                    writeln!(out, "</div>")?;
                }
            }
        }
        Ok(())
    }

    fn write_element(
        &self,
        out: &mut String,
        element: &Element,
        style: &Style,
        tree: &SceneTree,
    ) -> Result<(), Error> {
        let attribute = Some(("data-id", element.id().to_string()));

        match element.kind() {
            ElementKind::Text => match element.text().filter(|text| !text.is_empty()) {
                Some(text) => {
                    open_tag(out, attribute, style)?;
                    writeln!(out, "{{{}}}", StyleValue::from(text))?;
                    writeln!(out, "</div>")?;
                }
                None => empty_tag(out, attribute, style)?,
            },
            ElementKind::Frame => {
                let children = tree.frame_nodes(element.id());
                if children.is_empty() {
                    empty_tag(out, attribute, style)?;
                } else {
                    open_tag(out, attribute, style)?;
                    let rows = split_into_rows(&children, self.threshold_gap);
                    self.write_rows(out, &rows, tree)?;
                    writeln!(out, "</div>")?;
                }
            }
            _ => empty_tag(out, attribute, style)?,
        }
        Ok(())
    }
}

impl Exporter for JsxExporter {
    fn export(&self, tree: &SceneTree) -> Result<String, Error> {
        if !is_component_name(&self.component_name) {
            return Err(Error::Render(format!(
                "`{}` is not a valid component name, expected an uppercase identifier",
                self.component_name
            )));
        }

        let rows = split_into_rows(tree.nodes(), self.threshold_gap);

        let mut out = String::new();
        writeln!(out, "export default function {}() {{", self.component_name)?;
        writeln!(out, "return (")?;
        open_tag(&mut out, None, &style::root_style())?;
        self.write_rows(&mut out, &rows, tree)?;
        writeln!(out, "</div>")?;
        writeln!(out, ");")?;
        writeln!(out, "}}")?;

        debug!(
            component_name = self.component_name.as_str(),
            rows_count = rows.len(),
            bytes = out.len();
            "Exported JSX component"
        );
        Ok(out)
    }
}

fn open_tag(
    out: &mut String,
    attribute: Option<(&str, String)>,
    style: &Style,
) -> Result<(), Error> {
    write_tag(out, attribute, style, ">")
}

fn empty_tag(
    out: &mut String,
    attribute: Option<(&str, String)>,
    style: &Style,
) -> Result<(), Error> {
    write_tag(out, attribute, style, " />")
}

fn write_tag(
    out: &mut String,
    attribute: Option<(&str, String)>,
    style: &Style,
    end: &str,
) -> Result<(), Error> {
    out.push_str("<div");
    if let Some((name, value)) = attribute {
        write!(out, " {name}=\"{}\"", escape_attribute(&value))?;
    }
    writeln!(out, " style={{{}}}{end}", style.to_object_literal())?;
    Ok(())
}

/// Escapes a JSX string attribute value using HTML entities.
fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            ch => escaped.push(ch),
        }
    }
    escaped
}

fn is_component_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|first| first.is_ascii_uppercase())
        && chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}

#[cfg(test)]
mod tests {
    use tessel_core::{
        geometry::{Point, Size},
        scene::Scene,
    };

    use super::*;
    use crate::config::LayoutConfig;

    fn element(id: &str, kind: ElementKind, x: f64, y: f64, w: f64, h: f64) -> Element {
        Element::new(id, kind, Point::new(x, y), Size::new(w, h))
    }

    fn export(elements: Vec<Element>) -> Result<String, Error> {
        let scene = Scene::new(elements);
        let tree = SceneTree::from_scene(&scene, &LayoutConfig::default())
            .expect("scene should be valid");
        JsxExporter::new("Board", 0.0).export(&tree)
    }

    #[test]
    fn test_empty_scene() {
        let code = export(Vec::new()).unwrap();
        let expected = "export default function Board() {\n\
                        return (\n\
                        <div style={{ position: \"relative\", display: \"flex\", flexDirection: \"column\" }}>\n\
                        </div>\n\
                        );\n\
                        }\n";
        assert_eq!(code, expected);
    }

    #[test]
    fn test_one_div_per_row() {
        let code = export(vec![
            element("a", ElementKind::Rectangle, 0.0, 0.0, 10.0, 10.0),
            element("b", ElementKind::Rectangle, 20.0, 5.0, 10.0, 10.0),
            element("c", ElementKind::Rectangle, 0.0, 40.0, 10.0, 10.0),
        ])
        .unwrap();

        assert_eq!(code.matches("flexDirection: \"row\"").count(), 2);
        let first = concat!(
            "<div data-id=\"a\" style={{ boxSizing: \"border-box\", flexShrink: 0, ",
            "marginLeft: 0, width: 10, height: 10 }} />"
        );
        let second = concat!(
            "data-id=\"b\" style={{ boxSizing: \"border-box\", flexShrink: 0, ",
            "marginLeft: 10,"
        );
        assert!(code.contains(first));
        assert!(code.contains(second));
        assert!(code.contains("marginTop: 25"));
    }

    #[test]
    fn test_text_content_is_escaped() {
        let text = element("t", ElementKind::Text, 0.0, 0.0, 50.0, 20.0);
        let code = export(vec![text.with_text("say \"hi\"\n{ok}")]).unwrap();

        assert!(code.contains("\n{\"say \\\"hi\\\"\\n{ok}\"}\n"));
    }

    #[test]
    fn test_crlf_text_stays_on_one_line() {
        let text = element("t", ElementKind::Text, 0.0, 0.0, 50.0, 20.0);
        let code = export(vec![text.with_text("line1\r\nline2")]).unwrap();

        assert!(!code.contains('\r'));
        assert!(code.contains("\n{\"line1\\r\\nline2\"}\n"));
    }

    #[test]
    fn test_frame_renders_its_children() {
        let code = export(vec![
            element("frame", ElementKind::Frame, 0.0, 0.0, 100.0, 100.0),
            element("inside", ElementKind::Rectangle, 10.0, 10.0, 20.0, 20.0)
                .with_frame_id("frame"),
        ])
        .unwrap();

        let frame_at = code.find("data-id=\"frame\"").unwrap();
        let child_at = code.find("data-id=\"inside\"").unwrap();
        assert!(frame_at < child_at);
        let padding = "paddingTop: 10, paddingRight: 70, paddingBottom: 70, paddingLeft: 10";
        assert!(code.contains(padding));
    }

    #[test]
    fn test_group_container() {
        let code = export(vec![
            element("a", ElementKind::Rectangle, 0.0, 0.0, 10.0, 10.0).with_group_ids(&["g"]),
            element("b", ElementKind::Rectangle, 0.0, 30.0, 10.0, 10.0).with_group_ids(&["g"]),
        ])
        .unwrap();

        assert!(code.contains("<div data-group-id=\"g\""));
        // The group wraps two rows of its own.
        assert_eq!(code.matches("flexDirection: \"row\"").count(), 3);
    }

    #[test]
    fn test_attribute_escaping() {
        assert_eq!(escape_attribute("a\"b&<c>"), "a&quot;b&amp;&lt;c&gt;");
    }

    #[test]
    fn test_invalid_component_name() {
        let tree = SceneTree::default();
        for name in ["", "board", "My Board", "9Lives"] {
            let err = JsxExporter::new(name, 0.0).export(&tree).unwrap_err();
            assert!(matches!(err, Error::Render(_)), "{name}");
        }
        assert!(JsxExporter::new("My_Board2", 0.0).export(&tree).is_ok());
    }
}
