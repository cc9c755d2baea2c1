//! Configuration types for Tessel code generation.
//!
//! This module provides configuration structures that control how scenes
//! are segmented into rows, how generated code is named, and how it is
//! formatted. All types implement [`serde::Deserialize`] for flexible loading
//! from external sources, and every field has a default.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining all sections.
//! - [`LayoutConfig`] - Row threshold gap and sibling ordering.
//! - [`FormatConfig`] - Settings handed to the code formatter.
//! - [`OutputConfig`] - Naming of the generated component.
//!
//! # Example
//!
//! ```
//! # use tessel::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().row_threshold_gap(), 0.0);
//! assert_eq!(config.format().indent_width(), 2);
//! assert_eq!(config.output().component_name(), "Board");
//! ```

use serde::Deserialize;

/// Top-level configuration combining layout, format and output settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Formatter configuration section.
    #[serde(default)]
    format: FormatConfig,

    /// Output configuration section.
    #[serde(default)]
    output: OutputConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(layout: LayoutConfig, format: FormatConfig, output: OutputConfig) -> Self {
        Self {
            layout,
            format,
            output,
        }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the formatter configuration.
    pub fn format(&self) -> &FormatConfig {
        &self.format
    }

    /// Returns the output configuration.
    pub fn output(&self) -> &OutputConfig {
        &self.output
    }
}

/// Order in which sibling nodes are fed to row segmentation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementOrder {
    /// Editor document order (z-order).
    #[default]
    Document,
    /// Stable sort by top edge, then left edge.
    TopToBottom,
}

/// Row segmentation settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LayoutConfig {
    /// Vertical overlap two neighbours must strictly exceed to share a row.
    #[serde(default)]
    row_threshold_gap: f64,

    /// Sibling ordering before segmentation.
    #[serde(default)]
    order: ElementOrder,
}

impl LayoutConfig {
    pub fn new(row_threshold_gap: f64, order: ElementOrder) -> Self {
        Self {
            row_threshold_gap,
            order,
        }
    }

    /// Returns the row threshold gap in scene units.
    pub fn row_threshold_gap(&self) -> f64 {
        self.row_threshold_gap
    }

    pub fn order(&self) -> ElementOrder {
        self.order
    }
}

/// Quote character used for string literals in generated code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStyle {
    #[default]
    Double,
    Single,
}

/// Whether a sole arrow function parameter is wrapped in parentheses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrowParens {
    #[default]
    Always,
    Avoid,
}

/// Settings for the code formatter.
#[derive(Debug, Clone, Deserialize)]
pub struct FormatConfig {
    /// When false the generated code is emitted as produced.
    #[serde(default = "default_enabled")]
    enabled: bool,

    /// Parser mode name, e.g. `babel` or `typescript`.
    #[serde(default = "default_parser")]
    parser: String,

    #[serde(default)]
    quote_style: QuoteStyle,

    /// Spaces per nesting level.
    #[serde(default = "default_indent_width")]
    indent_width: usize,

    /// Line length above which tags are broken over several lines.
    #[serde(default = "default_print_width")]
    print_width: usize,

    #[serde(default)]
    arrow_parens: ArrowParens,
}

fn default_enabled() -> bool {
    true
}

fn default_parser() -> String {
    "babel".to_string()
}

fn default_indent_width() -> usize {
    2
}

fn default_print_width() -> usize {
    80
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            parser: default_parser(),
            quote_style: QuoteStyle::default(),
            indent_width: default_indent_width(),
            print_width: default_print_width(),
            arrow_parens: ArrowParens::default(),
        }
    }
}

impl FormatConfig {
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn parser(&self) -> &str {
        &self.parser
    }

    pub fn quote_style(&self) -> QuoteStyle {
        self.quote_style
    }

    pub fn indent_width(&self) -> usize {
        self.indent_width
    }

    pub fn print_width(&self) -> usize {
        self.print_width
    }

    pub fn arrow_parens(&self) -> ArrowParens {
        self.arrow_parens
    }

    /// Returns a copy with a different parser mode.
    pub fn with_parser(mut self, parser: impl Into<String>) -> Self {
        self.parser = parser.into();
        self
    }

    pub fn with_quote_style(mut self, quote_style: QuoteStyle) -> Self {
        self.quote_style = quote_style;
        self
    }

    pub fn with_indent_width(mut self, indent_width: usize) -> Self {
        self.indent_width = indent_width;
        self
    }

    pub fn with_print_width(mut self, print_width: usize) -> Self {
        self.print_width = print_width;
        self
    }

    pub fn with_arrow_parens(mut self, arrow_parens: ArrowParens) -> Self {
        self.arrow_parens = arrow_parens;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// Naming of the generated code.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Name of the generated function component.
    #[serde(default = "default_component_name")]
    component_name: String,
}

fn default_component_name() -> String {
    "Board".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            component_name: default_component_name(),
        }
    }
}

impl OutputConfig {
    pub fn new(component_name: impl Into<String>) -> Self {
        Self {
            component_name: component_name.into(),
        }
    }

    pub fn component_name(&self) -> &str {
        &self.component_name
    }
}
