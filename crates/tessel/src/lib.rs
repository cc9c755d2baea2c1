//! Tessel - turns whiteboard scenes into row-based layout code.
//!
//! A scene of absolutely positioned shapes is grouped, segmented into
//! horizontal rows and emitted as nested flex containers whose margins
//! reproduce the original spacing.
//!
//! The pipeline stages are public so each one can be used on its own:
//!
//! - [`structure`]: validation and the node tree of groups and frames;
//! - [`layout`]: bounding boxes, row segmentation and derived metrics;
//! - [`style`]: style objects for rows and nodes;
//! - [`export`]: code generation;
//! - [`format`]: formatting of the generated code.

pub mod config;
pub mod export;
pub mod format;
pub mod layout;
pub mod structure;
pub mod style;

mod error;

pub use tessel_core::{color, geometry, identifier, scene};

pub use error::TesselError;

use log::{debug, info, trace};

use config::AppConfig;
use export::{Exporter, jsx::JsxExporter};
use format::MarkupFormatter;
use scene::Scene;
use structure::SceneTree;

/// Builder for turning scenes into code.
///
/// # Examples
///
/// ```rust
/// use tessel::{CodegenBuilder, config::AppConfig};
///
/// let source = r#"{
///     "elements": [
///         { "id": "a", "type": "rectangle", "x": 0, "y": 0, "width": 100, "height": 40 }
///     ]
/// }"#;
///
/// let builder = CodegenBuilder::new(AppConfig::default());
/// let scene = builder.parse(source).expect("Failed to parse");
/// let code = builder.generate(&scene).expect("Failed to generate");
///
/// assert!(code.starts_with("export default function Board() {"));
/// ```
#[derive(Default)]
pub struct CodegenBuilder {
    config: AppConfig,
}

impl CodegenBuilder {
    /// Create a new builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Parse a scene document.
    ///
    /// # Errors
    ///
    /// Returns [`TesselError::Parse`] if the source is not a valid scene
    /// document. The error keeps the source for diagnostics.
    pub fn parse(&self, source: &str) -> Result<Scene, TesselError> {
        info!("Parsing scene");

        let scene =
            Scene::from_json(source).map_err(|err| TesselError::new_parse_error(err, source))?;

        debug!(elements_count = scene.elements().len(); "Scene parsed successfully");
        trace!(scene:?; "Parsed scene");

        Ok(scene)
    }

    /// Build the node tree of a scene.
    ///
    /// # Errors
    ///
    /// Returns [`TesselError::Scene`] if an element has invalid geometry or
    /// a duplicate id.
    pub fn build_tree(&self, scene: &Scene) -> Result<SceneTree, TesselError> {
        info!("Building scene tree");
        SceneTree::from_scene(scene, self.config.layout())
    }

    /// Generate code for a scene.
    ///
    /// The result is formatted according to the format configuration; if
    /// formatting fails the unformatted code is returned.
    ///
    /// # Errors
    ///
    /// Returns [`TesselError::Scene`] for invalid scenes and
    /// [`TesselError::Export`] if the code cannot be generated, for example
    /// when the component name is not a valid identifier.
    pub fn generate(&self, scene: &Scene) -> Result<String, TesselError> {
        let tree = self.build_tree(scene)?;
        debug!(nodes_count = tree.nodes().len(); "Structure built successfully");

        let exporter = JsxExporter::new(
            self.config.output().component_name(),
            self.config.layout().row_threshold_gap(),
        );
        let code = exporter.export(&tree)?;
        info!(component_name = exporter.component_name(); "Code generated");

        let format_config = self.config.format();
        if !format_config.enabled() {
            debug!("Formatting disabled");
            return Ok(code);
        }

        let formatter = MarkupFormatter::new(format_config.clone());
        Ok(format::format_or_original(&formatter, &code))
    }
}
