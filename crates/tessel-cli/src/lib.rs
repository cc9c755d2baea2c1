//! CLI logic for the Tessel code generator.
//!
//! Reads a scene file, generates a component with [`tessel::CodegenBuilder`]
//! and writes it to the output path.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;

use tessel::{CodegenBuilder, TesselError};

/// Run the Tessel CLI application
///
/// # Errors
///
/// Returns `TesselError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Scene parsing errors
/// - Invalid scene geometry
/// - Code generation errors
pub fn run(args: &Args) -> Result<(), TesselError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing scene"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;

    let builder = CodegenBuilder::new(app_config);
    let scene = builder.parse(&source)?;
    let code = builder.generate(&scene)?;

    fs::write(&args.output, code)?;

    info!(output_file = args.output; "Component exported successfully");

    Ok(())
}
