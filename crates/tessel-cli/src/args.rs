//! Command-line argument definitions for the Tessel CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, and logging verbosity.

use std::str::FromStr;

use clap::Parser;
use log::LevelFilter;

/// Command-line arguments for the Tessel code generator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input scene file (JSON)
    #[arg(help = "Path to the input scene file")]
    pub input: String,

    /// Path to the generated component file
    #[arg(short, long, default_value = "out.jsx")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Parses `--log-level` into a filter for the logger.
    ///
    /// # Errors
    ///
    /// Returns a message naming the rejected value if it is not a log level.
    pub fn log_filter(&self) -> Result<LevelFilter, String> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| format!("invalid log level `{}`", self.log_level))
    }
}
