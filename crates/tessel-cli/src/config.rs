//! Configuration file loading for the CLI
//!
//! This module handles finding and loading TOML configuration files
//! from various locations (explicit path, local directory, system directory).

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use tessel::{TesselError, config::AppConfig};

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<ConfigError> for TesselError {
    fn from(err: ConfigError) -> Self {
        TesselError::Io(io::Error::other(err.to_string()))
    }
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (tessel/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed or holds invalid values
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, TesselError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new("tessel/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "tessel", "tessel") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

/// Load and validate configuration from a TOML file
fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, TesselError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    let config = parse_config(&content)?;

    Ok(config)
}

fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig =
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    let gap = config.layout().row_threshold_gap();
    if !gap.is_finite() {
        return Err(ConfigError::Validation(format!(
            "layout.row_threshold_gap must be a finite number, got {gap}"
        )));
    }
    if config.format().print_width() == 0 {
        return Err(ConfigError::Validation(
            "format.print_width must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use tessel::config::{ArrowParens, ElementOrder, QuoteStyle};

    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(
            r#"
            [layout]
            row_threshold_gap = 4.5
            order = "top-to-bottom"

            [format]
            parser = "typescript"
            quote_style = "single"
            indent_width = 4
            print_width = 100
            arrow_parens = "avoid"

            [output]
            component_name = "LoginScreen"
            "#,
        )
        .unwrap();

        assert_eq!(config.layout().row_threshold_gap(), 4.5);
        assert_eq!(config.layout().order(), ElementOrder::TopToBottom);
        assert_eq!(config.format().parser(), "typescript");
        assert_eq!(config.format().quote_style(), QuoteStyle::Single);
        assert_eq!(config.format().indent_width(), 4);
        assert_eq!(config.format().print_width(), 100);
        assert_eq!(config.format().arrow_parens(), ArrowParens::Avoid);
        assert_eq!(config.output().component_name(), "LoginScreen");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = parse_config("[layout]\nrow_threshold_gap = 2.0\n").unwrap();

        assert_eq!(config.layout().row_threshold_gap(), 2.0);
        assert_eq!(config.format().parser(), "babel");
        assert_eq!(config.output().component_name(), "Board");
    }

    #[test]
    fn test_invalid_toml() {
        let err = parse_config("[layout\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_zero_print_width_is_rejected() {
        let err = parse_config("[format]\nprint_width = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_non_finite_gap_is_rejected() {
        let err = parse_config("[layout]\nrow_threshold_gap = nan\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_missing_explicit_file() {
        let err = load_config(Some("does/not/exist.toml")).unwrap_err();
        assert!(matches!(err, TesselError::Io(_)));
        assert!(err.to_string().contains("Missing configuration file"));
    }
}
