//! Configuration file discovery and merging.
//!
//! Plinth looks for `plinth.yml` in the project root. The file is optional;
//! a missing file simply yields the defaults. Field precedence is
//! CLI flags > `plinth.yml` > built-in defaults, with the CLI layer applied
//! by the commands themselves.

use std::path::{Path, PathBuf};

use crate::config::schema::{ConfigFile, Device, PipelineConfig};
use crate::error::{PlinthError, Result};

/// Name of the project configuration file.
pub const CONFIG_FILE_NAME: &str = "plinth.yml";

/// Locate the config file for a project root, if one exists.
pub fn find_config_file(project_root: &Path) -> Option<PathBuf> {
    let path = project_root.join(CONFIG_FILE_NAME);
    path.is_file().then_some(path)
}

/// Load the pipeline configuration for a project.
///
/// Reads `plinth.yml` when present (or the explicit `config_path` override)
/// and merges it over the defaults. A missing file is not an error. When no
/// interpreter is configured, one is discovered on PATH (`python3`, then
/// `python`).
pub fn load_config(project_root: &Path, config_path: Option<&Path>) -> Result<PipelineConfig> {
    let path = match config_path {
        Some(explicit) => Some(explicit.to_path_buf()),
        None => find_config_file(project_root),
    };

    let Some(path) = path else {
        tracing::debug!("No config file found, using defaults");
        return Ok(with_discovered_interpreter(PipelineConfig::default()));
    };

    tracing::debug!("Loading config from {}", path.display());
    let contents = std::fs::read_to_string(&path).map_err(|e| PlinthError::ConfigParseError {
        path: path.clone(),
        message: e.to_string(),
    })?;

    let file: ConfigFile =
        serde_yaml::from_str(&contents).map_err(|e| PlinthError::ConfigParseError {
            path: path.clone(),
            message: e.to_string(),
        })?;

    let explicit_interpreter = file.python.is_some();
    let config = merge(PipelineConfig::default(), file)?;
    if explicit_interpreter {
        Ok(config)
    } else {
        Ok(with_discovered_interpreter(config))
    }
}

/// Replace the default interpreter with one discovered on PATH.
fn with_discovered_interpreter(mut config: PipelineConfig) -> PipelineConfig {
    config.python = crate::deps::discover_interpreter();
    config
}

/// Merge file-level overrides onto a base configuration.
fn merge(mut base: PipelineConfig, file: ConfigFile) -> Result<PipelineConfig> {
    if let Some(input_image) = file.input_image {
        base.input_image = input_image;
    }
    if let Some(input_dir) = file.input_dir {
        base.input_dir = input_dir;
    }
    if let Some(output_dir) = file.output_dir {
        base.output_dir = output_dir;
    }
    if let Some(device) = file.device {
        base.device = device
            .parse::<Device>()
            .map_err(|message| PlinthError::ConfigValidationError { message })?;
    }
    if let Some(bake_texture) = file.bake_texture {
        base.bake_texture = bake_texture;
    }
    if let Some(python) = file.python {
        base.python = python;
    }
    if let Some(entrypoint) = file.entrypoint {
        base.entrypoint = entrypoint;
    }
    if let Some(required_packages) = file.required_packages {
        if required_packages.is_empty() {
            return Err(PlinthError::ConfigValidationError {
                message: "required_packages must not be empty".to_string(),
            });
        }
        base.required_packages = required_packages;
    }
    Ok(base)
}
