//! Configuration loading and schema for Plinth.
//!
//! This module handles all aspects of configuration:
//! - Schema definitions in [`schema`]
//! - File discovery and merging in [`loader`]
//!
//! # Example
//!
//! ```
//! use plinth::config::load_config;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join("plinth.yml"), "device: cpu").unwrap();
//!
//! let config = load_config(temp.path(), None).unwrap();
//! assert_eq!(config.device.as_arg(), "cpu");
//! ```

pub mod loader;
pub mod schema;

pub use loader::{find_config_file, load_config, CONFIG_FILE_NAME};
pub use schema::{ConfigFile, Device, PipelineConfig, DEFAULT_REQUIRED_PACKAGES};
