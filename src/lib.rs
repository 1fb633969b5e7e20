//! Plinth - Dependency-gated launcher for single-image 3D reconstruction.
//!
//! Plinth wraps an external neural single-image-to-3D reconstruction tool:
//! it verifies that the tool's Python environment is complete, prepares the
//! input and output directories, then invokes the tool as a child process
//! and propagates its exit status. All mesh and geometry work happens in the
//! external tool; none of it lives here.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading and schema
//! - [`deps`] - Python package import probing and checking
//! - [`error`] - Error types and result aliases
//! - [`pipeline`] - Workspace preparation and the launch sequence
//! - [`ui`] - Terminal output, spinners, and prompts
//!
//! # Example
//!
//! ```
//! use plinth::config::PipelineConfig;
//! use plinth::pipeline::Invocation;
//!
//! let invocation = Invocation::build(&PipelineConfig::default());
//! assert!(invocation.render().contains("--no-bake-texture"));
//! ```

pub mod cli;
pub mod config;
pub mod deps;
pub mod error;
pub mod pipeline;
pub mod ui;

pub use error::{PlinthError, Result};
