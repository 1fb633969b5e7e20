//! Reconstruction pipeline orchestration.
//!
//! - [`workspace`] - input/output directory preparation
//! - [`invocation`] - external command construction and execution
//! - [`launcher`] - the banner → dirs → deps → invoke sequence

pub mod invocation;
pub mod launcher;
pub mod workspace;

pub use invocation::Invocation;
pub use launcher::{LaunchOptions, LaunchOutcome, Launcher};
pub use workspace::{dir_is_populated, ensure_workspace};
