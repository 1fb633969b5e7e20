//! Working-directory preparation.

use std::path::Path;

use crate::config::PipelineConfig;
use crate::error::Result;

/// Ensure the input staging and output directories exist.
///
/// `create_dir_all` semantics make this idempotent: repeating the call, in
/// any order, never fails because a directory already exists.
pub fn ensure_workspace(config: &PipelineConfig) -> Result<()> {
    std::fs::create_dir_all(&config.input_dir)?;
    std::fs::create_dir_all(&config.output_dir)?;
    tracing::debug!(
        input_dir = %config.input_dir.display(),
        output_dir = %config.output_dir.display(),
        "workspace directories ready"
    );
    Ok(())
}

/// Whether a directory exists and already contains entries.
///
/// Used to warn before the reconstruction tool writes into a non-empty
/// output directory.
pub fn dir_is_populated(path: &Path) -> bool {
    std::fs::read_dir(path)
        .map(|mut entries| entries.next().is_some())
        .unwrap_or(false)
}
