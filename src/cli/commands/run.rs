//! Run command implementation.
//!
//! The `plinth run` command executes the full launch sequence: banner,
//! workspace preparation, dependency check, then the blocking invocation of
//! the external reconstruction tool. The child's exit code is propagated as
//! this process's exit code on failure.

use std::path::{Path, PathBuf};

use crate::cli::args::RunArgs;
use crate::config::{load_config, PipelineConfig};
use crate::deps::PythonProbe;
use crate::error::{PlinthError, Result};
use crate::pipeline::{LaunchOptions, LaunchOutcome, Launcher};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The run command implementation.
pub struct RunCommand {
    project_root: PathBuf,
    config_path: Option<PathBuf>,
    args: RunArgs,
}

impl RunCommand {
    /// Create a new run command.
    pub fn new(project_root: &Path, config_path: Option<PathBuf>, args: RunArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_path,
            args,
        }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Apply CLI flag overrides on top of the loaded configuration.
    fn apply_overrides(&self, mut config: PipelineConfig) -> PipelineConfig {
        if let Some(image) = &self.args.image {
            config.input_image = image.clone();
        }
        if let Some(output_dir) = &self.args.output_dir {
            config.output_dir = output_dir.clone();
        }
        if let Some(device) = self.args.device {
            config.device = device;
        }
        if self.args.bake_texture {
            config.bake_texture = true;
        }
        config
    }
}

impl Command for RunCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = load_config(&self.project_root, self.config_path.as_deref())?;
        let config = self.apply_overrides(config);

        let probe = PythonProbe::new(&config.python);
        let options = LaunchOptions {
            dry_run: self.args.dry_run,
            assume_yes: self.args.yes || self.args.non_interactive,
        };

        let launcher = Launcher::new(config);
        match launcher.launch(ui, &probe, &options) {
            Ok(LaunchOutcome::Completed | LaunchOutcome::DryRun) => Ok(CommandResult::success()),
            Ok(LaunchOutcome::Aborted) => Ok(CommandResult::failure(1)),
            Err(PlinthError::MissingDependencies { packages }) => {
                ui.error(&format!(
                    "Install the missing packages and retry ({} missing)",
                    packages.len()
                ));
                Ok(CommandResult::failure(1))
            }
            Err(PlinthError::ReconstructionFailed { command, code }) => {
                ui.error(&format!(
                    "Reconstruction failed (exit code {:?}): {}",
                    code, command
                ));
                Ok(CommandResult::failure(code.unwrap_or(1)))
            }
            Err(e) => Err(e),
        }
    }
}
