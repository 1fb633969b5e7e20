//! Pipeline launch orchestration.
//!
//! The launch sequence is strictly linear: banner, workspace preparation,
//! dependency check, then a single blocking invocation of the external tool.
//! Each step either succeeds or aborts the whole launch; there is no retry
//! and no partial-success handling.

use crate::config::PipelineConfig;
use crate::deps::{ensure_packages, ImportProbe};
use crate::error::{PlinthError, Result};
use crate::pipeline::invocation::Invocation;
use crate::pipeline::workspace::{dir_is_populated, ensure_workspace};
use crate::ui::UserInterface;

/// Options controlling a single launch.
#[derive(Debug, Clone, Copy, Default)]
pub struct LaunchOptions {
    /// Print the command line instead of executing it.
    pub dry_run: bool,

    /// Skip the non-empty output directory confirmation.
    pub assume_yes: bool,
}

/// How a launch ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchOutcome {
    /// The external tool ran and exited 0.
    Completed,
    /// Dry-run mode; the command was shown but not executed.
    DryRun,
    /// The operator declined the output-directory confirmation.
    Aborted,
}

/// Orchestrates a reconstruction launch for one configuration.
pub struct Launcher {
    config: PipelineConfig,
}

impl Launcher {
    /// Create a launcher for the given configuration.
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// The configuration this launcher runs with.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the full launch sequence.
    pub fn launch(
        &self,
        ui: &mut dyn UserInterface,
        probe: &dyn ImportProbe,
        options: &LaunchOptions,
    ) -> Result<LaunchOutcome> {
        ui.show_header("Plinth · single-image 3D reconstruction");
        ui.message(&format!(
            "Image: {} · device: {}",
            self.config.input_image.display(),
            self.config.device
        ));

        ensure_workspace(&self.config)?;

        self.check_dependencies(ui, probe)?;
        self.check_paths()?;

        if !options.assume_yes
            && dir_is_populated(&self.config.output_dir)
            && ui.is_interactive()
        {
            let question = format!(
                "Output directory {} is not empty. Continue?",
                self.config.output_dir.display()
            );
            if !ui.confirm(&question, true)? {
                ui.warning("Launch aborted");
                return Ok(LaunchOutcome::Aborted);
            }
        }

        let invocation = Invocation::build(&self.config);

        if options.dry_run {
            ui.message("Dry-run mode; the tool will not be executed:");
            ui.message(&format!("  {}", invocation.render()));
            return Ok(LaunchOutcome::DryRun);
        }

        if ui.output_mode().shows_command_line() {
            ui.message(&format!("Running: {}", invocation.render()));
        }
        invocation.run()?;

        // No output inspection here; whatever the tool wrote belongs to
        // downstream tooling.
        ui.success("Reconstruction finished");
        Ok(LaunchOutcome::Completed)
    }

    /// Probe all required packages, reporting the full missing set on failure.
    fn check_dependencies(&self, ui: &mut dyn UserInterface, probe: &dyn ImportProbe) -> Result<()> {
        let mut spinner = ui.start_spinner("Checking required packages...");

        match ensure_packages(&self.config.required_packages, probe) {
            Ok(report) => {
                spinner.finish_success(&format!("All {} required packages found", report.len()));
                Ok(())
            }
            Err(err) => {
                spinner.finish_error("Missing required packages");
                if let PlinthError::MissingDependencies { packages } = &err {
                    for name in packages {
                        ui.error(&format!("- {}", name));
                    }
                }
                Err(err)
            }
        }
    }

    /// Verify the input image and the tool entrypoint exist before spawning.
    fn check_paths(&self) -> Result<()> {
        if !self.config.input_image.is_file() {
            return Err(PlinthError::InputImageNotFound {
                path: self.config.input_image.clone(),
            });
        }
        if !self.config.entrypoint.is_file() {
            return Err(PlinthError::EntrypointNotFound {
                path: self.config.entrypoint.clone(),
            });
        }
        Ok(())
    }
}
