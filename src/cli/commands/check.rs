//! Check command implementation.
//!
//! The `plinth check` command probes every required package and reports
//! per-package status without launching anything.

use std::path::{Path, PathBuf};

use crate::cli::args::CheckArgs;
use crate::config::load_config;
use crate::deps::{check_packages, DependencyReport, PythonProbe};
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The check command implementation.
pub struct CheckCommand {
    project_root: PathBuf,
    config_path: Option<PathBuf>,
    args: CheckArgs,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(project_root: &Path, config_path: Option<PathBuf>, args: CheckArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_path,
            args,
        }
    }

    fn render_human(&self, ui: &mut dyn UserInterface, interpreter: &str, report: &DependencyReport) {
        ui.message(&format!("Interpreter: {}", interpreter));
        for package in &report.packages {
            if package.found {
                ui.success(&package.name);
            } else {
                ui.error(&format!("- {}", package.name));
            }
        }

        let missing = report.missing();
        if missing.is_empty() {
            ui.success(&format!("All {} required packages found", report.len()));
        } else {
            ui.error(&format!(
                "{} of {} required packages missing",
                missing.len(),
                report.len()
            ));
        }
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = load_config(&self.project_root, self.config_path.as_deref())?;

        let probe = PythonProbe::new(&config.python);
        if let Some(version) = probe.version() {
            tracing::debug!(interpreter = %config.python, %version, "probing environment");
        }

        let report = check_packages(&config.required_packages, &probe);

        if self.args.json {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| anyhow::anyhow!("failed to serialize report: {}", e))?;
            ui.message(&json);
        } else {
            ui.show_header("Dependency check");
            self.render_human(ui, &config.python, &report);
        }

        if report.all_found() {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(1))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deps::PackageStatus;
    use crate::ui::MockUI;

    fn report(entries: &[(&str, bool)]) -> DependencyReport {
        DependencyReport {
            packages: entries
                .iter()
                .map(|(name, found)| PackageStatus {
                    name: name.to_string(),
                    found: *found,
                })
                .collect(),
        }
    }

    #[test]
    fn human_output_lists_missing_with_dash() {
        let cmd = CheckCommand::new(Path::new("/p"), None, CheckArgs::default());
        let mut ui = MockUI::new();

        cmd.render_human(&mut ui, "python3", &report(&[("torch", true), ("ghostlib", false)]));

        assert!(ui.successes().iter().any(|s| s == "torch"));
        assert!(ui.errors().iter().any(|e| e == "- ghostlib"));
        assert!(ui.errors().iter().any(|e| e.contains("1 of 2")));
    }

    #[test]
    fn human_output_reports_all_found() {
        let cmd = CheckCommand::new(Path::new("/p"), None, CheckArgs::default());
        let mut ui = MockUI::new();

        cmd.render_human(&mut ui, "python3", &report(&[("torch", true), ("trimesh", true)]));

        assert!(ui
            .successes()
            .iter()
            .any(|s| s.contains("All 2 required packages found")));
        assert!(ui.errors().is_empty());
    }
}
