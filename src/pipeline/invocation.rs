//! External reconstruction command construction and execution.
//!
//! The tool has a fixed CLI contract: the entrypoint script, the input image
//! as a positional, then `--output-dir`, `--device`, and optionally
//! `--no-bake-texture`. The argument order is part of the contract and is
//! covered by tests.

use std::process::Command;

use crate::config::PipelineConfig;
use crate::error::{PlinthError, Result};

/// A fully-built invocation of the external reconstruction tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Program to execute (the Python interpreter).
    program: String,

    /// Arguments, starting with the entrypoint script.
    args: Vec<String>,
}

impl Invocation {
    /// Build the invocation for a pipeline configuration.
    pub fn build(config: &PipelineConfig) -> Self {
        let mut args = vec![
            config.entrypoint.display().to_string(),
            config.input_image.display().to_string(),
            "--output-dir".to_string(),
            config.output_dir.display().to_string(),
            "--device".to_string(),
            config.device.as_arg().to_string(),
        ];

        if !config.bake_texture {
            args.push("--no-bake-texture".to_string());
        }

        Self {
            program: config.python.clone(),
            args,
        }
    }

    /// The program that will be executed.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// The argument vector, starting with the entrypoint script.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// The full command line as a display string.
    pub fn render(&self) -> String {
        let mut parts = Vec::with_capacity(self.args.len() + 1);
        parts.push(self.program.clone());
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }

    /// Run the tool synchronously with inherited stdio.
    ///
    /// Blocks until the child exits. A non-zero exit status (or a spawn
    /// failure) becomes [`PlinthError::ReconstructionFailed`]; there is no
    /// retry and no inspection of whatever the tool wrote.
    pub fn run(&self) -> Result<()> {
        tracing::info!(command = %self.render(), "launching reconstruction tool");

        let status = Command::new(&self.program)
            .args(&self.args)
            .status()
            .map_err(|e| {
                tracing::error!(error = %e, "failed to spawn reconstruction tool");
                PlinthError::ReconstructionFailed {
                    command: self.render(),
                    code: None,
                }
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(PlinthError::ReconstructionFailed {
                command: self.render(),
                code: status.code(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Device;
    use std::path::PathBuf;

    #[test]
    fn argument_order_is_fixed() {
        let config = PipelineConfig::default();
        let inv = Invocation::build(&config);

        assert_eq!(
            inv.args(),
            &[
                "vendor/triposr/run.py".to_string(),
                "input/photo.png".to_string(),
                "--output-dir".to_string(),
                "output".to_string(),
                "--device".to_string(),
                "cuda".to_string(),
                "--no-bake-texture".to_string(),
            ]
        );
    }

    #[test]
    fn program_is_configured_interpreter() {
        let config = PipelineConfig {
            python: "python3.11".to_string(),
            ..Default::default()
        };
        let inv = Invocation::build(&config);
        assert_eq!(inv.program(), "python3.11");
    }

    #[test]
    fn cpu_device_selected() {
        let config = PipelineConfig {
            device: Device::Cpu,
            ..Default::default()
        };
        let inv = Invocation::build(&config);

        let device_idx = inv.args().iter().position(|a| a == "--device").unwrap();
        assert_eq!(inv.args()[device_idx + 1], "cpu");
    }

    #[test]
    fn bake_texture_omits_flag() {
        let config = PipelineConfig {
            bake_texture: true,
            ..Default::default()
        };
        let inv = Invocation::build(&config);

        assert!(!inv.args().iter().any(|a| a == "--no-bake-texture"));
    }

    #[test]
    fn no_bake_texture_is_last_argument() {
        let config = PipelineConfig::default();
        let inv = Invocation::build(&config);
        assert_eq!(inv.args().last().map(String::as_str), Some("--no-bake-texture"));
    }

    #[test]
    fn render_joins_program_and_args() {
        let config = PipelineConfig {
            python: "python3".to_string(),
            entrypoint: PathBuf::from("run.py"),
            input_image: PathBuf::from("chair.png"),
            output_dir: PathBuf::from("out"),
            ..Default::default()
        };
        let rendered = Invocation::build(&config).render();

        assert_eq!(
            rendered,
            "python3 run.py chair.png --output-dir out --device cuda --no-bake-texture"
        );
    }

    #[test]
    fn run_fails_when_program_missing() {
        let config = PipelineConfig {
            python: "this-interpreter-does-not-exist-12345".to_string(),
            ..Default::default()
        };
        let err = Invocation::build(&config).run().unwrap_err();

        assert!(matches!(
            err,
            PlinthError::ReconstructionFailed { code: None, .. }
        ));
    }

    #[test]
    #[cfg(unix)]
    fn run_propagates_child_exit_code() {
        // Use a shell as the "interpreter" so the entrypoint can force an exit code.
        let config = PipelineConfig {
            python: "sh".to_string(),
            entrypoint: PathBuf::from("-c"),
            input_image: PathBuf::from("exit 3"),
            ..Default::default()
        };
        // argv: -c "exit 3" --output-dir ... ; sh evaluates the -c script and
        // ignores the trailing flags, exiting 3.
        let err = Invocation::build(&config).run().unwrap_err();

        match err {
            PlinthError::ReconstructionFailed { code, .. } => assert_eq!(code, Some(3)),
            other => panic!("expected ReconstructionFailed, got {:?}", other),
        }
    }

    #[test]
    #[cfg(unix)]
    fn run_succeeds_on_zero_exit() {
        let config = PipelineConfig {
            python: "sh".to_string(),
            entrypoint: PathBuf::from("-c"),
            input_image: PathBuf::from("exit 0"),
            ..Default::default()
        };
        assert!(Invocation::build(&config).run().is_ok());
    }
}
