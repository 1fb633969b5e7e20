//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::config::Device;

/// Plinth - Dependency-gated launcher for single-image 3D reconstruction.
#[derive(Debug, Parser)]
#[command(name = "plinth")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides default plinth.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Launch the reconstruction pipeline (default if no command specified)
    Run(RunArgs),

    /// Check that required packages are importable
    Check(CheckArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `run` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RunArgs {
    /// Input image to reconstruct
    #[arg(short, long)]
    pub image: Option<PathBuf>,

    /// Directory the tool writes meshes into
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Compute device for the reconstruction tool
    #[arg(short, long, value_enum)]
    pub device: Option<Device>,

    /// Bake a texture (omits the tool's --no-bake-texture flag)
    #[arg(long)]
    pub bake_texture: bool,

    /// Print the command line without executing it
    #[arg(long)]
    pub dry_run: bool,

    /// Answer yes to all confirmations
    #[arg(short, long)]
    pub yes: bool,

    /// Never prompt; take default answers
    #[arg(long)]
    pub non_interactive: bool,
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CheckArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_without_subcommand() {
        let cli = Cli::try_parse_from(["plinth"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn cli_parses_run_flags() {
        let cli = Cli::try_parse_from([
            "plinth",
            "run",
            "--image",
            "chair.png",
            "--device",
            "cpu",
            "--dry-run",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Run(args)) => {
                assert_eq!(args.image, Some(PathBuf::from("chair.png")));
                assert_eq!(args.device, Some(Device::Cpu));
                assert!(args.dry_run);
                assert!(!args.bake_texture);
            }
            other => panic!("expected run command, got {:?}", other),
        }
    }

    #[test]
    fn cli_rejects_unknown_device() {
        assert!(Cli::try_parse_from(["plinth", "run", "--device", "tpu"]).is_err());
    }

    #[test]
    fn cli_parses_check_json() {
        let cli = Cli::try_parse_from(["plinth", "check", "--json"]).unwrap();
        match cli.command {
            Some(Commands::Check(args)) => assert!(args.json),
            other => panic!("expected check command, got {:?}", other),
        }
    }

    #[test]
    fn cli_global_flags_work_after_subcommand() {
        let cli = Cli::try_parse_from(["plinth", "check", "--debug"]).unwrap();
        assert!(cli.debug);
    }

    #[test]
    fn cli_command_structure_is_valid() {
        Cli::command().debug_assert();
    }
}
