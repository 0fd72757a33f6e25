//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::config::ProvisionOptions;

/// Basecamp - Python environment provisioning and app launch.
#[derive(Debug, Parser)]
#[command(name = "basecamp")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Base Python interpreter used to create the environment
    #[arg(long, global = true, env = "BASECAMP_PYTHON")]
    pub python: Option<PathBuf>,

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
    /// Provision the virtual environment (default if no command specified)
    Setup(SetupArgs),

    /// Provision if needed, then launch the app
    Start(StartArgs),

    /// Show current environment status
    Status(StatusArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `setup` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct SetupArgs {
    /// Require requirements.txt to exist and install with `pip install -r`
    #[arg(long)]
    pub require_requirements: bool,

    /// Skip writing VS Code interpreter settings
    #[arg(long)]
    pub no_editor_settings: bool,
}

impl SetupArgs {
    /// Translate CLI flags into provisioning options.
    pub fn provision_options(&self) -> ProvisionOptions {
        ProvisionOptions {
            require_requirements_file: self.require_requirements,
            write_editor_settings: !self.no_editor_settings,
        }
    }
}

/// Arguments for the `start` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct StartArgs {
    /// Launch without provisioning first (requires a completed setup)
    #[arg(long)]
    pub no_provision: bool,

    #[command(flatten)]
    pub setup: SetupArgs,
}

/// Arguments for the `status` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct StatusArgs {
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
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_parses() {
        let cli = Cli::parse_from(["basecamp"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn setup_flags_parse() {
        let cli = Cli::parse_from(["basecamp", "setup", "--require-requirements"]);
        match cli.command {
            Some(Commands::Setup(args)) => {
                assert!(args.require_requirements);
                assert!(!args.no_editor_settings);
            }
            _ => panic!("expected setup command"),
        }
    }

    #[test]
    fn setup_args_map_to_provision_options() {
        let args = SetupArgs {
            require_requirements: true,
            no_editor_settings: true,
        };
        let options = args.provision_options();
        assert!(options.require_requirements_file);
        assert!(!options.write_editor_settings);
    }

    #[test]
    fn start_flattens_setup_toggles() {
        let cli = Cli::parse_from(["basecamp", "start", "--no-provision", "--no-editor-settings"]);
        match cli.command {
            Some(Commands::Start(args)) => {
                assert!(args.no_provision);
                assert!(args.setup.no_editor_settings);
            }
            _ => panic!("expected start command"),
        }
    }

    #[test]
    fn global_flags_work_after_subcommand() {
        let cli = Cli::parse_from(["basecamp", "status", "--project", "/tmp/proj"]);
        assert_eq!(cli.project, Some(PathBuf::from("/tmp/proj")));
    }
}
