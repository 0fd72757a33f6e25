//! Command routing.
//!
//! Each subcommand implements [`Command`] and reports a [`CommandResult`];
//! the [`CommandDispatcher`] owns the cross-cutting inputs (project root,
//! interpreter override, interrupt flag) and hands them to whichever command
//! the CLI selected.

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands, SetupArgs};
use crate::error::Result;
use crate::interrupt::InterruptFlag;
use crate::ui::UserInterface;

/// Trait for command implementations.
pub trait Command {
    /// Execute the command, reporting progress through `ui`.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self::from_code(0)
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }

    /// Build a result from an exit code, successful only for 0.
    pub fn from_code(exit_code: i32) -> Self {
        Self {
            success: exit_code == 0,
            exit_code,
        }
    }
}

/// Routes CLI subcommands to their implementations.
pub struct CommandDispatcher {
    project_root: PathBuf,
    python: Option<PathBuf>,
    interrupt: InterruptFlag,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given project root.
    pub fn new(project_root: PathBuf, python: Option<PathBuf>, interrupt: InterruptFlag) -> Self {
        Self {
            project_root,
            python,
            interrupt,
        }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Dispatch and execute a command.
    ///
    /// A bare `basecamp` invocation runs `setup` with default flags.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Setup(args)) => self.setup(args.clone()).execute(ui),
            Some(Commands::Start(args)) => {
                let cmd = super::start::StartCommand::new(
                    &self.project_root,
                    args.clone(),
                    self.python.clone(),
                    self.interrupt.clone(),
                );
                cmd.execute(ui)
            }
            Some(Commands::Status(args)) => {
                let cmd = super::status::StatusCommand::new(&self.project_root, args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Completions(args)) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(ui)
            }
            None => self.setup(SetupArgs::default()).execute(ui),
        }
    }

    fn setup(&self, args: SetupArgs) -> super::setup::SetupCommand {
        super::setup::SetupCommand::new(
            &self.project_root,
            args,
            self.python.clone(),
            self.interrupt.clone(),
        )
    }
}
