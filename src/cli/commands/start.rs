//! Start command implementation.
//!
//! The `basecamp start` command provisions if needed, then launches the app
//! and forwards its exit code. With `--no-provision` it only preflights the
//! existing environment.

use std::path::{Path, PathBuf};

use crate::cli::args::StartArgs;
use crate::config::{ProjectPaths, APP_MODULE};
use crate::error::Result;
use crate::interrupt::InterruptFlag;
use crate::launch;
use crate::platform::Platform;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::setup::run_provisioning;

/// The start command implementation.
pub struct StartCommand {
    project_root: PathBuf,
    args: StartArgs,
    python: Option<PathBuf>,
    interrupt: InterruptFlag,
}

impl StartCommand {
    /// Create a new start command.
    pub fn new(
        project_root: &Path,
        args: StartArgs,
        python: Option<PathBuf>,
        interrupt: InterruptFlag,
    ) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
            python,
            interrupt,
        }
    }

    /// Check the existing environment without provisioning.
    fn preflight(&self, paths: &ProjectPaths, platform: Platform, ui: &mut dyn UserInterface) -> bool {
        let interpreter = paths.interpreter(platform);
        if !interpreter.is_file() {
            ui.error("Setup is not complete: .venv was not found.");
            ui.message("Run 'basecamp setup' first.");
            return false;
        }
        if !launch::is_module_installed(&interpreter, APP_MODULE) {
            ui.error(&format!(
                "{} is not installed in this project's .venv.",
                APP_MODULE
            ));
            ui.message("Run 'basecamp setup' first.");
            return false;
        }
        true
    }
}

impl Command for StartCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let platform = Platform::current();
        let paths = ProjectPaths::new(&self.project_root);

        if self.args.no_provision {
            if !self.preflight(&paths, platform, ui) {
                return Ok(CommandResult::failure(1));
            }
        } else {
            let provisioned = run_provisioning(
                &self.project_root,
                &self.args.setup,
                self.python.as_deref(),
                &self.interrupt,
                ui,
            )?;
            if !provisioned.success {
                return Ok(provisioned);
            }
        }

        match launch::run_app(&paths, platform, &self.interrupt, ui) {
            Ok(code) => Ok(CommandResult::from_code(code)),
            Err(e) => {
                ui.error(&e.to_string());
                Ok(CommandResult::failure(e.exit_code()))
            }
        }
    }
}
