//! Setup command implementation.
//!
//! The `basecamp setup` command provisions the virtual environment.

use std::path::{Path, PathBuf};

use crate::cli::args::SetupArgs;
use crate::config::{ProjectPaths, APP_ENTRY_NAME, APP_MODULE};
use crate::error::{BasecampError, Result};
use crate::interrupt::InterruptFlag;
use crate::platform::{self, Platform};
use crate::provision::{ProcessBackend, Provisioner};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The setup command implementation.
pub struct SetupCommand {
    project_root: PathBuf,
    args: SetupArgs,
    python: Option<PathBuf>,
    interrupt: InterruptFlag,
}

impl SetupCommand {
    /// Create a new setup command.
    pub fn new(
        project_root: &Path,
        args: SetupArgs,
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
}

impl Command for SetupCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        run_provisioning(
            &self.project_root,
            &self.args,
            self.python.as_deref(),
            &self.interrupt,
            ui,
        )
    }
}

/// Provision the environment and report the outcome.
///
/// Shared between `setup` and `start`: both must provision identically, and
/// every failure is reported here with its mapped exit code so callers only
/// see a [`CommandResult`].
pub(crate) fn run_provisioning(
    project_root: &Path,
    args: &SetupArgs,
    python: Option<&Path>,
    interrupt: &InterruptFlag,
    ui: &mut dyn UserInterface,
) -> Result<CommandResult> {
    let platform = Platform::current();
    let paths = ProjectPaths::new(project_root);

    let project_name = paths
        .root()
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "project".to_string());
    ui.show_header(&format!("Setting up {}", project_name));

    let base = platform::find_base_interpreter(platform, python);
    let backend = ProcessBackend::new(base, interrupt.clone());
    let provisioner = Provisioner::new(&paths, platform, args.provision_options(), &backend);

    match provisioner.provision(ui) {
        Ok(_) => {
            ui.success("Setup complete.");
            ui.message(&format!(
                "Activate environment: {}",
                platform.activation_hint()
            ));
            ui.message(&format!("Then run: {} run {}", APP_MODULE, APP_ENTRY_NAME));
            ui.message(&format!("Or run directly: {}", platform.direct_run_hint()));
            Ok(CommandResult::success())
        }
        Err(BasecampError::Interrupted) => {
            ui.error("Setup interrupted.");
            Ok(CommandResult::failure(130))
        }
        Err(e) => {
            ui.error(&e.to_string());
            Ok(CommandResult::failure(e.exit_code()))
        }
    }
}
