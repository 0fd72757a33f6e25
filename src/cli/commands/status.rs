//! Status command implementation.
//!
//! The `basecamp status` command reports the environment state without
//! touching anything.

use std::path::{Path, PathBuf};

use crate::cli::args::StatusArgs;
use crate::config::{ProjectPaths, ProvisionOptions};
use crate::error::Result;
use crate::platform::Platform;
use crate::provision::{detect_state, requirements};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The status command implementation.
pub struct StatusCommand {
    project_root: PathBuf,
    args: StatusArgs,
}

/// Machine-readable status report.
#[derive(Debug, serde::Serialize)]
struct StatusReport {
    state: String,
    interpreter: String,
    interpreter_present: bool,
    dependency_source: String,
    editor_settings_present: bool,
}

impl StatusCommand {
    /// Create a new status command.
    pub fn new(project_root: &Path, args: StatusArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
        }
    }

    fn report(&self) -> Result<StatusReport> {
        let platform = Platform::current();
        let paths = ProjectPaths::new(&self.project_root);

        let state = detect_state(&paths, platform);
        let interpreter = paths.interpreter(platform);
        let deps = requirements::resolve(&paths, &ProvisionOptions::default())?;

        Ok(StatusReport {
            state: state.describe().to_string(),
            interpreter_present: interpreter.is_file(),
            interpreter: interpreter.display().to_string(),
            dependency_source: deps.label(),
            editor_settings_present: paths.settings_file.exists(),
        })
    }
}

impl Command for StatusCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let report = self.report()?;

        if self.args.json {
            // Machine output bypasses the themed UI on purpose
            println!(
                "{}",
                serde_json::to_string_pretty(&report).map_err(anyhow::Error::from)?
            );
            return Ok(CommandResult::success());
        }

        ui.show_header("Environment status");
        ui.message(&format!("State: {}", report.state));
        ui.message(&format!(
            "Interpreter: {} ({})",
            report.interpreter,
            if report.interpreter_present {
                "present"
            } else {
                "missing"
            }
        ));
        ui.message(&format!("Dependency source: {}", report.dependency_source));
        ui.message(&format!(
            "Editor settings: {}",
            if report.editor_settings_present {
                "present"
            } else {
                "absent"
            }
        ));

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn empty_project_reports_absent() {
        let temp = TempDir::new().unwrap();
        let cmd = StatusCommand::new(temp.path(), StatusArgs::default());
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.success);
        assert!(ui.has_message("State: absent"));
        assert!(ui.has_message("Dependency source: built-in defaults"));
    }

    #[test]
    fn complete_environment_reports_complete() {
        let temp = TempDir::new().unwrap();
        let paths = ProjectPaths::new(temp.path());
        let interpreter = paths.interpreter(Platform::current());
        fs::create_dir_all(interpreter.parent().unwrap()).unwrap();
        fs::write(&interpreter, "").unwrap();

        let cmd = StatusCommand::new(temp.path(), StatusArgs::default());
        let mut ui = MockUI::new();
        cmd.execute(&mut ui).unwrap();

        assert!(ui.has_message("State: complete"));
        assert!(ui.has_message("(present)"));
    }

    #[test]
    fn requirements_file_changes_dependency_source() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("requirements.txt"), "requests\n").unwrap();

        let cmd = StatusCommand::new(temp.path(), StatusArgs::default());
        let mut ui = MockUI::new();
        cmd.execute(&mut ui).unwrap();

        assert!(ui.has_message("Dependency source: requirements.txt"));
    }

    #[test]
    fn report_serializes_to_json() {
        let temp = TempDir::new().unwrap();
        let cmd = StatusCommand::new(temp.path(), StatusArgs { json: true });

        let report = cmd.report().unwrap();
        let json = serde_json::to_string(&report).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed["state"], "absent");
        assert_eq!(parsed["interpreter_present"], false);
    }
}
