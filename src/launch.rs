//! Application launch.
//!
//! Launching is a thin collaborator of the provisioner: preflight the
//! environment, run the app runner as a blocking subprocess, and forward its
//! exit code. A Ctrl-C here is the operator stopping the app, not a failure.

use std::path::Path;

use crate::config::{ProjectPaths, APP_MODULE};
use crate::error::{BasecampError, Result};
use crate::interrupt::{is_raised, InterruptFlag};
use crate::platform::Platform;
use crate::shell::{classify, display_command, execute, execute_quiet, CommandOptions, StepOutcome};
use crate::ui::UserInterface;

/// Check whether a module can be imported by the given interpreter.
pub fn is_module_installed(interpreter: &Path, module: &str) -> bool {
    let args = vec!["-c".to_string(), format!("import {}", module)];
    execute_quiet(interpreter, &args, None)
        .map(|result| result.success)
        .unwrap_or(false)
}

/// Launch the application and block until it exits.
///
/// Returns the application's exit code; interruption by the operator counts
/// as a clean stop (code 0).
pub fn run_app(
    paths: &ProjectPaths,
    platform: Platform,
    interrupt: &InterruptFlag,
    ui: &mut dyn UserInterface,
) -> Result<i32> {
    let interpreter = paths.interpreter(platform);
    if !interpreter.is_file() {
        return Err(BasecampError::InterpreterMissing { path: interpreter });
    }
    if !paths.app_entry.is_file() {
        return Err(BasecampError::AppEntryNotFound {
            path: paths.app_entry.clone(),
        });
    }

    ui.step(&format!("Starting {} app", APP_MODULE));
    ui.message("Press Ctrl+C to stop.");

    let args = vec![
        "-m".to_string(),
        APP_MODULE.to_string(),
        "run".to_string(),
        paths.app_entry.display().to_string(),
    ];
    let options = CommandOptions {
        cwd: Some(paths.root.clone()),
        ..Default::default()
    };
    let result = execute(&interpreter, &args, &options)?;

    match classify(&result, is_raised(interrupt)) {
        StepOutcome::Completed => Ok(0),
        StepOutcome::Interrupted => {
            ui.message("Stopped.");
            Ok(0)
        }
        StepOutcome::Failed(code) => Err(BasecampError::CommandFailed {
            command: display_command(&interpreter, &args),
            code: Some(code),
        }),
    }
}
