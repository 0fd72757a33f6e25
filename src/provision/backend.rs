//! External-action seam for the provisioner.
//!
//! Every subprocess the provisioner needs goes through [`StepBackend`], so
//! the state machine can be exercised in tests with a recording fake.

use std::path::{Path, PathBuf};

use crate::error::{BasecampError, Result};
use crate::interrupt::{is_raised, InterruptFlag};
use crate::shell::{classify, execute, CommandOptions, StepOutcome};

/// The external actions a provisioning run performs.
pub trait StepBackend {
    /// Create the environment directory, clearing existing contents when
    /// `clear` is set.
    fn create_env(&self, venv_dir: &Path, clear: bool) -> Result<StepOutcome>;

    /// Run the given interpreter with arguments, streaming output to the
    /// terminal, and classify how it ended.
    fn run_interpreter(&self, interpreter: &Path, args: &[String]) -> Result<StepOutcome>;

    /// Check whether the operator has cancelled the run.
    fn interrupted(&self) -> bool;
}

/// Production backend: real subprocesses, real Ctrl-C flag.
pub struct ProcessBackend {
    base_interpreter: Option<PathBuf>,
    interrupt: InterruptFlag,
}

impl ProcessBackend {
    /// Create a backend.
    ///
    /// `base_interpreter` is the system Python used for `-m venv`; it is
    /// only required when an environment actually has to be created, so a
    /// missing one is reported lazily.
    pub fn new(base_interpreter: Option<PathBuf>, interrupt: InterruptFlag) -> Self {
        Self {
            base_interpreter,
            interrupt,
        }
    }
}

impl StepBackend for ProcessBackend {
    fn create_env(&self, venv_dir: &Path, clear: bool) -> Result<StepOutcome> {
        let base = self
            .base_interpreter
            .as_ref()
            .ok_or(BasecampError::BaseInterpreterNotFound)?;

        let mut args: Vec<String> = vec!["-m".to_string(), "venv".to_string()];
        if clear {
            args.push("--clear".to_string());
        }
        args.push(venv_dir.display().to_string());

        // Creation output is captured: it is quiet on success, and the
        // caller shows a spinner while this blocks.
        let options = CommandOptions {
            capture: true,
            ..Default::default()
        };
        let result = execute(base, &args, &options)?;

        let outcome = classify(&result, is_raised(&self.interrupt));
        if let StepOutcome::Failed(code) = outcome {
            tracing::debug!("venv creation exited {}: {}", code, result.stderr.trim());
        }
        Ok(outcome)
    }

    fn run_interpreter(&self, interpreter: &Path, args: &[String]) -> Result<StepOutcome> {
        // pip output goes straight to the operator's terminal.
        let result = execute(interpreter, args, &CommandOptions::default())?;
        Ok(classify(&result, is_raised(&self.interrupt)))
    }

    fn interrupted(&self) -> bool {
        is_raised(&self.interrupt)
    }
}
