//! Environment provisioning.
//!
//! The provisioner decides what the environment directory needs (create,
//! rebuild, or reuse), drives the creation step, and then runs the two pip
//! steps against the environment's interpreter. All external actions go
//! through the [`StepBackend`] seam so the decision procedure can be tested
//! without subprocesses.
//!
//! Rerunning after any failure or interruption is always safe: state is
//! re-detected from the filesystem, so a half-created environment is
//! classified as incomplete and rebuilt with the clear flag.

pub mod backend;
pub mod requirements;
pub mod state;

pub use backend::{ProcessBackend, StepBackend};
pub use requirements::{DependencyList, DependencySource, DEFAULT_REQUIREMENTS};
pub use state::{detect_state, EnvState};

use std::path::Path;

use crate::config::{ProjectPaths, ProvisionOptions};
use crate::editor;
use crate::error::{BasecampError, Result};
use crate::platform::Platform;
use crate::shell::{display_command, StepOutcome};
use crate::ui::UserInterface;

/// Drives one provisioning run.
pub struct Provisioner<'a> {
    paths: &'a ProjectPaths,
    platform: Platform,
    options: ProvisionOptions,
    backend: &'a dyn StepBackend,
}

impl<'a> Provisioner<'a> {
    /// Create a provisioner for one run.
    pub fn new(
        paths: &'a ProjectPaths,
        platform: Platform,
        options: ProvisionOptions,
        backend: &'a dyn StepBackend,
    ) -> Self {
        Self {
            paths,
            platform,
            options,
            backend,
        }
    }

    /// Provision the environment: ensure it exists and is complete, then
    /// upgrade pip and install the resolved dependencies.
    ///
    /// Returns the dependency list that was installed.
    pub fn provision(&self, ui: &mut dyn UserInterface) -> Result<DependencyList> {
        // Resolve dependencies first: a missing mandatory file must fail
        // before any side effect.
        let deps = requirements::resolve(self.paths, &self.options)?;

        match detect_state(self.paths, self.platform) {
            EnvState::Complete => {
                tracing::debug!("Reusing environment at {}", self.paths.venv_dir.display());
                ui.message("Virtual environment already exists at .venv. Reusing it.");
            }
            EnvState::Absent => {
                self.create(ui, false)?;
            }
            EnvState::Incomplete => {
                ui.message("Detected incomplete .venv (often caused by an interrupted setup).");
                self.create(ui, true)?;
            }
        }

        let interpreter = self.paths.interpreter(self.platform);
        if !interpreter.is_file() {
            return Err(BasecampError::InterpreterMissing { path: interpreter });
        }

        self.run_step(ui, "Upgrading pip", &interpreter, pip_upgrade_args())?;

        ui.message(&format!("Dependency source: {}", deps.label()));
        self.run_step(
            ui,
            "Installing dependencies",
            &interpreter,
            self.install_args(&deps),
        )?;

        if self.options.write_editor_settings {
            // Best effort: a broken settings write must never fail the run.
            match editor::write_settings(self.paths, self.platform, ui) {
                Ok(()) => ui.message("Updated VS Code settings for the .venv interpreter."),
                Err(e) => ui.warning(&format!("Could not update VS Code settings: {}", e)),
            }
        }

        Ok(deps)
    }

    /// Run the environment-creation step.
    fn create(&self, ui: &mut dyn UserInterface, clear: bool) -> Result<()> {
        let message = if clear {
            "Rebuilding incomplete virtual environment at .venv ..."
        } else {
            "Creating virtual environment at .venv ..."
        };
        let mut spinner = ui.start_spinner(message);

        match self.backend.create_env(&self.paths.venv_dir, clear)? {
            StepOutcome::Completed => {
                spinner.finish_success("Virtual environment ready at .venv");
                Ok(())
            }
            StepOutcome::Interrupted => {
                spinner.finish_error("Setup interrupted while creating .venv");
                ui.message("Rerun this command to continue.");
                Err(BasecampError::Interrupted)
            }
            StepOutcome::Failed(code) => {
                spinner.finish_error("Virtual environment creation failed");
                Err(BasecampError::CommandFailed {
                    command: format!("python -m venv {}", self.paths.venv_dir.display()),
                    code: Some(code),
                })
            }
        }
    }

    /// Announce and run one blocking interpreter step.
    fn run_step(
        &self,
        ui: &mut dyn UserInterface,
        description: &str,
        interpreter: &Path,
        args: Vec<String>,
    ) -> Result<()> {
        // A Ctrl-C between steps must not start the next one.
        if self.backend.interrupted() {
            return Err(BasecampError::Interrupted);
        }

        ui.step(description);
        if ui.output_mode().shows_commands() {
            ui.message(&display_command(interpreter, &args));
        }

        match self.backend.run_interpreter(interpreter, &args)? {
            StepOutcome::Completed => Ok(()),
            StepOutcome::Interrupted => Err(BasecampError::Interrupted),
            StepOutcome::Failed(code) => Err(BasecampError::CommandFailed {
                command: display_command(interpreter, &args),
                code: Some(code),
            }),
        }
    }

    /// Build the pip arguments for the install step.
    fn install_args(&self, deps: &DependencyList) -> Vec<String> {
        let mut args: Vec<String> = ["-m", "pip", "install"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        if self.options.require_requirements_file {
            args.push("-r".to_string());
            args.push(self.paths.requirements_file.display().to_string());
        } else {
            args.extend(deps.specs.iter().cloned());
        }
        args
    }
}

fn pip_upgrade_args() -> Vec<String> {
    ["-m", "pip", "install", "--upgrade", "pip"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::fs;
    use tempfile::TempDir;

    /// Backend fake that records every external action.
    ///
    /// A successful creation writes the interpreter file so state detection
    /// stays real; an interrupted creation leaves the bare directory behind,
    /// the same wreckage an aborted `python -m venv` leaves.
    struct FakeBackend {
        platform: Platform,
        creations: RefCell<Vec<bool>>,
        create_outcome: StepOutcome,
        write_interpreter: bool,
        step_outcomes: RefCell<VecDeque<StepOutcome>>,
        step_calls: RefCell<Vec<Vec<String>>>,
    }

    impl FakeBackend {
        fn new() -> Self {
            Self {
                platform: Platform::current(),
                creations: RefCell::new(Vec::new()),
                create_outcome: StepOutcome::Completed,
                write_interpreter: true,
                step_outcomes: RefCell::new(VecDeque::new()),
                step_calls: RefCell::new(Vec::new()),
            }
        }

        fn with_create_outcome(mut self, outcome: StepOutcome) -> Self {
            self.create_outcome = outcome;
            self
        }

        fn with_step_outcomes(self, outcomes: Vec<StepOutcome>) -> Self {
            *self.step_outcomes.borrow_mut() = outcomes.into();
            self
        }

        fn without_interpreter(mut self) -> Self {
            self.write_interpreter = false;
            self
        }
    }

    impl StepBackend for FakeBackend {
        fn create_env(&self, venv_dir: &Path, clear: bool) -> Result<StepOutcome> {
            self.creations.borrow_mut().push(clear);
            match self.create_outcome {
                StepOutcome::Completed => {
                    let interpreter = venv_dir.join(self.platform.interpreter_rel());
                    if self.write_interpreter {
                        fs::create_dir_all(interpreter.parent().unwrap()).unwrap();
                        fs::write(&interpreter, "").unwrap();
                    } else {
                        fs::create_dir_all(venv_dir).unwrap();
                    }
                }
                StepOutcome::Interrupted | StepOutcome::Failed(_) => {
                    fs::create_dir_all(venv_dir).unwrap();
                }
            }
            Ok(self.create_outcome)
        }

        fn run_interpreter(&self, _interpreter: &Path, args: &[String]) -> Result<StepOutcome> {
            self.step_calls.borrow_mut().push(args.to_vec());
            Ok(self
                .step_outcomes
                .borrow_mut()
                .pop_front()
                .unwrap_or(StepOutcome::Completed))
        }

        fn interrupted(&self) -> bool {
            false
        }
    }

    fn setup(temp: &TempDir) -> ProjectPaths {
        ProjectPaths::new(temp.path())
    }

    fn provision_with(
        paths: &ProjectPaths,
        options: ProvisionOptions,
        backend: &FakeBackend,
        ui: &mut MockUI,
    ) -> Result<DependencyList> {
        let provisioner = Provisioner::new(paths, Platform::current(), options, backend);
        provisioner.provision(ui)
    }

    #[test]
    fn absent_environment_created_without_clear_flag() {
        let temp = TempDir::new().unwrap();
        let paths = setup(&temp);
        let backend = FakeBackend::new();
        let mut ui = MockUI::new();

        let result = provision_with(&paths, ProvisionOptions::default(), &backend, &mut ui);

        assert!(result.is_ok());
        assert_eq!(*backend.creations.borrow(), vec![false]);
    }

    #[test]
    fn incomplete_environment_recreated_with_clear_flag() {
        let temp = TempDir::new().unwrap();
        let paths = setup(&temp);
        fs::create_dir_all(&paths.venv_dir).unwrap();
        let backend = FakeBackend::new();
        let mut ui = MockUI::new();

        let result = provision_with(&paths, ProvisionOptions::default(), &backend, &mut ui);

        assert!(result.is_ok());
        assert_eq!(*backend.creations.borrow(), vec![true]);
        assert!(ui.has_message("incomplete"));
    }

    #[test]
    fn complete_environment_reused_without_creation() {
        let temp = TempDir::new().unwrap();
        let paths = setup(&temp);
        let interpreter = paths.interpreter(Platform::current());
        fs::create_dir_all(interpreter.parent().unwrap()).unwrap();
        fs::write(&interpreter, "").unwrap();
        let backend = FakeBackend::new();
        let mut ui = MockUI::new();

        let result = provision_with(&paths, ProvisionOptions::default(), &backend, &mut ui);

        assert!(result.is_ok());
        assert!(backend.creations.borrow().is_empty());
        assert!(ui.has_message("Reusing"));
    }

    #[test]
    fn repeated_runs_on_complete_environment_never_create() {
        let temp = TempDir::new().unwrap();
        let paths = setup(&temp);
        let backend = FakeBackend::new();
        let mut ui = MockUI::new();

        provision_with(&paths, ProvisionOptions::default(), &backend, &mut ui).unwrap();
        provision_with(&paths, ProvisionOptions::default(), &backend, &mut ui).unwrap();
        provision_with(&paths, ProvisionOptions::default(), &backend, &mut ui).unwrap();

        // Only the very first run creates anything
        assert_eq!(*backend.creations.borrow(), vec![false]);
    }

    #[test]
    fn pip_upgrade_runs_before_install() {
        let temp = TempDir::new().unwrap();
        let paths = setup(&temp);
        let backend = FakeBackend::new();
        let mut ui = MockUI::new();

        provision_with(&paths, ProvisionOptions::default(), &backend, &mut ui).unwrap();

        let calls = backend.step_calls.borrow();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], pip_upgrade_args());
        assert!(calls[1].contains(&"streamlit".to_string()));
        assert!(ui.has_step("Upgrading pip"));
        assert!(ui.has_step("Installing dependencies"));
    }

    #[test]
    fn requirements_file_overrides_defaults_and_keeps_order() {
        let temp = TempDir::new().unwrap();
        let paths = setup(&temp);
        fs::write(
            &paths.requirements_file,
            "requests\n# comment\n\nnumpy\n",
        )
        .unwrap();
        let backend = FakeBackend::new();
        let mut ui = MockUI::new();

        let deps = provision_with(&paths, ProvisionOptions::default(), &backend, &mut ui).unwrap();

        assert_eq!(deps.specs, vec!["requests", "numpy"]);
        assert_eq!(deps.label(), "requirements.txt");
        assert!(ui.has_message("Dependency source: requirements.txt"));

        let calls = backend.step_calls.borrow();
        let install = &calls[1];
        let requests_pos = install.iter().position(|a| a == "requests").unwrap();
        let numpy_pos = install.iter().position(|a| a == "numpy").unwrap();
        assert!(requests_pos < numpy_pos);
    }

    #[test]
    fn missing_requirements_file_falls_back_to_defaults() {
        let temp = TempDir::new().unwrap();
        let paths = setup(&temp);
        let backend = FakeBackend::new();
        let mut ui = MockUI::new();

        let deps = provision_with(&paths, ProvisionOptions::default(), &backend, &mut ui).unwrap();

        assert_eq!(deps.specs, DEFAULT_REQUIREMENTS.to_vec());
        assert_eq!(deps.label(), "built-in defaults");
        assert!(ui.has_message("Dependency source: built-in defaults"));
    }

    #[test]
    fn install_failure_propagates_exit_code() {
        let temp = TempDir::new().unwrap();
        let paths = setup(&temp);
        let backend = FakeBackend::new()
            .with_step_outcomes(vec![StepOutcome::Completed, StepOutcome::Failed(3)]);
        let mut ui = MockUI::new();

        let err = provision_with(&paths, ProvisionOptions::default(), &backend, &mut ui)
            .unwrap_err();

        assert_eq!(err.exit_code(), 3);
        assert!(matches!(
            err,
            BasecampError::CommandFailed { code: Some(3), .. }
        ));
    }

    #[test]
    fn upgrade_failure_skips_install_step() {
        let temp = TempDir::new().unwrap();
        let paths = setup(&temp);
        let backend = FakeBackend::new().with_step_outcomes(vec![StepOutcome::Failed(2)]);
        let mut ui = MockUI::new();

        let err = provision_with(&paths, ProvisionOptions::default(), &backend, &mut ui)
            .unwrap_err();

        assert_eq!(err.exit_code(), 2);
        // The install step never ran
        assert_eq!(backend.step_calls.borrow().len(), 1);
    }

    #[test]
    fn interrupted_creation_exits_130_and_rerun_sees_incomplete() {
        let temp = TempDir::new().unwrap();
        let paths = setup(&temp);
        let backend = FakeBackend::new().with_create_outcome(StepOutcome::Interrupted);
        let mut ui = MockUI::new();

        let err = provision_with(&paths, ProvisionOptions::default(), &backend, &mut ui)
            .unwrap_err();

        assert!(matches!(err, BasecampError::Interrupted));
        assert_eq!(err.exit_code(), 130);
        assert!(ui.has_message("Rerun this command to continue."));
        // Installation was never attempted
        assert!(backend.step_calls.borrow().is_empty());
        // The wreckage is classified as incomplete, never complete
        assert_eq!(
            detect_state(&paths, Platform::current()),
            EnvState::Incomplete
        );
    }

    #[test]
    fn interrupted_install_exits_130() {
        let temp = TempDir::new().unwrap();
        let paths = setup(&temp);
        let backend = FakeBackend::new()
            .with_step_outcomes(vec![StepOutcome::Completed, StepOutcome::Interrupted]);
        let mut ui = MockUI::new();

        let err = provision_with(&paths, ProvisionOptions::default(), &backend, &mut ui)
            .unwrap_err();

        assert_eq!(err.exit_code(), 130);
    }

    #[test]
    fn interpreter_missing_after_creation_is_precondition_failure() {
        let temp = TempDir::new().unwrap();
        let paths = setup(&temp);
        let backend = FakeBackend::new().without_interpreter();
        let mut ui = MockUI::new();

        let err = provision_with(&paths, ProvisionOptions::default(), &backend, &mut ui)
            .unwrap_err();

        assert!(matches!(err, BasecampError::InterpreterMissing { .. }));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn mandatory_requirements_file_missing_fails_without_side_effects() {
        let temp = TempDir::new().unwrap();
        let paths = setup(&temp);
        let backend = FakeBackend::new();
        let mut ui = MockUI::new();
        let options = ProvisionOptions {
            require_requirements_file: true,
            ..Default::default()
        };

        let err = provision_with(&paths, options, &backend, &mut ui).unwrap_err();

        assert!(matches!(err, BasecampError::RequirementsNotFound { .. }));
        assert_eq!(err.exit_code(), 1);
        assert!(backend.creations.borrow().is_empty());
        assert!(backend.step_calls.borrow().is_empty());
        assert!(!paths.venv_dir.exists());
    }

    #[test]
    fn mandatory_requirements_file_installs_via_dash_r() {
        let temp = TempDir::new().unwrap();
        let paths = setup(&temp);
        fs::write(&paths.requirements_file, "flask\n").unwrap();
        let backend = FakeBackend::new();
        let mut ui = MockUI::new();
        let options = ProvisionOptions {
            require_requirements_file: true,
            ..Default::default()
        };

        provision_with(&paths, options, &backend, &mut ui).unwrap();

        let calls = backend.step_calls.borrow();
        let install = &calls[1];
        assert!(install.contains(&"-r".to_string()));
        assert!(install
            .iter()
            .any(|a| a.ends_with("requirements.txt")));
    }

    #[test]
    fn editor_settings_written_by_default() {
        let temp = TempDir::new().unwrap();
        let paths = setup(&temp);
        let backend = FakeBackend::new();
        let mut ui = MockUI::new();

        provision_with(&paths, ProvisionOptions::default(), &backend, &mut ui).unwrap();

        assert!(paths.settings_file.exists());
        assert!(ui.has_message("Updated VS Code settings"));
    }

    #[test]
    fn editor_settings_skipped_when_disabled() {
        let temp = TempDir::new().unwrap();
        let paths = setup(&temp);
        let backend = FakeBackend::new();
        let mut ui = MockUI::new();
        let options = ProvisionOptions {
            write_editor_settings: false,
            ..Default::default()
        };

        provision_with(&paths, options, &backend, &mut ui).unwrap();

        assert!(!paths.settings_file.exists());
    }
}
