//! Subprocess execution.

pub mod command;

pub use command::{display_command, execute, execute_quiet, CommandOptions, CommandResult};

/// Outcome of one blocking external step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Step exited 0.
    Completed,

    /// Step exited non-zero with the given code.
    Failed(i32),

    /// Step ended because the operator cancelled the run.
    Interrupted,
}

impl StepOutcome {
    /// Check whether the step finished successfully.
    pub fn is_completed(&self) -> bool {
        matches!(self, StepOutcome::Completed)
    }
}

/// Classify a finished command against the interruption flag.
///
/// A raised flag wins over whatever the child reported. A child that died
/// without an exit code (killed by a signal) is treated as interrupted too:
/// Ctrl-C is delivered to the whole foreground process group, so the child
/// usually dies of SIGINT before our handler flag is even observable.
pub fn classify(result: &CommandResult, interrupted: bool) -> StepOutcome {
    if interrupted {
        return StepOutcome::Interrupted;
    }
    match result.exit_code {
        Some(0) => StepOutcome::Completed,
        Some(code) => StepOutcome::Failed(code),
        None => StepOutcome::Interrupted,
    }
}
