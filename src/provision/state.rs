//! Environment state detection.
//!
//! State is a filesystem fact, re-derived on every run. "Incomplete" is a
//! transient detection state: whoever observes it must repair it in the same
//! run, so it is never treated as a stable stored state.

use crate::config::ProjectPaths;
use crate::platform::Platform;

/// Observed state of the environment directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvState {
    /// Directory does not exist.
    Absent,

    /// Directory exists but the interpreter executable is missing,
    /// usually the wreckage of an interrupted creation.
    Incomplete,

    /// Directory exists and the interpreter executable is present.
    Complete,
}

impl EnvState {
    /// Human-readable name for status output.
    pub fn describe(&self) -> &'static str {
        match self {
            EnvState::Absent => "absent",
            EnvState::Incomplete => "incomplete",
            EnvState::Complete => "complete",
        }
    }
}

impl std::fmt::Display for EnvState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.describe())
    }
}

/// Classify the environment directory.
pub fn detect_state(paths: &ProjectPaths, platform: Platform) -> EnvState {
    if !paths.venv_dir.exists() {
        return EnvState::Absent;
    }
    if paths.interpreter(platform).is_file() {
        EnvState::Complete
    } else {
        EnvState::Incomplete
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn missing_directory_is_absent() {
        let temp = TempDir::new().unwrap();
        let paths = ProjectPaths::new(temp.path());

        assert_eq!(detect_state(&paths, Platform::current()), EnvState::Absent);
    }

    #[test]
    fn bare_directory_is_incomplete() {
        let temp = TempDir::new().unwrap();
        let paths = ProjectPaths::new(temp.path());
        fs::create_dir_all(&paths.venv_dir).unwrap();

        assert_eq!(
            detect_state(&paths, Platform::current()),
            EnvState::Incomplete
        );
    }

    #[test]
    fn directory_with_interpreter_is_complete() {
        let temp = TempDir::new().unwrap();
        let paths = ProjectPaths::new(temp.path());
        let interpreter = paths.interpreter(Platform::current());
        fs::create_dir_all(interpreter.parent().unwrap()).unwrap();
        fs::write(&interpreter, "").unwrap();

        assert_eq!(
            detect_state(&paths, Platform::current()),
            EnvState::Complete
        );
    }

    #[test]
    fn interpreter_must_be_a_file_not_a_directory() {
        let temp = TempDir::new().unwrap();
        let paths = ProjectPaths::new(temp.path());
        fs::create_dir_all(paths.interpreter(Platform::current())).unwrap();

        assert_eq!(
            detect_state(&paths, Platform::current()),
            EnvState::Incomplete
        );
    }

    #[test]
    fn state_describes_itself() {
        assert_eq!(EnvState::Absent.describe(), "absent");
        assert_eq!(EnvState::Incomplete.describe(), "incomplete");
        assert_eq!(EnvState::Complete.to_string(), "complete");
    }
}
