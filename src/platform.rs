//! Platform capability queries.
//!
//! Every OS-conditional question the provisioner has is answered here by a
//! single [`Platform`] value selected at startup, rather than `cfg!`
//! branching inline throughout the procedure.

use std::path::{Path, PathBuf};

/// The two OS families the bootstrap procedure distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Unix,
    Windows,
}

impl Platform {
    /// Detect the platform the process is running on.
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else {
            Platform::Unix
        }
    }

    /// Relative path of the interpreter executable inside an environment.
    pub fn interpreter_rel(&self) -> PathBuf {
        match self {
            Platform::Unix => PathBuf::from("bin").join("python"),
            Platform::Windows => PathBuf::from("Scripts").join("python.exe"),
        }
    }

    /// Shell snippet the operator runs to activate the environment.
    pub fn activation_hint(&self) -> &'static str {
        match self {
            Platform::Unix => "source .venv/bin/activate",
            Platform::Windows => r".\.venv\Scripts\Activate.ps1",
        }
    }

    /// Direct invocation of the app runner without activating first.
    pub fn direct_run_hint(&self) -> &'static str {
        match self {
            Platform::Unix => "./.venv/bin/streamlit run app.py",
            Platform::Windows => r".\.venv\Scripts\streamlit.exe run app.py",
        }
    }

    /// Base interpreter names to look for on PATH, in preference order.
    pub fn base_interpreter_names(&self) -> &'static [&'static str] {
        match self {
            Platform::Unix => &["python3", "python"],
            Platform::Windows => &["python", "python3"],
        }
    }

    fn executable_name(&self, name: &str) -> String {
        match self {
            Platform::Unix => name.to_string(),
            Platform::Windows => format!("{}.exe", name),
        }
    }
}

/// Locate the base interpreter used to create environments.
///
/// An explicit override (from `--python` / `BASECAMP_PYTHON`) wins but must
/// point at an existing file; otherwise PATH is searched for the platform's
/// candidate names.
pub fn find_base_interpreter(platform: Platform, override_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        if path.is_file() {
            return Some(path.to_path_buf());
        }
        tracing::debug!("Interpreter override does not exist: {}", path.display());
        return None;
    }

    for name in platform.base_interpreter_names() {
        if let Some(found) = search_path(&platform.executable_name(name)) {
            tracing::debug!("Found base interpreter: {}", found.display());
            return Some(found);
        }
    }
    None
}

fn search_path(file_name: &str) -> Option<PathBuf> {
    let path_var = std::env::var_os("PATH")?;
    std::env::split_paths(&path_var)
        .map(|dir| dir.join(file_name))
        .find(|candidate| candidate.is_file())
}

/// Check if running in a CI environment.
///
/// Used to suppress spinners in `main()`. Checks common CI environment
/// variables: `CI`, `GITHUB_ACTIONS`, `GITLAB_CI`, `CIRCLECI`, `TRAVIS`,
/// `JENKINS_URL`.
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
        || std::env::var("CIRCLECI").is_ok()
        || std::env::var("TRAVIS").is_ok()
        || std::env::var("JENKINS_URL").is_ok()
}
