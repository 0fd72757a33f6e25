//! Project paths and provisioning options.
//!
//! All fixed relative locations are resolved once from the project root and
//! carried in [`ProjectPaths`]; nothing downstream consults globals or the
//! current directory. Behavioral variants of the bootstrap procedure are
//! plain fields on [`ProvisionOptions`].

use std::path::{Path, PathBuf};

use crate::platform::Platform;

/// Name of the environment directory under the project root.
pub const VENV_DIR_NAME: &str = ".venv";

/// Name of the optional dependency declaration file.
pub const REQUIREMENTS_FILE_NAME: &str = "requirements.txt";

/// Name of the application entry file.
pub const APP_ENTRY_NAME: &str = "app.py";

/// Module used to run the application (`python -m <module> run <entry>`).
pub const APP_MODULE: &str = "streamlit";

/// Fixed relative locations for one project, resolved once at startup.
#[derive(Debug, Clone)]
pub struct ProjectPaths {
    /// Project root directory.
    pub root: PathBuf,

    /// Environment directory (`<root>/.venv`).
    pub venv_dir: PathBuf,

    /// Dependency declaration file (`<root>/requirements.txt`).
    pub requirements_file: PathBuf,

    /// Editor settings file (`<root>/.vscode/settings.json`).
    pub settings_file: PathBuf,

    /// Application entry file (`<root>/app.py`).
    pub app_entry: PathBuf,
}

impl ProjectPaths {
    /// Resolve all project paths from a root directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            venv_dir: root.join(VENV_DIR_NAME),
            requirements_file: root.join(REQUIREMENTS_FILE_NAME),
            settings_file: root.join(".vscode").join("settings.json"),
            app_entry: root.join(APP_ENTRY_NAME),
            root,
        }
    }

    /// Expected location of the environment's interpreter executable.
    pub fn interpreter(&self, platform: Platform) -> PathBuf {
        self.venv_dir.join(platform.interpreter_rel())
    }

    /// Get the project root path.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Behavioral toggles for one provisioning run.
///
/// The bootstrap procedure exists in a few variants in the wild; these flags
/// select between them explicitly instead of baking one in.
#[derive(Debug, Clone)]
pub struct ProvisionOptions {
    /// Require `requirements.txt` to exist and install via `-r <file>`.
    /// When unset, a missing or effectively-empty file falls back to the
    /// built-in default list.
    pub require_requirements_file: bool,

    /// Write VS Code interpreter settings after installation.
    pub write_editor_settings: bool,
}

impl Default for ProvisionOptions {
    fn default() -> Self {
        Self {
            require_requirements_file: false,
            write_editor_settings: true,
        }
    }
}
