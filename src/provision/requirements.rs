//! Dependency list resolution.

use std::path::{Path, PathBuf};

use crate::config::{ProjectPaths, ProvisionOptions};
use crate::error::{BasecampError, Result};

/// Packages installed when no requirements file declares anything.
pub const DEFAULT_REQUIREMENTS: &[&str] = &["streamlit"];

/// Where a dependency list came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencySource {
    /// A requirements file on disk.
    File(PathBuf),

    /// The fixed built-in default list.
    BuiltinDefaults,
}

/// An ordered list of package specifiers plus its source label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyList {
    /// Package specifiers, order preserved from the source.
    pub specs: Vec<String>,

    /// Where the specifiers came from.
    pub source: DependencySource,
}

impl DependencyList {
    /// Label reported to the operator before installation.
    pub fn label(&self) -> String {
        match &self.source {
            DependencySource::File(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| path.display().to_string()),
            DependencySource::BuiltinDefaults => "built-in defaults".to_string(),
        }
    }

    fn defaults() -> Self {
        Self {
            specs: DEFAULT_REQUIREMENTS.iter().map(|s| s.to_string()).collect(),
            source: DependencySource::BuiltinDefaults,
        }
    }
}

/// Resolve the dependency list for one run.
///
/// With a mandatory file, absence is a fatal precondition failure. Otherwise
/// a file with at least one effective line wins and the built-in defaults
/// are the fallback.
pub fn resolve(paths: &ProjectPaths, options: &ProvisionOptions) -> Result<DependencyList> {
    let file = &paths.requirements_file;

    if options.require_requirements_file {
        if !file.is_file() {
            return Err(BasecampError::RequirementsNotFound { path: file.clone() });
        }
        return Ok(DependencyList {
            specs: read_spec_lines(file),
            source: DependencySource::File(file.clone()),
        });
    }

    let specs = read_spec_lines(file);
    if specs.is_empty() {
        Ok(DependencyList::defaults())
    } else {
        Ok(DependencyList {
            specs,
            source: DependencySource::File(file.clone()),
        })
    }
}

/// Read package specifiers from a requirements file.
///
/// Blank lines and `#` comments are skipped; order is preserved. A missing
/// or unreadable file yields an empty list.
fn read_spec_lines(path: &Path) -> Vec<String> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            tracing::debug!("Could not read {}: {}", path.display(), e);
            return Vec::new();
        }
    };

    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}
