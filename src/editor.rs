//! VS Code settings writer.
//!
//! Points the editor's Python extension at the environment's interpreter.
//! Exactly two keys are set; everything else in an existing settings file is
//! preserved. A malformed existing file is discarded and rebuilt, never
//! surfaced as an error; this whole step is best effort.

use std::fs;

use serde_json::{Map, Value};

use crate::config::ProjectPaths;
use crate::error::Result;
use crate::platform::Platform;
use crate::ui::UserInterface;

/// Settings key holding the interpreter path.
pub const INTERPRETER_PATH_KEY: &str = "python.defaultInterpreterPath";

/// Settings key enabling environment activation in new terminals.
pub const ACTIVATE_ON_OPEN_KEY: &str = "python.terminal.activateEnvironment";

/// Rewrite `.vscode/settings.json` with the venv interpreter configured.
///
/// Output is byte-stable across rewrites: serde_json's default map keeps
/// keys sorted, formatting is fixed at 2-space indent, and a trailing
/// newline is always appended.
pub fn write_settings(
    paths: &ProjectPaths,
    platform: Platform,
    ui: &mut dyn UserInterface,
) -> Result<()> {
    let settings_file = &paths.settings_file;
    if let Some(parent) = settings_file.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut settings = match fs::read_to_string(settings_file) {
        Ok(text) => match serde_json::from_str::<Value>(&text) {
            Ok(Value::Object(map)) => map,
            Ok(_) | Err(_) => {
                ui.warning("Could not parse existing VS Code settings. Recreating file.");
                Map::new()
            }
        },
        Err(_) => Map::new(),
    };

    let interpreter = paths.interpreter(platform);
    settings.insert(
        INTERPRETER_PATH_KEY.to_string(),
        Value::String(interpreter.display().to_string()),
    );
    settings.insert(ACTIVATE_ON_OPEN_KEY.to_string(), Value::Bool(true));

    let mut rendered =
        serde_json::to_string_pretty(&Value::Object(settings)).map_err(anyhow::Error::from)?;
    rendered.push('\n');
    fs::write(settings_file, rendered)?;

    tracing::debug!("Wrote editor settings to {}", settings_file.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    fn write_in(temp: &TempDir, ui: &mut MockUI) -> ProjectPaths {
        let paths = ProjectPaths::new(temp.path());
        write_settings(&paths, Platform::current(), ui).unwrap();
        paths
    }

    #[test]
    fn creates_file_with_both_keys_and_trailing_newline() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();

        let paths = write_in(&temp, &mut ui);

        let text = fs::read_to_string(&paths.settings_file).unwrap();
        assert!(text.ends_with('\n'));

        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed[ACTIVATE_ON_OPEN_KEY], Value::Bool(true));
        let interpreter = parsed[INTERPRETER_PATH_KEY].as_str().unwrap();
        assert!(interpreter.contains(".venv"));
    }

    #[test]
    fn preserves_unrelated_keys() {
        let temp = TempDir::new().unwrap();
        let paths = ProjectPaths::new(temp.path());
        fs::create_dir_all(paths.settings_file.parent().unwrap()).unwrap();
        fs::write(
            &paths.settings_file,
            r#"{"editor.rulers": [100], "files.trimTrailingWhitespace": true}"#,
        )
        .unwrap();
        let mut ui = MockUI::new();

        write_settings(&paths, Platform::current(), &mut ui).unwrap();

        let parsed: Value =
            serde_json::from_str(&fs::read_to_string(&paths.settings_file).unwrap()).unwrap();
        assert_eq!(parsed["editor.rulers"][0], Value::from(100));
        assert_eq!(parsed["files.trimTrailingWhitespace"], Value::Bool(true));
        assert_eq!(parsed[ACTIVATE_ON_OPEN_KEY], Value::Bool(true));
        assert!(ui.warnings().is_empty());
    }

    #[test]
    fn malformed_settings_recovered_with_warning() {
        let temp = TempDir::new().unwrap();
        let paths = ProjectPaths::new(temp.path());
        fs::create_dir_all(paths.settings_file.parent().unwrap()).unwrap();
        fs::write(&paths.settings_file, "{ not json").unwrap();
        let mut ui = MockUI::new();

        write_settings(&paths, Platform::current(), &mut ui).unwrap();

        assert!(ui.has_warning("Could not parse existing VS Code settings"));
        let parsed: Value =
            serde_json::from_str(&fs::read_to_string(&paths.settings_file).unwrap()).unwrap();
        assert_eq!(parsed[ACTIVATE_ON_OPEN_KEY], Value::Bool(true));
    }

    #[test]
    fn non_object_settings_document_is_rebuilt() {
        let temp = TempDir::new().unwrap();
        let paths = ProjectPaths::new(temp.path());
        fs::create_dir_all(paths.settings_file.parent().unwrap()).unwrap();
        fs::write(&paths.settings_file, "[1, 2, 3]").unwrap();
        let mut ui = MockUI::new();

        write_settings(&paths, Platform::current(), &mut ui).unwrap();

        assert!(ui.has_warning("Recreating file"));
        let parsed: Value =
            serde_json::from_str(&fs::read_to_string(&paths.settings_file).unwrap()).unwrap();
        assert!(parsed.is_object());
    }

    #[test]
    fn rewrites_are_byte_identical() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();

        let paths = write_in(&temp, &mut ui);
        let first = fs::read(&paths.settings_file).unwrap();

        write_settings(&paths, Platform::current(), &mut ui).unwrap();
        let second = fs::read(&paths.settings_file).unwrap();

        assert_eq!(first, second);
    }
}
