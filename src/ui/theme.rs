//! Terminal styling.

use console::Style;

/// Message styling for terminal output.
///
/// Icons are part of the message text so they survive with colors disabled.
#[derive(Debug, Clone)]
pub struct Theme {
    success: Style,
    warning: Style,
    error: Style,
    header: Style,
    /// Style for dim/secondary text.
    pub dim: Style,
    /// Style for highlighted/important text.
    pub highlight: Style,
}

impl Theme {
    /// Pick colored or plain styling based on the environment.
    pub fn auto() -> Self {
        if should_use_colors() {
            Self::colored()
        } else {
            Self::plain()
        }
    }

    /// Create the colored theme.
    pub fn colored() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            header: Style::new().bold().cyan(),
            dim: Style::new().dim(),
            highlight: Style::new().bold(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            header: Style::new(),
            dim: Style::new(),
            highlight: Style::new(),
        }
    }

    /// Render a success message.
    pub fn success(&self, msg: &str) -> String {
        self.success.apply_to(format!("✓ {}", msg)).to_string()
    }

    /// Render a warning message.
    pub fn warning(&self, msg: &str) -> String {
        self.warning.apply_to(format!("⚠ {}", msg)).to_string()
    }

    /// Render an error message.
    pub fn error(&self, msg: &str) -> String {
        self.error.apply_to(format!("✗ {}", msg)).to_string()
    }

    /// Render a step announcement line.
    pub fn step(&self, description: &str) -> String {
        format!("{} {}", self.highlight.apply_to("==>"), description)
    }

    /// Render a header banner.
    pub fn header(&self, title: &str) -> String {
        format!(
            "{} {}",
            self.header.apply_to("▲"),
            self.highlight.apply_to(title)
        )
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // NO_COLOR convention: https://no-color.org/
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    console::Term::stdout().is_term()
}
