//! Terminal UI implementation.

use console::Term;
use std::io::Write;

use super::{OutputMode, ProgressSpinner, SpinnerHandle, Theme, UserInterface};

/// Terminal UI implementation.
///
/// Status output goes to stdout; warnings and errors go to stderr so that
/// failures stay visible when stdout is piped.
pub struct TerminalUI {
    out: Term,
    err: Term,
    theme: Theme,
    mode: OutputMode,
    interactive: bool,
}

impl TerminalUI {
    /// Create a new terminal UI.
    pub fn new(mode: OutputMode, interactive: bool) -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            theme: Theme::auto(),
            mode,
            interactive,
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.out, "{}", msg).ok();
        }
    }

    fn step(&mut self, description: &str) {
        if self.mode.shows_status() {
            writeln!(self.out).ok();
            writeln!(self.out, "{}", self.theme.step(description)).ok();
        }
    }

    fn success(&mut self, msg: &str) {
        writeln!(self.out, "{}", self.theme.success(msg)).ok();
    }

    fn warning(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.warning(msg)).ok();
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.error(msg)).ok();
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.interactive && self.mode.shows_spinners() && self.out.is_term() {
            Box::new(ProgressSpinner::new(message))
        } else {
            // No live terminal: print the message once instead of animating
            self.message(message);
            Box::new(ProgressSpinner::hidden())
        }
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            writeln!(self.out, "\n{}\n", self.theme.header(title)).ok();
        }
    }

    fn is_interactive(&self) -> bool {
        self.interactive && self.out.is_term()
    }
}

/// Create the appropriate UI for the current environment.
pub fn create_ui(interactive: bool, mode: OutputMode) -> Box<dyn UserInterface> {
    Box::new(TerminalUI::new(mode, interactive))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_ui_reports_mode() {
        let ui = TerminalUI::new(OutputMode::Quiet, false);
        assert_eq!(ui.output_mode(), OutputMode::Quiet);
    }

    #[test]
    fn non_interactive_ui_is_not_interactive() {
        let ui = TerminalUI::new(OutputMode::Normal, false);
        assert!(!ui.is_interactive());
    }

    #[test]
    fn create_ui_returns_boxed_ui() {
        let ui = create_ui(false, OutputMode::Normal);
        assert_eq!(ui.output_mode(), OutputMode::Normal);
    }
}
