//! Console-backed UI.

use console::Term;
use std::io::Write;

use super::{should_use_colors, DashTheme, OutputMode, UserInterface};

/// Styled terminal UI. Status goes to stdout, warnings and errors to stderr.
pub struct TerminalUI {
    out: Term,
    err: Term,
    theme: DashTheme,
    mode: OutputMode,
}

impl TerminalUI {
    /// Create a terminal UI, coloring output when `colors` is set.
    pub fn new(colors: bool, mode: OutputMode) -> Self {
        let theme = if colors {
            DashTheme::new()
        } else {
            DashTheme::plain()
        };

        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            theme,
            mode,
        }
    }

    /// The active theme.
    pub fn theme(&self) -> &DashTheme {
        &self.theme
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

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.out, "{}", self.theme.format_success(msg)).ok();
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.err, "{}", self.theme.format_warning(msg)).ok();
        }
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_error(msg)).ok();
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            writeln!(self.out, "\n{}\n", self.theme.format_header(title)).ok();
        }
    }

    fn data(&mut self, payload: &str) {
        writeln!(self.out, "{}", payload).ok();
    }
}

/// Create the UI for the current process.
///
/// Colors are used only when `colors_allowed` is set and stdout supports
/// them.
pub fn create_ui(colors_allowed: bool, mode: OutputMode) -> Box<dyn UserInterface> {
    Box::new(TerminalUI::new(colors_allowed && should_use_colors(), mode))
}
