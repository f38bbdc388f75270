//! Terminal implementation of [`UserInterface`].

use super::{CwctlTheme, OutputMode, UserInterface};

/// Writes status to stdout and errors to stderr.
pub struct TerminalUI {
    mode: OutputMode,
    theme: CwctlTheme,
}

impl TerminalUI {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            theme: CwctlTheme::detect(),
        }
    }

    pub fn with_theme(mode: OutputMode, theme: CwctlTheme) -> Self {
        Self { mode, theme }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{} {}", self.theme.success.apply_to("✓"), msg);
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("{} {}", self.theme.warning.apply_to("!"), msg);
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("{} {}", self.theme.error.apply_to("✗"), msg);
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_headers() {
            println!("{}", self.theme.header.apply_to(title));
        }
    }

    fn data(&mut self, text: &str) {
        println!("{}", text);
    }
}
