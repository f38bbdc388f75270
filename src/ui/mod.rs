//! Terminal output.
//!
//! Commands write through the [`UserInterface`] trait so tests can capture
//! output with [`MockUI`]. [`TerminalUI`] is the real implementation.
//!
//! # Example
//!
//! ```
//! use cwctl::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.success("Connected");
//! assert_eq!(ui.successes(), &["Connected".to_string()]);
//! ```

pub mod mock;
pub mod output;
pub mod table;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use output::OutputMode;
pub use table::Table;
pub use terminal::TerminalUI;
pub use theme::{should_use_colors, CwctlTheme};

/// Trait for user-facing output.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Show a header line.
    fn show_header(&mut self, title: &str);

    /// Write machine-readable output to stdout, regardless of mode.
    fn data(&mut self, text: &str);
}
