//! Output verbosity.

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Headers, tables and status messages.
    #[default]
    Normal,
    /// Results only, no headers.
    Quiet,
    /// Nothing except errors and machine-readable data.
    Silent,
}

impl OutputMode {
    /// Mode for the given global flags. `--json` wins over `--quiet`.
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if json {
            Self::Silent
        } else if quiet {
            Self::Quiet
        } else {
            Self::Normal
        }
    }

    /// Whether headers are printed.
    pub fn shows_headers(&self) -> bool {
        matches!(self, Self::Normal)
    }

    /// Whether status messages are printed.
    pub fn shows_status(&self) -> bool {
        !matches!(self, Self::Silent)
    }
}
