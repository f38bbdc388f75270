//! Config directory discovery.

use std::path::{Path, PathBuf};

/// Environment variable that overrides the config directory.
pub const CONFIG_DIR_ENV: &str = "CWCTL_CONFIG_DIR";

/// File name of the connections registry.
pub const CONNECTIONS_FILE: &str = "connections.json";

/// Locations of cwctl's client-side files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPaths {
    /// Directory holding all config files.
    pub config_dir: PathBuf,
}

impl ConfigPaths {
    /// Use an explicit config directory.
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
        }
    }

    /// Discover the config directory.
    ///
    /// Priority:
    /// 1. `CWCTL_CONFIG_DIR`
    /// 2. `~/.codewind/config`
    /// 3. `./.codewind/config` when no home directory is known
    pub fn discover() -> Self {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|d| !d.is_empty()) {
            return Self::new(PathBuf::from(dir));
        }
        let base = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::new(base.join(".codewind").join("config"))
    }

    /// Path of the connections registry file.
    pub fn connections_file(&self) -> PathBuf {
        self.config_dir.join(CONNECTIONS_FILE)
    }

    /// The config directory.
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }
}
