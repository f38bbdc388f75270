//! Loading the connections file.
//!
//! The registry is a JSON document:
//!
//! ```json
//! {
//!   "schemaversion": 1,
//!   "connections": [
//!     { "id": "local", "label": "Codewind local connection", "url": "" }
//!   ]
//! }
//! ```
//!
//! This module only reads it. A missing file means "only the local
//! connection exists".

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::connection::{Connection, SecurityContext};
use crate::error::{CwctlError, Result};

/// Schema version written by current installers.
pub const SCHEMA_VERSION: u32 = 1;

/// On-disk shape of the connections file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionsFile {
    /// Schema version of the document.
    #[serde(rename = "schemaversion", default)]
    pub schema_version: u32,

    /// Connections in registration order.
    #[serde(default)]
    pub connections: Vec<Connection>,
}

impl Default for ConnectionsFile {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            connections: vec![Connection::local()],
        }
    }
}

/// Read-only view of the registered connections.
#[derive(Debug, Clone, Default)]
pub struct ConnectionRegistry {
    connections: Vec<Connection>,
}

impl ConnectionRegistry {
    /// Build a registry from connections in order.
    pub fn from_connections(connections: Vec<Connection>) -> Self {
        Self { connections }
    }

    /// Load the registry from a connections file.
    ///
    /// Tokens are picked up from `CWCTL_TOKEN_<ID>` environment variables.
    pub fn load(path: &Path) -> Result<Self> {
        Self::load_with_env(path, |name| std::env::var(name).ok())
    }

    /// Load the registry, resolving tokens through `lookup`.
    pub fn load_with_env<F>(path: &Path, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = if path.exists() {
            let content = fs::read_to_string(path).map_err(|e| CwctlError::ConnectionsLoad {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
            serde_json::from_str::<ConnectionsFile>(&content).map_err(|e| {
                CwctlError::ConnectionsParse {
                    path: path.display().to_string(),
                    message: e.to_string(),
                }
            })?
        } else {
            debug!("No connections file at {}, using defaults", path.display());
            ConnectionsFile::default()
        };

        let connections = file
            .connections
            .into_iter()
            .map(|conn| match lookup(&conn.token_env_var()) {
                Some(token) if !token.is_empty() => {
                    conn.with_security(SecurityContext::Bearer { token })
                }
                _ => conn,
            })
            .collect();

        Ok(Self { connections })
    }

    /// All connections in registration order.
    pub fn all(&self) -> &[Connection] {
        &self.connections
    }

    /// Look up a connection by id.
    pub fn get(&self, id: &str) -> Result<&Connection> {
        self.connections
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| CwctlError::ConnectionNotFound { id: id.to_string() })
    }

    /// Select connections by id, preserving the requested order.
    ///
    /// An empty selection returns every connection.
    pub fn select(&self, ids: &[String]) -> Result<Vec<Connection>> {
        if ids.is_empty() {
            return Ok(self.connections.clone());
        }
        ids.iter().map(|id| self.get(id).cloned()).collect()
    }

    /// Number of registered connections.
    pub fn len(&self) -> usize {
        self.connections.len()
    }

    /// Whether no connections are registered.
    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}
