//! Shared output helpers for commands.

use serde::Serialize;

use crate::apiroutes::{AggregateVersions, Service};
use crate::error::Result;
use crate::ui::Table;

/// `{"status": ..., "status_message": ...}` printed by mutating commands in JSON mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusOutput {
    pub status: String,
    pub status_message: String,
}

impl StatusOutput {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            status: "OK".to_string(),
            status_message: message.into(),
        }
    }
}

/// Pretty JSON for command output.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value).map_err(anyhow::Error::from)?)
}

/// `-` for values that were not reported.
pub fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

/// One row per successful connection, in id order.
pub fn versions_table(versions: &AggregateVersions) -> Table {
    let mut table = Table::new(["CONNECTION", "PFE", "PERFORMANCE", "GATEKEEPER"]);
    for (id, v) in &versions.connections {
        table.add_row([
            id.as_str(),
            or_dash(v.get(Service::Pfe)),
            or_dash(v.get(Service::Performance)),
            or_dash(v.get(Service::Gatekeeper)),
        ]);
    }
    table
}
