//! `cwctl connections`.

use serde::Serialize;

use crate::connections::Connection;
use crate::ui::{Table, UserInterface};

use super::dispatcher::{Command, CommandContext, CommandResult};
use super::display::{or_dash, to_json};

/// Lists registered connections.
pub struct ConnectionsCommand;

#[derive(Serialize)]
struct ConnectionsOutput<'a> {
    connections: &'a [Connection],
}

impl Command for ConnectionsCommand {
    fn execute(
        &self,
        ctx: &CommandContext<'_>,
        ui: &mut dyn UserInterface,
    ) -> crate::error::Result<CommandResult> {
        let connections = ctx.registry.all();

        if ctx.json {
            ui.data(&to_json(&ConnectionsOutput { connections })?);
            return Ok(CommandResult::success());
        }

        let mut table = Table::new(["ID", "LABEL", "URL"]);
        for conn in connections {
            table.add_row([
                conn.id.as_str(),
                or_dash(&conn.label),
                or_dash(conn.base_url().unwrap_or_default()),
            ]);
        }
        ui.message(&table.render());
        Ok(CommandResult::success())
    }
}
