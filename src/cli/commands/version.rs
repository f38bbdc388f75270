//! `cwctl version`.

use tracing::debug;

use crate::apiroutes::aggregate_all;
use crate::cli::args::VersionArgs;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandContext, CommandResult};
use super::display::{to_json, versions_table};

/// Probes every selected connection and reports service versions.
pub struct VersionCommand {
    args: VersionArgs,
}

impl VersionCommand {
    pub fn new(args: VersionArgs) -> Self {
        Self { args }
    }
}

impl Command for VersionCommand {
    fn execute(
        &self,
        ctx: &CommandContext<'_>,
        ui: &mut dyn UserInterface,
    ) -> crate::error::Result<CommandResult> {
        let connections = ctx.registry.select(&self.args.conids)?;
        debug!("Probing {} connection(s)", connections.len());

        let versions = aggregate_all(ctx.client, ctx.runtime, &connections, crate::VERSION);

        if ctx.json {
            ui.data(&to_json(&versions)?);
        } else {
            ui.show_header(&format!("cwctl {}", versions.cwctl_version));
            if !versions.connections.is_empty() {
                ui.message(&versions_table(&versions).render());
            }
            for (id, err) in &versions.connection_errors {
                ui.warning(&format!("{}: {}", id, err.description()));
            }
        }

        let all_failed = !connections.is_empty() && versions.connections.is_empty();
        Ok(if all_failed {
            CommandResult::failure(1)
        } else {
            CommandResult::success()
        })
    }
}
