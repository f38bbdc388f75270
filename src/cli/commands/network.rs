//! `cwctl project network get|create`.

use crate::apiroutes::resolve_base_url;
use crate::cli::args::{NetworkCreateArgs, NetworkTarget};
use crate::project::{create_project_network, get_project_network, ProjectNetwork};
use crate::ui::{Table, UserInterface};

use super::dispatcher::{Command, CommandContext, CommandResult};
use super::display::{to_json, StatusOutput};

/// Shows a project's network records.
pub struct NetworkGetCommand {
    target: NetworkTarget,
}

impl NetworkGetCommand {
    pub fn new(target: NetworkTarget) -> Self {
        Self { target }
    }
}

impl Command for NetworkGetCommand {
    fn execute(
        &self,
        ctx: &CommandContext<'_>,
        ui: &mut dyn UserInterface,
    ) -> crate::error::Result<CommandResult> {
        let connection = ctx.registry.get(&self.target.conid)?;
        let base_url = resolve_base_url(ctx.runtime, connection)?;
        let list = get_project_network(ctx.client, connection, &base_url, &self.target.project_id)?;

        if ctx.json {
            ui.data(&to_json(&list)?);
            return Ok(CommandResult::success());
        }

        if list.is_empty() {
            ui.message(&format!(
                "Project {} has no network records",
                self.target.project_id
            ));
            return Ok(CommandResult::success());
        }

        let mut names: Vec<_> = list.keys().collect();
        names.sort();
        let mut table = Table::new(["NAME", "PROJECT", "URL", "ENV", "CONNECTION"]);
        for name in names {
            let record = &list[name];
            table.add_row([
                name.as_str(),
                record.project_name.as_str(),
                record.project_url.as_str(),
                record.env.as_str(),
                record.connection_id.as_str(),
            ]);
        }
        ui.message(&table.render());
        Ok(CommandResult::success())
    }
}

/// Adds a network record to a project.
pub struct NetworkCreateCommand {
    args: NetworkCreateArgs,
}

impl NetworkCreateCommand {
    pub fn new(args: NetworkCreateArgs) -> Self {
        Self { args }
    }
}

impl Command for NetworkCreateCommand {
    fn execute(
        &self,
        ctx: &CommandContext<'_>,
        ui: &mut dyn UserInterface,
    ) -> crate::error::Result<CommandResult> {
        let target = &self.args.target;
        let connection = ctx.registry.get(&target.conid)?;
        let base_url = resolve_base_url(ctx.runtime, connection)?;

        let record = ProjectNetwork {
            project_id: target.project_id.clone(),
            project_name: self.args.project_name.clone(),
            project_url: self.args.project_url.clone(),
            connection_id: connection.id.clone(),
            connection_url: connection.base_url().unwrap_or_default().to_string(),
            env: self.args.env.clone(),
        };
        create_project_network(ctx.client, connection, &base_url, &target.project_id, &record)?;

        let message = format!(
            "Added {} ({}) to project {}",
            self.args.env, self.args.project_url, target.project_id
        );
        if ctx.json {
            ui.data(&to_json(&StatusOutput::ok(message))?);
        } else {
            ui.success(&message);
        }
        Ok(CommandResult::success())
    }
}
