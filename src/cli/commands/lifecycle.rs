//! `cwctl pull` and `cwctl stop`.

use crate::apiroutes::Service;
use crate::cli::args::PullArgs;
use crate::docker;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandContext, CommandResult};
use super::display::{to_json, StatusOutput};

/// Pulls the platform images at a tag.
pub struct PullCommand {
    args: PullArgs,
}

impl PullCommand {
    pub fn new(args: PullArgs) -> Self {
        Self { args }
    }

    fn services(&self) -> Vec<Service> {
        Service::ALL
            .into_iter()
            .filter(|s| *s != Service::Gatekeeper || self.args.gatekeeper)
            .collect()
    }
}

impl Command for PullCommand {
    fn execute(
        &self,
        ctx: &CommandContext<'_>,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        if !ctx.json {
            ui.show_header(&format!("Pulling platform images ({})", self.args.tag));
        }
        let pulled = docker::pull_services(ctx.runtime, &self.services(), &self.args.tag)?;

        if ctx.json {
            ui.data(&to_json(&pulled)?);
        } else {
            for image in &pulled {
                ui.success(&format!("Pulled {}", image));
            }
        }
        Ok(CommandResult::success())
    }
}

/// Stops and removes the local platform containers.
pub struct StopCommand;

impl Command for StopCommand {
    fn execute(
        &self,
        ctx: &CommandContext<'_>,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        let stopped = docker::stop_services(ctx.runtime)?;

        let message = if stopped.is_empty() {
            "No platform containers were running".to_string()
        } else {
            let names: Vec<_> = stopped.iter().map(|s| s.container_name()).collect();
            format!("Stopped {}", names.join(", "))
        };

        if ctx.json {
            ui.data(&to_json(&StatusOutput::ok(message))?);
        } else if stopped.is_empty() {
            ui.message(&message);
        } else {
            ui.success(&message);
        }
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connections::ConnectionRegistry;
    use crate::docker::{ContainerSummary, MockRuntime};
    use crate::sechttp::MockClient;
    use crate::ui::MockUI;

    fn context<'a>(client: &'a MockClient, runtime: &'a MockRuntime) -> CommandContext<'a> {
        CommandContext {
            registry: ConnectionRegistry::default(),
            client,
            runtime,
            json: false,
        }
    }

    #[test]
    fn pull_skips_gatekeeper_by_default() {
        let client = MockClient::default();
        let runtime = MockRuntime::default();
        let mut ui = MockUI::new();
        let args = PullArgs {
            tag: "0.9.0".into(),
            gatekeeper: false,
        };

        PullCommand::new(args)
            .execute(&context(&client, &runtime), &mut ui)
            .unwrap();

        let actions = runtime.actions();
        assert_eq!(actions.len(), 2);
        assert!(actions.iter().all(|a| !a.contains("gatekeeper")));
        assert_eq!(ui.successes().len(), 2);
    }

    #[test]
    fn pull_includes_gatekeeper_when_asked() {
        let client = MockClient::default();
        let runtime = MockRuntime::default();
        let mut ui = MockUI::new();
        let args = PullArgs {
            tag: "latest".into(),
            gatekeeper: true,
        };

        PullCommand::new(args)
            .execute(&context(&client, &runtime), &mut ui)
            .unwrap();

        assert_eq!(
            runtime.actions()[2],
            format!("pull {}", Service::Gatekeeper.image("latest"))
        );
    }

    #[test]
    fn pull_json_prints_only_data() {
        let client = MockClient::default();
        let runtime = MockRuntime::default();
        let mut ctx = context(&client, &runtime);
        ctx.json = true;
        let mut ui = MockUI::new();
        let args = PullArgs {
            tag: "latest".into(),
            gatekeeper: false,
        };

        PullCommand::new(args).execute(&ctx, &mut ui).unwrap();

        assert!(ui.headers().is_empty());
        assert!(ui.successes().is_empty());
        let pulled: Vec<String> = serde_json::from_str(&ui.data_lines()[0]).unwrap();
        assert_eq!(pulled.len(), 2);
    }

    #[test]
    fn stop_reports_stopped_containers() {
        let client = MockClient::default();
        let runtime = MockRuntime::new(vec![ContainerSummary::running(
            "pfe",
            "codewind-pfe",
            "eclipse/codewind-pfe-amd64:0.9.0",
        )]);
        let mut ui = MockUI::new();

        StopCommand
            .execute(&context(&client, &runtime), &mut ui)
            .unwrap();

        assert_eq!(runtime.actions(), vec!["stop pfe", "remove pfe"]);
        assert!(ui.successes()[0].contains("codewind-pfe"));
    }

    #[test]
    fn stop_with_nothing_running() {
        let client = MockClient::default();
        let runtime = MockRuntime::default();
        let mut ui = MockUI::new();

        let result = StopCommand
            .execute(&context(&client, &runtime), &mut ui)
            .unwrap();

        assert!(result.success);
        assert!(runtime.actions().is_empty());
        assert_eq!(ui.messages().len(), 1);
    }
}
