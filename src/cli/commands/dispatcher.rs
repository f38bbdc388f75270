//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::time::Duration;

use crate::cli::args::{Cli, Commands, NetworkSubcommand, ProjectSubcommand};
use crate::config::ConfigPaths;
use crate::connections::ConnectionRegistry;
use crate::docker::{ContainerRuntime, DockerCli};
use crate::error::Result;
use crate::sechttp::{HttpClient, ReqwestClient};
use crate::ui::UserInterface;

/// Collaborators shared by all commands.
pub struct CommandContext<'a> {
    /// Registered connections.
    pub registry: ConnectionRegistry,
    /// Transport for remote calls.
    pub client: &'a dyn HttpClient,
    /// Local container runtime.
    pub runtime: &'a dyn ContainerRuntime,
    /// Emit JSON instead of tables.
    pub json: bool,
}

/// Trait for command implementations.
pub trait Command {
    /// Execute the command.
    fn execute(&self, ctx: &CommandContext<'_>, ui: &mut dyn UserInterface)
        -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: u8,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: u8) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    paths: ConfigPaths,
    timeout: Duration,
}

impl CommandDispatcher {
    /// Create a dispatcher reading config from `paths`.
    pub fn new(paths: ConfigPaths, timeout: Duration) -> Self {
        Self { paths, timeout }
    }

    /// Dispatch using the real HTTP client and docker runtime.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if let Commands::Completions(args) = &cli.command {
            return super::completions::CompletionsCommand::new(args.clone()).run();
        }

        let client = ReqwestClient::new(self.timeout)?;
        let runtime = DockerCli::default();
        self.dispatch_with(cli, &client, &runtime, ui)
    }

    /// Dispatch with explicit collaborators.
    pub fn dispatch_with(
        &self,
        cli: &Cli,
        client: &dyn HttpClient,
        runtime: &dyn ContainerRuntime,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        let registry = if uses_registry(&cli.command) {
            ConnectionRegistry::load(&self.paths.connections_file())?
        } else {
            ConnectionRegistry::default()
        };
        let ctx = CommandContext {
            registry,
            client,
            runtime,
            json: cli.json,
        };

        match &cli.command {
            Commands::Version(args) => {
                super::version::VersionCommand::new(args.clone()).execute(&ctx, ui)
            }
            Commands::Connections => super::connections::ConnectionsCommand.execute(&ctx, ui),
            Commands::Status(args) => {
                super::status::StatusCommand::new(args.clone()).execute(&ctx, ui)
            }
            Commands::Pull(args) => {
                super::lifecycle::PullCommand::new(args.clone()).execute(&ctx, ui)
            }
            Commands::Stop => super::lifecycle::StopCommand.execute(&ctx, ui),
            Commands::Project(args) => match &args.command {
                ProjectSubcommand::Network(net) => match &net.command {
                    NetworkSubcommand::Get(target) => {
                        super::network::NetworkGetCommand::new(target.clone()).execute(&ctx, ui)
                    }
                    NetworkSubcommand::Create(create) => {
                        super::network::NetworkCreateCommand::new(create.clone()).execute(&ctx, ui)
                    }
                },
            },
            Commands::Completions(args) => {
                super::completions::CompletionsCommand::new(args.clone()).execute(&ctx, ui)
            }
        }
    }
}

/// Whether `command` reads the connections file.
fn uses_registry(command: &Commands) -> bool {
    matches!(
        command,
        Commands::Version(_) | Commands::Connections | Commands::Project(_)
    )
}
