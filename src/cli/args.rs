//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::sechttp::client::DEFAULT_TIMEOUT;

/// cwctl - manage containerised development environments.
#[derive(Debug, Parser)]
#[command(name = "cwctl")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory holding connections.json (overrides ~/.codewind/config)
    #[arg(long, global = true, env = "CWCTL_CONFIG_DIR", value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// HTTP request timeout in seconds
    #[arg(
        long,
        global = true,
        default_value_t = DEFAULT_TIMEOUT.as_secs(),
        value_name = "SECS"
    )]
    pub timeout: u64,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the versions of cwctl and of the services behind each connection
    Version(VersionArgs),

    /// List registered connections
    Connections,

    /// Show locally running platform containers
    Status(StatusArgs),

    /// Pull the platform images
    Pull(PullArgs),

    /// Stop and remove the local platform containers
    Stop,

    /// Project operations
    Project(ProjectArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `version` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct VersionArgs {
    /// Only probe these connection ids (repeatable)
    #[arg(long = "conid", value_name = "ID")]
    pub conids: Vec<String>,
}

/// Arguments for the `status` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct StatusArgs {
    /// Compare local image digests with the registry
    #[arg(long)]
    pub check_updates: bool,
}

/// Arguments for the `pull` command.
#[derive(Debug, Clone, clap::Args)]
pub struct PullArgs {
    /// Image tag to pull
    #[arg(long, short = 't', default_value = "latest")]
    pub tag: String,

    /// Also pull the gatekeeper image
    #[arg(long)]
    pub gatekeeper: bool,
}

/// Arguments for the `project` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ProjectArgs {
    #[command(subcommand)]
    pub command: ProjectSubcommand,
}

/// Project subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum ProjectSubcommand {
    /// Manage the endpoints a project is reachable on
    Network(NetworkArgs),
}

/// Arguments for `project network`.
#[derive(Debug, Clone, clap::Args)]
pub struct NetworkArgs {
    #[command(subcommand)]
    pub command: NetworkSubcommand,
}

/// Project network subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum NetworkSubcommand {
    /// Show a project's network records
    Get(NetworkTarget),

    /// Add a network record to a project
    Create(NetworkCreateArgs),
}

/// Connection and project a network command applies to.
#[derive(Debug, Clone, clap::Args)]
pub struct NetworkTarget {
    /// Connection id
    #[arg(long, default_value = "local")]
    pub conid: String,

    /// Project id
    #[arg(long = "id", value_name = "PROJECT_ID")]
    pub project_id: String,
}

/// Arguments for `project network create`.
#[derive(Debug, Clone, clap::Args)]
pub struct NetworkCreateArgs {
    #[command(flatten)]
    pub target: NetworkTarget,

    /// Name of the project
    #[arg(long)]
    pub project_name: String,

    /// URL the project is reachable on
    #[arg(long)]
    pub project_url: String,

    /// Environment variable that receives the URL
    #[arg(long)]
    pub env: String,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_version_with_connection_filter() {
        let cli = Cli::parse_from(["cwctl", "version", "--conid", "local", "--conid", "remote1"]);
        match cli.command {
            Commands::Version(args) => assert_eq!(args.conids, vec!["local", "remote1"]),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["cwctl", "status", "--json", "--debug"]);
        assert!(cli.json);
        assert!(cli.debug);
        assert_eq!(cli.timeout, DEFAULT_TIMEOUT.as_secs());
    }

    #[test]
    fn parses_network_get() {
        let cli = Cli::parse_from(["cwctl", "project", "network", "get", "--id", "p1"]);
        let Commands::Project(ProjectArgs {
            command: ProjectSubcommand::Network(net),
        }) = cli.command
        else {
            panic!("expected project command");
        };
        match net.command {
            NetworkSubcommand::Get(target) => {
                assert_eq!(target.conid, "local");
                assert_eq!(target.project_id, "p1");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn network_create_requires_fields() {
        let result = Cli::try_parse_from(["cwctl", "project", "network", "create", "--id", "p1"]);
        assert!(result.is_err());
    }

    #[test]
    fn parses_pull_defaults() {
        let cli = Cli::parse_from(["cwctl", "pull"]);
        match cli.command {
            Commands::Pull(args) => {
                assert_eq!(args.tag, "latest");
                assert!(!args.gatekeeper);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn parses_status_check_updates() {
        let cli = Cli::parse_from(["cwctl", "status", "--check-updates"]);
        assert!(matches!(
            cli.command,
            Commands::Status(StatusArgs {
                check_updates: true
            })
        ));
    }
}
