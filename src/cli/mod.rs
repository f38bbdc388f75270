//! Command-line interface for cwctl.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{
    Cli, Commands, CompletionsArgs, NetworkCreateArgs, NetworkTarget, PullArgs, StatusArgs,
    VersionArgs,
};
pub use commands::{Command, CommandContext, CommandDispatcher, CommandResult};
