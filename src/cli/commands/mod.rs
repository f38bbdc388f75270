//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait and is routed by
//! [`CommandDispatcher`]. Commands receive their collaborators (the HTTP
//! client, the container runtime and the connection registry) through a
//! [`CommandContext`], so tests can run them against mocks.

pub mod completions;
pub mod connections;
pub mod dispatcher;
pub mod display;
pub mod lifecycle;
pub mod network;
pub mod status;
pub mod version;

pub use dispatcher::{Command, CommandContext, CommandDispatcher, CommandResult};
