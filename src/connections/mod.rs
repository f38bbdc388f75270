//! Connections to platform deployments.
//!
//! A [`Connection`] names a deployment the tool can talk to. The reserved
//! [`LOCAL_CONNECTION_ID`] connection is the deployment managed on this
//! machine; every other connection is remote and carries its own URL.
//!
//! - [`connection`] - Connection and security context types
//! - [`registry`] - Loading the connections file

pub mod connection;
pub mod registry;

pub use connection::{Connection, SecurityContext, LOCAL_CONNECTION_ID};
pub use registry::{ConnectionRegistry, ConnectionsFile};
