//! cwctl - installer and management CLI for containerised development
//! environments.
//!
//! cwctl talks to the services of a platform deployment (the editing
//! service "PFE", the performance service and, optionally, the gatekeeper)
//! through named connections, and manages client-side project records.
//!
//! # Modules
//!
//! - [`apiroutes`] - Version probes and multi-connection aggregation
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Config directory discovery
//! - [`connections`] - Connections and the connections file
//! - [`docker`] - Container runtime access
//! - [`error`] - Error types and result aliases
//! - [`project`] - Project network records
//! - [`sechttp`] - HTTP client trait and credentialed dispatch
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use cwctl::apiroutes::{aggregate_all, EnvResponse};
//! use cwctl::connections::Connection;
//! use cwctl::docker::MockRuntime;
//! use cwctl::sechttp::{MockClient, MockResponse};
//!
//! let client = MockClient::new(vec![
//!     MockResponse::json(&EnvResponse::new("0.9.0", "20200129-142743")),
//!     MockResponse::json(&EnvResponse::new("0.9.0", "20200129-142800")),
//! ]);
//! let connections = vec![Connection::new("local", Some("http://localhost:9090".into()))];
//!
//! let versions = aggregate_all(&client, &MockRuntime::default(), &connections, "0.9.0");
//! assert_eq!(versions.connections["local"].pfe, "0.9.0-20200129-142743");
//! ```

pub mod apiroutes;
pub mod cli;
pub mod config;
pub mod connections;
pub mod docker;
pub mod error;
pub mod project;
pub mod sechttp;
pub mod ui;

pub use error::{ApiError, CwctlError, ErrorKind, Result};

/// Version of this build of cwctl.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
