//! Version probes against platform services.
//!
//! - [`service`] - The probed services and their endpoint paths
//! - [`version`] - Probing a connection and aggregating across connections

pub mod service;
pub mod version;

pub use service::Service;
pub use version::{
    aggregate_all, probe_connection, probe_service, probe_single_service, resolve_base_url,
    AggregateVersions, ContainerVersions, EnvResponse,
};
