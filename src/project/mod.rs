//! Project-level calls to the platform service.
//!
//! - [`network`] - Endpoints a project is reachable on

pub mod network;

pub use network::{
    create_project_network, get_project_network, network_url, ProjectNetwork, ProjectNetworkList,
};
