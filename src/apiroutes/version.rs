//! Probing service versions across connections.
//!
//! Each service exposes an environment endpoint returning a small JSON
//! envelope ([`EnvResponse`]). A probe turns that envelope into the
//! composite string `"{version}-{image_build_time}"`.
//!
//! [`aggregate_all`] probes every connection in turn. A failing connection
//! is recorded in [`AggregateVersions::connection_errors`] and never stops
//! the others from being probed.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize, Serializer};
use tracing::{debug, warn};

use super::service::{Service, PFE_CONTAINER_PORT};
use crate::connections::Connection;
use crate::docker::{self, ContainerRuntime};
use crate::error::{ApiError, ErrorKind, TEXT_API_NOT_FOUND};
use crate::sechttp::{dispatch_http_request, HttpClient, HttpRequest};

/// Operation tag for failed version requests.
pub const ERR_OP_VER_REQUEST: &str = "ver_request";
/// Operation tag for a version endpoint that does not exist.
pub const ERR_OP_VER_NOT_FOUND: &str = "ver_not_found";
/// Operation tag for unparseable version responses.
pub const ERR_OP_VER_PARSE: &str = "ver_parse";

/// Body of a service's environment endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvResponse {
    #[serde(default, alias = "codewind_version")]
    pub version: Option<String>,

    #[serde(default, alias = "build_time")]
    pub image_build_time: Option<String>,
}

impl EnvResponse {
    pub fn new(version: &str, image_build_time: &str) -> Self {
        Self {
            version: Some(version.to_string()),
            image_build_time: Some(image_build_time.to_string()),
        }
    }

    /// `"{version}-{image_build_time}"`, with missing fields as empty strings.
    pub fn composite_version(&self) -> String {
        format!(
            "{}-{}",
            self.version.as_deref().unwrap_or_default(),
            self.image_build_time.as_deref().unwrap_or_default()
        )
    }
}

/// Versions of the services behind one connection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContainerVersions {
    /// Always serialized.
    #[serde(rename = "pfe_version")]
    pub pfe: String,

    #[serde(rename = "performance_version", skip_serializing_if = "String::is_empty")]
    pub performance: String,

    /// Empty when the connection has no gatekeeper.
    #[serde(rename = "gatekeeper_version", skip_serializing_if = "String::is_empty")]
    pub gatekeeper: String,
}

impl ContainerVersions {
    /// Version of a single service; empty if it was not probed.
    pub fn get(&self, service: Service) -> &str {
        match service {
            Service::Pfe => &self.pfe,
            Service::Performance => &self.performance,
            Service::Gatekeeper => &self.gatekeeper,
        }
    }
}

/// Result of probing a batch of connections.
///
/// Every probed connection id appears in exactly one of the two maps.
#[derive(Debug, Default, Serialize)]
pub struct AggregateVersions {
    pub cwctl_version: String,

    pub connections: BTreeMap<String, ContainerVersions>,

    #[serde(serialize_with = "serialize_errors")]
    pub connection_errors: BTreeMap<String, ApiError>,
}

impl AggregateVersions {
    pub fn new(cwctl_version: impl Into<String>) -> Self {
        Self {
            cwctl_version: cwctl_version.into(),
            ..Default::default()
        }
    }

    /// Record the outcome of one connection's probe.
    pub fn record(&mut self, id: &str, result: Result<ContainerVersions, ApiError>) {
        match result {
            Ok(versions) => {
                self.connection_errors.remove(id);
                self.connections.insert(id.to_string(), versions);
            }
            Err(err) => {
                self.connections.remove(id);
                self.connection_errors.insert(id.to_string(), err);
            }
        }
    }

    /// Whether at least one connection failed.
    pub fn has_errors(&self) -> bool {
        !self.connection_errors.is_empty()
    }
}

fn serialize_errors<S: Serializer>(
    errors: &BTreeMap<String, ApiError>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_map(errors.iter().map(|(id, err)| (id, err.to_output())))
}

/// Probe one service endpoint at `base_url + service_path`.
pub fn probe_single_service<C: HttpClient + ?Sized>(
    client: &C,
    base_url: &str,
    service_path: &str,
    connection: &Connection,
) -> Result<String, ApiError> {
    let url = format!("{}{}", base_url.trim_end_matches('/'), service_path);
    debug!(connection = %connection.id, %url, "Probing service version");

    let response = dispatch_http_request(client, HttpRequest::get(url), connection)?;

    if response.is_not_found() {
        return Err(ApiError::new(
            ErrorKind::Request,
            ERR_OP_VER_NOT_FOUND,
            TEXT_API_NOT_FOUND,
            None,
        ));
    }
    if !response.is_success() {
        return Err(ApiError::status(ERR_OP_VER_REQUEST, response.status));
    }

    let env: EnvResponse = serde_json::from_slice(&response.body)
        .map_err(|e| ApiError::parse(ERR_OP_VER_PARSE, e))?;
    Ok(env.composite_version())
}

/// Probe a known service.
pub fn probe_service<C: HttpClient + ?Sized>(
    client: &C,
    base_url: &str,
    service: Service,
    connection: &Connection,
) -> Result<String, ApiError> {
    probe_single_service(client, base_url, service.path(), connection)
}

/// Base URL to probe for `connection`.
///
/// A registered URL always wins. The local connection without one is
/// located through the runtime: the host port published for the PFE
/// container.
pub fn resolve_base_url<R: ContainerRuntime + ?Sized>(
    runtime: &R,
    connection: &Connection,
) -> Result<String, ApiError> {
    if let Some(url) = connection.base_url() {
        return Ok(url.to_string());
    }
    if !connection.is_local() {
        return Err(ApiError::request_msg(
            ERR_OP_VER_REQUEST,
            format!("Connection '{}' has no URL", connection.id),
        ));
    }

    let container = docker::find_container(runtime, Service::Pfe.container_name())?
        .filter(|c| c.is_running())
        .ok_or_else(|| {
            ApiError::request_msg(ERR_OP_VER_REQUEST, "Codewind PFE container is not running")
        })?;
    let port = container.public_port(PFE_CONTAINER_PORT).ok_or_else(|| {
        ApiError::request_msg(
            ERR_OP_VER_REQUEST,
            format!("PFE port {} is not published", PFE_CONTAINER_PORT),
        )
    })?;
    Ok(format!("http://127.0.0.1:{}", port))
}

/// Whether a local gatekeeper container is running.
///
/// An unreachable runtime counts as "no gatekeeper".
fn gatekeeper_present<R: ContainerRuntime + ?Sized>(runtime: &R) -> bool {
    docker::is_service_running(runtime, Service::Gatekeeper).unwrap_or_else(|err| {
        debug!(error = %err, "Could not check for a gatekeeper container");
        false
    })
}

/// Probe every service behind one connection.
///
/// The gatekeeper is only probed for the local connection, and only when
/// its container is running; otherwise its version is left empty.
pub fn probe_connection<C, R>(
    client: &C,
    runtime: &R,
    connection: &Connection,
) -> Result<ContainerVersions, ApiError>
where
    C: HttpClient + ?Sized,
    R: ContainerRuntime + ?Sized,
{
    let base_url = resolve_base_url(runtime, connection)?;

    let pfe = probe_service(client, &base_url, Service::Pfe, connection)?;
    let performance = probe_service(client, &base_url, Service::Performance, connection)?;

    let gatekeeper = if connection.is_local() && gatekeeper_present(runtime) {
        probe_service(client, &base_url, Service::Gatekeeper, connection)?
    } else {
        String::new()
    };

    Ok(ContainerVersions {
        pfe,
        performance,
        gatekeeper,
    })
}

/// Probe every connection in order and collect results per connection id.
pub fn aggregate_all<C, R>(
    client: &C,
    runtime: &R,
    connections: &[Connection],
    cwctl_version: &str,
) -> AggregateVersions
where
    C: HttpClient + ?Sized,
    R: ContainerRuntime + ?Sized,
{
    let mut aggregate = AggregateVersions::new(cwctl_version);

    for connection in connections {
        let result = probe_connection(client, runtime, connection);
        if let Err(err) = &result {
            warn!(connection = %connection.id, error = %err, "Version probe failed");
        }
        aggregate.record(&connection.id, result);
    }

    aggregate
}
