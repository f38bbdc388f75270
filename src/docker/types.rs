//! Runtime data returned by [`ContainerRuntime`](super::ContainerRuntime).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One row of `docker ps`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerSummary {
    #[serde(rename = "ID")]
    pub id: String,

    /// Comma-separated container names.
    #[serde(rename = "Names")]
    pub names: String,

    #[serde(rename = "Image")]
    pub image: String,

    /// Lifecycle state, e.g. `running` or `exited`.
    #[serde(rename = "State", default)]
    pub state: String,

    /// Human status, e.g. `Up 3 hours`.
    #[serde(rename = "Status", default)]
    pub status: String,

    /// Port mappings as printed by docker, e.g. `127.0.0.1:10000->9090/tcp`.
    #[serde(rename = "Ports", default)]
    pub ports: String,
}

impl ContainerSummary {
    pub fn new(id: &str, name: &str, image: &str, state: &str) -> Self {
        Self {
            id: id.to_string(),
            names: name.to_string(),
            image: image.to_string(),
            state: state.to_string(),
            status: String::new(),
            ports: String::new(),
        }
    }

    /// A running container.
    pub fn running(id: &str, name: &str, image: &str) -> Self {
        Self::new(id, name, image, "running")
    }

    pub fn with_ports(mut self, ports: &str) -> Self {
        self.ports = ports.to_string();
        self
    }

    /// Individual names, without docker's leading slash.
    pub fn name_list(&self) -> impl Iterator<Item = &str> {
        self.names
            .split(',')
            .map(|n| n.trim().trim_start_matches('/'))
            .filter(|n| !n.is_empty())
    }

    pub fn has_name(&self, name: &str) -> bool {
        self.name_list().any(|n| n == name)
    }

    pub fn is_running(&self) -> bool {
        self.state.eq_ignore_ascii_case("running")
    }

    /// Tag part of the image reference, if any.
    pub fn image_tag(&self) -> Option<&str> {
        image_tag(&self.image)
    }

    /// Host port published for `private_port`.
    pub fn public_port(&self, private_port: u16) -> Option<u16> {
        self.ports.split(',').find_map(|mapping| {
            let (host, container) = mapping.trim().split_once("->")?;
            let container_port: u16 = container.split('/').next()?.parse().ok()?;
            if container_port != private_port {
                return None;
            }
            host.rsplit(':').next()?.parse().ok()
        })
    }
}

/// One row of `docker images`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSummary {
    #[serde(rename = "ID")]
    pub id: String,

    #[serde(rename = "Repository")]
    pub repository: String,

    #[serde(rename = "Tag", default)]
    pub tag: String,

    #[serde(rename = "Digest", default)]
    pub digest: String,
}

/// Subset of `docker inspect` output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerDetails {
    #[serde(rename = "Id")]
    pub id: String,

    #[serde(rename = "Name", default)]
    pub name: String,

    #[serde(rename = "Image", default)]
    pub image_id: String,

    #[serde(rename = "State", default)]
    pub state: ContainerState,

    #[serde(rename = "Config", default)]
    pub config: ContainerConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerState {
    #[serde(rename = "Status", default)]
    pub status: String,

    #[serde(rename = "Running", default)]
    pub running: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerConfig {
    #[serde(rename = "Image", default)]
    pub image: String,

    #[serde(rename = "Labels", default)]
    pub labels: Option<HashMap<String, String>>,
}

impl ContainerDetails {
    /// Value of an image label, e.g. `org.opencontainers.image.version`.
    pub fn label(&self, key: &str) -> Option<&str> {
        self.config.labels.as_ref()?.get(key).map(String::as_str)
    }
}

/// Tag of an image reference such as `registry:5000/repo:tag@sha256:...`.
pub fn image_tag(image: &str) -> Option<&str> {
    let without_digest = image.split('@').next().unwrap_or(image);
    let last_segment = without_digest.rsplit('/').next().unwrap_or(without_digest);
    last_segment
        .split_once(':')
        .map(|(_, tag)| tag)
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_docker_ps_json_row() {
        let row = r#"{"Command":"\"/scripts/root-watcher.sh\"","CreatedAt":"2020-01-29 14:27:43 +0000 GMT","ID":"4f2a","Image":"eclipse/codewind-pfe-amd64:0.9.0","Labels":"","Names":"codewind-pfe","Ports":"127.0.0.1:10000->9090/tcp","State":"running","Status":"Up 2 hours"}"#;
        let summary: ContainerSummary = serde_json::from_str(row).unwrap();
        assert_eq!(summary.id, "4f2a");
        assert!(summary.has_name("codewind-pfe"));
        assert!(summary.is_running());
        assert_eq!(summary.public_port(9090), Some(10000));
        assert_eq!(summary.image_tag(), Some("0.9.0"));
    }

    #[test]
    fn public_port_ignores_other_mappings() {
        let summary = ContainerSummary::running("a", "b", "c")
            .with_ports("0.0.0.0:8080->80/tcp, :::9191->9090/tcp, 5000/tcp");
        assert_eq!(summary.public_port(9090), Some(9191));
        assert_eq!(summary.public_port(80), Some(8080));
        assert_eq!(summary.public_port(5000), None);
    }

    #[test]
    fn names_strip_leading_slash() {
        let summary = ContainerSummary::running("a", "/codewind-pfe,/alias", "img");
        assert!(summary.has_name("codewind-pfe"));
        assert!(summary.has_name("alias"));
    }

    #[test]
    fn image_tag_handles_registry_ports_and_digests() {
        assert_eq!(image_tag("localhost:5000/cw/pfe:1.2"), Some("1.2"));
        assert_eq!(image_tag("localhost:5000/cw/pfe"), None);
        assert_eq!(image_tag("pfe:latest@sha256:7173b809"), Some("latest"));
        assert_eq!(image_tag("pfe"), None);
    }

    #[test]
    fn inspect_labels() {
        let json = r#"{"Id":"abc","Name":"/codewind-pfe","State":{"Status":"running","Running":true},"Config":{"Image":"pfe:0.9.0","Labels":{"org.opencontainers.image.version":"0.9.0"}}}"#;
        let details: ContainerDetails = serde_json::from_str(json).unwrap();
        assert!(details.state.running);
        assert_eq!(details.label("org.opencontainers.image.version"), Some("0.9.0"));
        assert_eq!(details.label("missing"), None);
    }
}
