//! Probed services.

use std::fmt;

use serde::Serialize;

/// Container port the PFE service listens on.
pub const PFE_CONTAINER_PORT: u16 = 9090;

/// Registry namespace the platform images are published under.
pub const IMAGE_NAMESPACE: &str = "eclipse";

/// Architecture suffix of the platform images for this host.
pub fn image_arch() -> &'static str {
    match std::env::consts::ARCH {
        "powerpc64" => "ppc64le",
        "s390x" => "s390x",
        _ => "amd64",
    }
}

/// A platform service whose version can be probed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Service {
    /// The editing platform service. Always present.
    Pfe,
    /// The performance dashboard service.
    Performance,
    /// Optional authenticating front door.
    Gatekeeper,
}

impl Service {
    /// All services, in probe order.
    pub const ALL: [Service; 3] = [Service::Pfe, Service::Performance, Service::Gatekeeper];

    /// Path of the service's environment endpoint, relative to the base URL.
    pub fn path(self) -> &'static str {
        match self {
            Self::Pfe => "/api/v1/environment",
            Self::Performance => "/performance/api/v1/environment",
            Self::Gatekeeper => "/api/v1/gatekeeper/environment",
        }
    }

    /// Name of the container that runs the service.
    pub fn container_name(self) -> &'static str {
        match self {
            Self::Pfe => "codewind-pfe",
            Self::Performance => "codewind-performance",
            Self::Gatekeeper => "codewind-gatekeeper",
        }
    }

    /// Image repository the service's container runs, without a tag.
    pub fn image_repository(self) -> String {
        format!(
            "{}/{}-{}",
            IMAGE_NAMESPACE,
            self.container_name(),
            image_arch()
        )
    }

    /// Full image reference for `tag`.
    pub fn image(self, tag: &str) -> String {
        format!("{}:{}", self.image_repository(), tag)
    }

    /// Short display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Pfe => "pfe",
            Self::Performance => "performance",
            Self::Gatekeeper => "gatekeeper",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
