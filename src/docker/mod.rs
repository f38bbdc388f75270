//! Container runtime access.
//!
//! The runtime is consumed through the narrow [`ContainerRuntime`] trait.
//! [`DockerCli`] implements it by shelling out to the `docker` binary;
//! [`MockRuntime`] serves fixed data in tests.

pub mod cli;
pub mod mock;
pub mod types;

use tracing::debug;

use crate::apiroutes::Service;
use crate::error::ApiError;

pub use cli::DockerCli;
pub use mock::MockRuntime;
pub use types::{image_tag, ContainerDetails, ContainerSummary, ImageSummary};

/// Operation tag for failed container listing.
pub const ERR_OP_DOCKER_LIST: &str = "docker_list";
/// Operation tag for failed image listing.
pub const ERR_OP_DOCKER_IMAGES: &str = "docker_images";
/// Operation tag for failed container inspection.
pub const ERR_OP_DOCKER_INSPECT: &str = "docker_inspect";
/// Operation tag for a failed image pull.
pub const ERR_OP_DOCKER_PULL: &str = "docker_pull";
/// Operation tag for a container that could not be stopped.
pub const ERR_OP_DOCKER_STOP: &str = "docker_stop";
/// Operation tag for a container that could not be removed.
pub const ERR_OP_DOCKER_REMOVE: &str = "docker_remove";
/// Operation tag for a failed registry digest lookup.
pub const ERR_OP_DOCKER_DISTRIBUTION: &str = "docker_distribution";

/// The container runtime operations cwctl relies on.
pub trait ContainerRuntime {
    /// List all containers, running or not.
    fn list_containers(&self) -> Result<Vec<ContainerSummary>, ApiError>;

    /// List local images.
    fn list_images(&self) -> Result<Vec<ImageSummary>, ApiError>;

    /// Inspect a single container by id or name.
    fn inspect_container(&self, id: &str) -> Result<ContainerDetails, ApiError>;

    /// Pull an image reference from its registry.
    fn pull_image(&self, image: &str) -> Result<(), ApiError>;

    /// Stop a running container.
    fn stop_container(&self, id: &str) -> Result<(), ApiError>;

    /// Remove a stopped container.
    fn remove_container(&self, id: &str) -> Result<(), ApiError>;

    /// Digest the registry currently serves for an image reference.
    fn distribution_digest(&self, image: &str) -> Result<String, ApiError>;
}

/// Find a container by exact name.
pub fn find_container<R: ContainerRuntime + ?Sized>(
    runtime: &R,
    name: &str,
) -> Result<Option<ContainerSummary>, ApiError> {
    Ok(runtime
        .list_containers()?
        .into_iter()
        .find(|c| c.has_name(name)))
}

/// Whether the container backing `service` is running.
pub fn is_service_running<R: ContainerRuntime + ?Sized>(
    runtime: &R,
    service: Service,
) -> Result<bool, ApiError> {
    Ok(find_container(runtime, service.container_name())?.is_some_and(|c| c.is_running()))
}

/// Running platform containers, in [`Service::ALL`] order.
pub fn running_services<R: ContainerRuntime + ?Sized>(
    runtime: &R,
) -> Result<Vec<(Service, ContainerSummary)>, ApiError> {
    let containers = runtime.list_containers()?;
    Ok(Service::ALL
        .iter()
        .filter_map(|service| {
            containers
                .iter()
                .find(|c| c.has_name(service.container_name()) && c.is_running())
                .map(|c| (*service, c.clone()))
        })
        .collect())
}

/// Stop and remove every running platform container.
///
/// Containers are taken down in reverse [`Service::ALL`] order. Returns the
/// services that were stopped.
pub fn stop_services<R: ContainerRuntime + ?Sized>(runtime: &R) -> Result<Vec<Service>, ApiError> {
    let mut running = running_services(runtime)?;
    running.reverse();

    let mut stopped = Vec::with_capacity(running.len());
    for (service, container) in running {
        debug!(%service, container = %container.id, "Stopping container");
        runtime.stop_container(&container.id)?;
        runtime.remove_container(&container.id)?;
        stopped.push(service);
    }
    Ok(stopped)
}

/// Pull the image of every service in `services` at `tag`.
pub fn pull_services<R: ContainerRuntime + ?Sized>(
    runtime: &R,
    services: &[Service],
    tag: &str,
) -> Result<Vec<String>, ApiError> {
    services
        .iter()
        .map(|service| {
            let image = service.image(tag);
            debug!(%image, "Pulling image");
            runtime.pull_image(&image)?;
            Ok(image)
        })
        .collect()
}

/// Whether the registry serves a different digest than the local image.
///
/// `None` when either digest is unknown.
pub fn update_available(local_digest: &str, remote_digest: &str) -> Option<bool> {
    if local_digest.is_empty() || remote_digest.is_empty() {
        return None;
    }
    Some(local_digest != remote_digest)
}

/// Label holding an image's version.
pub const VERSION_LABEL: &str = "org.opencontainers.image.version";

/// Digest of the local image an image reference points at.
///
/// References without a tag match `latest`. Images without a digest
/// (`<none>`) never match.
pub fn image_digest<'a>(images: &'a [ImageSummary], image_ref: &str) -> Option<&'a str> {
    let name = image_ref.split('@').next().unwrap_or(image_ref);
    let (repository, tag) = match image_tag(name) {
        Some(tag) => (&name[..name.len() - tag.len() - 1], tag),
        None => (name, "latest"),
    };
    images
        .iter()
        .find(|img| img.repository == repository && img.tag == tag)
        .map(|img| img.digest.as_str())
        .filter(|d| !d.is_empty() && *d != "<none>")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runtime() -> MockRuntime {
        MockRuntime::new(vec![
            ContainerSummary::running("pfe", "codewind-pfe", "eclipse/codewind-pfe-amd64:0.9.0")
                .with_ports("127.0.0.1:10000->9090/tcp"),
            ContainerSummary::running(
                "perf",
                "codewind-performance",
                "eclipse/codewind-performance-amd64:0.9.0",
            ),
            ContainerSummary::new(
                "gk",
                "codewind-gatekeeper",
                "eclipse/codewind-gatekeeper-amd64:0.9.0",
                "exited",
            ),
        ])
    }

    fn image(repository: &str, tag: &str, digest: &str) -> ImageSummary {
        ImageSummary {
            id: "id".into(),
            repository: repository.into(),
            tag: tag.into(),
            digest: digest.into(),
        }
    }

    #[test]
    fn image_digest_matches_repository_and_tag() {
        let images = vec![
            image("eclipse/codewind-pfe-amd64", "0.8.0", "sha256:old"),
            image("eclipse/codewind-pfe-amd64", "0.9.0", "sha256:7173b809"),
            image("localhost:5000/pfe", "latest", "<none>"),
        ];
        assert_eq!(
            image_digest(&images, "eclipse/codewind-pfe-amd64:0.9.0"),
            Some("sha256:7173b809")
        );
        assert_eq!(image_digest(&images, "localhost:5000/pfe"), None);
        assert_eq!(image_digest(&images, "eclipse/codewind-pfe-amd64:1.0.0"), None);
    }

    #[test]
    fn finds_container_by_name() {
        let found = find_container(&runtime(), "codewind-performance").unwrap();
        assert_eq!(found.unwrap().id, "perf");
        assert!(find_container(&runtime(), "nothing").unwrap().is_none());
    }

    #[test]
    fn stopped_container_is_not_running_service() {
        assert!(is_service_running(&runtime(), Service::Pfe).unwrap());
        assert!(!is_service_running(&runtime(), Service::Gatekeeper).unwrap());
    }

    #[test]
    fn running_services_skip_stopped() {
        let services: Vec<_> = running_services(&runtime())
            .unwrap()
            .into_iter()
            .map(|(s, _)| s)
            .collect();
        assert_eq!(services, vec![Service::Pfe, Service::Performance]);
    }

    #[test]
    fn stop_services_takes_running_containers_down_in_reverse() {
        let runtime = runtime();
        let stopped = stop_services(&runtime).unwrap();

        assert_eq!(stopped, vec![Service::Performance, Service::Pfe]);
        assert_eq!(
            runtime.actions(),
            vec!["stop perf", "remove perf", "stop pfe", "remove pfe"]
        );
    }

    #[test]
    fn pull_services_pulls_each_image_at_tag() {
        let runtime = MockRuntime::default();
        let pulled =
            pull_services(&runtime, &[Service::Pfe, Service::Performance], "0.9.0").unwrap();

        assert_eq!(pulled.len(), 2);
        assert_eq!(runtime.actions()[0], format!("pull {}", Service::Pfe.image("0.9.0")));
        assert_eq!(
            runtime.actions()[1],
            format!("pull {}", Service::Performance.image("0.9.0"))
        );
    }

    #[test]
    fn update_available_needs_both_digests() {
        assert_eq!(update_available("sha256:a", "sha256:b"), Some(true));
        assert_eq!(update_available("sha256:a", "sha256:a"), Some(false));
        assert_eq!(update_available("", "sha256:a"), None);
    }
}
