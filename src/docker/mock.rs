//! Fixed-data [`ContainerRuntime`] for tests.

use std::cell::RefCell;
use std::collections::HashMap;

use super::types::{ContainerDetails, ContainerState, ContainerSummary, ImageSummary};
use super::{
    ContainerRuntime, ERR_OP_DOCKER_DISTRIBUTION, ERR_OP_DOCKER_INSPECT, ERR_OP_DOCKER_REMOVE,
    ERR_OP_DOCKER_STOP,
};
use crate::error::ApiError;

/// Runtime that reports a fixed set of containers and images.
///
/// Mutating calls are recorded as `"<verb> <target>"` strings and never
/// change the reported containers.
#[derive(Debug, Clone, Default)]
pub struct MockRuntime {
    pub containers: Vec<ContainerSummary>,
    pub images: Vec<ImageSummary>,
    pub remote_digests: HashMap<String, String>,
    actions: RefCell<Vec<String>>,
}

impl MockRuntime {
    pub fn new(containers: Vec<ContainerSummary>) -> Self {
        Self {
            containers,
            ..Default::default()
        }
    }

    pub fn with_images(mut self, images: Vec<ImageSummary>) -> Self {
        self.images = images;
        self
    }

    /// Serve `digest` for `image` from the fake registry.
    pub fn with_remote_digest(mut self, image: &str, digest: &str) -> Self {
        self.remote_digests
            .insert(image.to_string(), digest.to_string());
        self
    }

    /// Mutating calls received so far.
    pub fn actions(&self) -> Vec<String> {
        self.actions.borrow().clone()
    }

    fn record(&self, action: &str, target: &str) {
        self.actions
            .borrow_mut()
            .push(format!("{} {}", action, target));
    }

    fn container(&self, op: &'static str, id: &str) -> Result<&ContainerSummary, ApiError> {
        self.containers
            .iter()
            .find(|c| c.id == id || c.has_name(id))
            .ok_or_else(|| ApiError::not_found(op))
    }
}

impl ContainerRuntime for MockRuntime {
    fn list_containers(&self) -> Result<Vec<ContainerSummary>, ApiError> {
        Ok(self.containers.clone())
    }

    fn list_images(&self) -> Result<Vec<ImageSummary>, ApiError> {
        Ok(self.images.clone())
    }

    fn inspect_container(&self, id: &str) -> Result<ContainerDetails, ApiError> {
        let summary = self.container(ERR_OP_DOCKER_INSPECT, id)?;
        Ok(ContainerDetails {
            id: summary.id.clone(),
            name: format!("/{}", summary.name_list().next().unwrap_or_default()),
            image_id: String::new(),
            state: ContainerState {
                status: summary.state.clone(),
                running: summary.is_running(),
            },
            config: Default::default(),
        })
    }

    fn pull_image(&self, image: &str) -> Result<(), ApiError> {
        self.record("pull", image);
        Ok(())
    }

    fn stop_container(&self, id: &str) -> Result<(), ApiError> {
        self.container(ERR_OP_DOCKER_STOP, id)?;
        self.record("stop", id);
        Ok(())
    }

    fn remove_container(&self, id: &str) -> Result<(), ApiError> {
        self.container(ERR_OP_DOCKER_REMOVE, id)?;
        self.record("remove", id);
        Ok(())
    }

    fn distribution_digest(&self, image: &str) -> Result<String, ApiError> {
        self.remote_digests
            .get(image)
            .cloned()
            .ok_or_else(|| ApiError::not_found(ERR_OP_DOCKER_DISTRIBUTION))
    }
}
