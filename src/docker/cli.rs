//! [`ContainerRuntime`] backed by the `docker` command.

use std::process::Command;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use super::types::{ContainerDetails, ContainerSummary, ImageSummary};
use super::{
    ContainerRuntime, ERR_OP_DOCKER_DISTRIBUTION, ERR_OP_DOCKER_IMAGES, ERR_OP_DOCKER_INSPECT,
    ERR_OP_DOCKER_LIST, ERR_OP_DOCKER_PULL, ERR_OP_DOCKER_REMOVE, ERR_OP_DOCKER_STOP,
};
use crate::error::ApiError;

/// Runs `docker` and parses its JSON output.
#[derive(Debug, Clone)]
pub struct DockerCli {
    binary: String,
}

impl Default for DockerCli {
    fn default() -> Self {
        Self::new("docker")
    }
}

impl DockerCli {
    /// Use a specific docker-compatible binary (e.g. `podman`).
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn run(&self, op: &'static str, args: &[&str]) -> Result<String, ApiError> {
        debug!(binary = %self.binary, ?args, "Running container runtime command");
        let output = Command::new(&self.binary)
            .args(args)
            .output()
            .map_err(|e| ApiError::request(op, e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            if stderr.contains("No such") {
                return Err(ApiError::not_found(op));
            }
            return Err(ApiError::request_msg(
                op,
                format!("{} {} failed: {}", self.binary, args.join(" "), stderr),
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Manifest descriptor printed by `docker buildx imagetools inspect`.
#[derive(Debug, Deserialize)]
struct ManifestDescriptor {
    #[serde(default)]
    digest: String,
}

/// Parse one JSON document per non-empty line.
pub(crate) fn parse_json_lines<T: DeserializeOwned>(stdout: &str) -> serde_json::Result<Vec<T>> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(serde_json::from_str)
        .collect()
}

impl ContainerRuntime for DockerCli {
    fn list_containers(&self) -> Result<Vec<ContainerSummary>, ApiError> {
        let stdout = self.run(ERR_OP_DOCKER_LIST, &["ps", "-a", "--format", "{{json .}}"])?;
        parse_json_lines(&stdout).map_err(|e| ApiError::parse(ERR_OP_DOCKER_LIST, e))
    }

    fn list_images(&self) -> Result<Vec<ImageSummary>, ApiError> {
        let stdout = self.run(
            ERR_OP_DOCKER_IMAGES,
            &["images", "--digests", "--format", "{{json .}}"],
        )?;
        parse_json_lines(&stdout).map_err(|e| ApiError::parse(ERR_OP_DOCKER_IMAGES, e))
    }

    fn inspect_container(&self, id: &str) -> Result<ContainerDetails, ApiError> {
        let stdout = self.run(ERR_OP_DOCKER_INSPECT, &["inspect", "--type", "container", id])?;
        let mut details: Vec<ContainerDetails> =
            serde_json::from_str(&stdout).map_err(|e| ApiError::parse(ERR_OP_DOCKER_INSPECT, e))?;
        if details.is_empty() {
            return Err(ApiError::not_found(ERR_OP_DOCKER_INSPECT));
        }
        Ok(details.swap_remove(0))
    }

    fn pull_image(&self, image: &str) -> Result<(), ApiError> {
        self.run(ERR_OP_DOCKER_PULL, &["pull", "--quiet", image])?;
        Ok(())
    }

    fn stop_container(&self, id: &str) -> Result<(), ApiError> {
        self.run(ERR_OP_DOCKER_STOP, &["stop", id])?;
        Ok(())
    }

    fn remove_container(&self, id: &str) -> Result<(), ApiError> {
        self.run(ERR_OP_DOCKER_REMOVE, &["rm", id])?;
        Ok(())
    }

    fn distribution_digest(&self, image: &str) -> Result<String, ApiError> {
        let stdout = self.run(
            ERR_OP_DOCKER_DISTRIBUTION,
            &[
                "buildx",
                "imagetools",
                "inspect",
                image,
                "--format",
                "{{json .Manifest}}",
            ],
        )?;
        parse_manifest_digest(&stdout)
    }
}

fn parse_manifest_digest(stdout: &str) -> Result<String, ApiError> {
    let manifest: ManifestDescriptor = serde_json::from_str(stdout.trim())
        .map_err(|e| ApiError::parse(ERR_OP_DOCKER_DISTRIBUTION, e))?;
    if manifest.digest.is_empty() {
        return Err(ApiError::not_found(ERR_OP_DOCKER_DISTRIBUTION));
    }
    Ok(manifest.digest)
}
