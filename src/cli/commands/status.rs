//! `cwctl status`.
//!
//! Shows which platform containers run on this machine, the image tag each
//! was started from, and the digest of that image when it is known locally.
//! With `--check-updates` the local digest is compared with the one the
//! registry serves for the same reference.

use serde::Serialize;
use tracing::debug;

use crate::apiroutes::Service;
use crate::cli::args::StatusArgs;
use crate::docker::{self, ContainerRuntime, VERSION_LABEL};
use crate::error::Result;
use crate::ui::{Table, UserInterface};

use super::dispatcher::{Command, CommandContext, CommandResult};
use super::display::{or_dash, to_json};

/// Reports locally running platform containers.
pub struct StatusCommand {
    args: StatusArgs,
}

impl StatusCommand {
    pub fn new(args: StatusArgs) -> Self {
        Self { args }
    }
}

/// One running platform container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceStatus {
    pub service: Service,
    pub container_id: String,
    pub image: String,
    pub version: String,
    pub digest: String,
    /// Set only when updates were checked and both digests are known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_available: Option<bool>,
}

/// Collect the status of every running platform container.
pub fn collect_status<R: ContainerRuntime + ?Sized>(runtime: &R) -> Result<Vec<ServiceStatus>> {
    let running = docker::running_services(runtime)?;
    let images = runtime.list_images()?;

    running
        .into_iter()
        .map(|(service, container)| -> Result<ServiceStatus> {
            let details = runtime.inspect_container(&container.id)?;
            let version = details
                .label(VERSION_LABEL)
                .or_else(|| container.image_tag())
                .unwrap_or_default()
                .to_string();
            debug!(%service, container = %container.id, %version, "Found running service");
            Ok(ServiceStatus {
                service,
                digest: docker::image_digest(&images, &container.image)
                    .unwrap_or_default()
                    .to_string(),
                container_id: container.id,
                image: container.image,
                version,
                update_available: None,
            })
        })
        .collect()
}

/// Fill in `update_available` from the registry's digests.
///
/// A failed registry lookup leaves the entry unknown.
pub fn check_updates<R: ContainerRuntime + ?Sized>(runtime: &R, statuses: &mut [ServiceStatus]) {
    for status in statuses {
        status.update_available = match runtime.distribution_digest(&status.image) {
            Ok(remote) => docker::update_available(&status.digest, &remote),
            Err(err) => {
                debug!(image = %status.image, error = %err, "Could not fetch registry digest");
                None
            }
        };
    }
}

fn update_cell(status: &ServiceStatus) -> &'static str {
    match status.update_available {
        Some(true) => "available",
        Some(false) => "up to date",
        None => "-",
    }
}

impl Command for StatusCommand {
    fn execute(
        &self,
        ctx: &CommandContext<'_>,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        let mut statuses = collect_status(ctx.runtime)?;
        if self.args.check_updates {
            check_updates(ctx.runtime, &mut statuses);
        }

        if ctx.json {
            ui.data(&to_json(&statuses)?);
            return Ok(CommandResult::success());
        }

        if statuses.is_empty() {
            ui.warning("No platform containers are running");
            return Ok(CommandResult::success());
        }

        let mut headers = vec!["SERVICE", "CONTAINER", "VERSION", "DIGEST"];
        if self.args.check_updates {
            headers.push("UPDATE");
        }
        let mut table = Table::new(headers);
        for status in &statuses {
            let mut row = vec![
                status.service.name(),
                status.container_id.as_str(),
                or_dash(&status.version),
                or_dash(&status.digest),
            ];
            if self.args.check_updates {
                row.push(update_cell(status));
            }
            table.add_row(row);
        }
        ui.message(&table.render());
        Ok(CommandResult::success())
    }
}
