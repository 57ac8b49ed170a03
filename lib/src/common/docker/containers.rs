//! # Dockhand Container Resource (`common::docker::containers`)
//!
//! File: lib/src/common/docker/containers.rs
//!
//! ## Overview
//!
//! Thin pass-through wrappers over the Docker Engine container endpoints:
//! list, create, inspect, lifecycle (start/stop/restart/kill/pause/unpause),
//! rename, remove, wait, prune, and log collection. There is no interesting
//! logic here beyond translating bollard's status-coded failures into the
//! library's named error kinds:
//!
//! - 404 on a container operation → `DockhandError::ContainerNotFound`
//! - 404 on create → `DockhandError::ImageNotFound`
//! - 304 on start/stop → treated as success (idempotent lifecycle ops)
//! - anything else → `DockhandError::DockerApi`, propagated unchanged
//!
//! The library performs no retries; every failure surfaces on first report.
//!
use crate::core::error::{DockhandError, Result};
use anyhow::{anyhow, Context};
use bollard::{
    container::{
        Config as ContainerConfig, CreateContainerOptions, InspectContainerOptions,
        KillContainerOptions, ListContainersOptions, LogOutput, LogsOptions,
        PruneContainersOptions, RemoveContainerOptions, RenameContainerOptions,
        StartContainerOptions, StopContainerOptions, WaitContainerOptions,
    },
    models::{ContainerInspectResponse, ContainerSummary},
    Docker,
};
use futures_util::StreamExt;
use std::collections::HashMap;
use tracing::{debug, info, instrument, warn};

/// Maps a bollard error on a container-scoped call to the library taxonomy.
fn translate_container_error(name_or_id: &str, error: bollard::errors::Error) -> anyhow::Error {
    match error {
        bollard::errors::Error::DockerResponseServerError {
            status_code: 404, ..
        } => anyhow!(DockhandError::ContainerNotFound {
            name: name_or_id.to_string(),
        }),
        other => anyhow!(DockhandError::DockerApi { source: other }),
    }
}

/// Returns a summary of containers, optionally including stopped ones and
/// filtered with the Engine API's map-of-lists filter syntax.
#[instrument(skip(docker, filters))]
pub async fn list_containers(
    docker: &Docker,
    all: bool,
    filters: Option<HashMap<String, Vec<String>>>,
) -> Result<Vec<ContainerSummary>> {
    let options = ListContainersOptions::<String> {
        all,
        filters: filters.unwrap_or_default(),
        ..Default::default()
    };
    let containers = docker
        .list_containers(Some(options))
        .await
        .map_err(|e| anyhow!(DockhandError::DockerApi { source: e }))
        .context("Failed to list containers")?;
    debug!("Listed {} containers (all={})", containers.len(), all);
    Ok(containers)
}

/// Creates a container and returns its id.
///
/// # Errors
///
/// * `DockhandError::ImageNotFound` - If the configured image is not present locally (Docker 404).
/// * `DockhandError::DockerOperation` - If a container with the same name already exists (Docker 409).
#[instrument(skip(docker, config), fields(image = ?config.image))]
pub async fn create_container(
    docker: &Docker,
    name: Option<&str>,
    config: ContainerConfig<String>,
) -> Result<String> {
    let options = name.map(|n| CreateContainerOptions {
        name: n.to_string(),
        platform: None,
    });
    let image = config.image.clone().unwrap_or_default();

    match docker.create_container(options, config).await {
        Ok(response) => {
            info!("Created container '{}'", response.id);
            Ok(response.id)
        }
        Err(bollard::errors::Error::DockerResponseServerError {
            status_code: 404, ..
        }) => Err(anyhow!(DockhandError::ImageNotFound { name: image })),
        Err(bollard::errors::Error::DockerResponseServerError {
            status_code: 409,
            message,
        }) => Err(anyhow!(DockhandError::DockerOperation(format!(
            "Container name conflict: {message}"
        )))),
        Err(e) => Err(anyhow!(DockhandError::DockerApi { source: e })
            .context("Failed to create container")),
    }
}

/// Returns low-level information about a container.
#[instrument(skip(docker))]
pub async fn inspect_container(
    docker: &Docker,
    name_or_id: &str,
) -> Result<ContainerInspectResponse> {
    docker
        .inspect_container(name_or_id, None::<InspectContainerOptions>)
        .await
        .map_err(|e| translate_container_error(name_or_id, e))
}

/// Checks whether a container exists, treating a 404 as `false`.
#[instrument(skip(docker))]
pub async fn container_exists(docker: &Docker, name_or_id: &str) -> Result<bool> {
    match docker
        .inspect_container(name_or_id, None::<InspectContainerOptions>)
        .await
    {
        Ok(_) => Ok(true),
        Err(bollard::errors::Error::DockerResponseServerError {
            status_code: 404, ..
        }) => Ok(false),
        Err(e) => Err(anyhow!(DockhandError::DockerApi { source: e })
            .context(format!("Failed to inspect container '{name_or_id}'"))),
    }
}

/// Starts a container. Already-running containers (Docker 304) are success.
#[instrument(skip(docker))]
pub async fn start_container(docker: &Docker, name_or_id: &str) -> Result<()> {
    match docker
        .start_container(name_or_id, None::<StartContainerOptions<String>>)
        .await
    {
        Ok(_) => {
            info!("Container '{}' started", name_or_id);
            Ok(())
        }
        Err(bollard::errors::Error::DockerResponseServerError {
            status_code: 304, ..
        }) => {
            debug!("Container '{}' was already started", name_or_id);
            Ok(())
        }
        Err(e) => Err(translate_container_error(name_or_id, e)),
    }
}

/// Stops a container, waiting `timeout_secs` before the daemon kills it.
/// Already-stopped containers (Docker 304) are success.
#[instrument(skip(docker))]
pub async fn stop_container(
    docker: &Docker,
    name_or_id: &str,
    timeout_secs: Option<i64>,
) -> Result<()> {
    let options = timeout_secs.map(|t| StopContainerOptions { t });
    match docker.stop_container(name_or_id, options).await {
        Ok(_) => {
            info!("Container '{}' stopped", name_or_id);
            Ok(())
        }
        Err(bollard::errors::Error::DockerResponseServerError {
            status_code: 304, ..
        }) => {
            debug!("Container '{}' was already stopped", name_or_id);
            Ok(())
        }
        Err(e) => Err(translate_container_error(name_or_id, e)),
    }
}

/// Restarts a container.
#[instrument(skip(docker))]
pub async fn restart_container(
    docker: &Docker,
    name_or_id: &str,
    timeout_secs: Option<isize>,
) -> Result<()> {
    let options = timeout_secs.map(|t| bollard::container::RestartContainerOptions { t });
    docker
        .restart_container(name_or_id, options)
        .await
        .map_err(|e| translate_container_error(name_or_id, e))?;
    info!("Container '{}' restarted", name_or_id);
    Ok(())
}

/// Kills a container with the given signal (daemon default: SIGKILL).
#[instrument(skip(docker))]
pub async fn kill_container(
    docker: &Docker,
    name_or_id: &str,
    signal: Option<&str>,
) -> Result<()> {
    let options = signal.map(|s| KillContainerOptions {
        signal: s.to_string(),
    });
    docker
        .kill_container(name_or_id, options)
        .await
        .map_err(|e| translate_container_error(name_or_id, e))
}

/// Renames a container.
#[instrument(skip(docker))]
pub async fn rename_container(docker: &Docker, name_or_id: &str, new_name: &str) -> Result<()> {
    docker
        .rename_container(
            name_or_id,
            RenameContainerOptions {
                name: new_name.to_string(),
            },
        )
        .await
        .map_err(|e| translate_container_error(name_or_id, e))
}

/// Pauses a container's processes.
#[instrument(skip(docker))]
pub async fn pause_container(docker: &Docker, name_or_id: &str) -> Result<()> {
    docker
        .pause_container(name_or_id)
        .await
        .map_err(|e| translate_container_error(name_or_id, e))
}

/// Resumes a paused container.
#[instrument(skip(docker))]
pub async fn unpause_container(docker: &Docker, name_or_id: &str) -> Result<()> {
    docker
        .unpause_container(name_or_id)
        .await
        .map_err(|e| translate_container_error(name_or_id, e))
}

/// Removes a container, optionally force-removing a running one.
#[instrument(skip(docker))]
pub async fn remove_container(docker: &Docker, name_or_id: &str, force: bool) -> Result<()> {
    let options = RemoveContainerOptions {
        force,
        ..Default::default()
    };
    docker
        .remove_container(name_or_id, Some(options))
        .await
        .map_err(|e| translate_container_error(name_or_id, e))?;
    info!("Container '{}' removed (force={})", name_or_id, force);
    Ok(())
}

/// Waits for a container to reach the given condition (default: not-running)
/// and returns its exit status code.
#[instrument(skip(docker))]
pub async fn wait_container(
    docker: &Docker,
    name_or_id: &str,
    condition: Option<&str>,
) -> Result<i64> {
    let options = condition.map(|c| WaitContainerOptions {
        condition: c.to_string(),
    });
    let mut stream = docker.wait_container(name_or_id, options);
    match stream.next().await {
        Some(Ok(response)) => Ok(response.status_code),
        // bollard reports a non-zero exit status as an error carrying the code.
        Some(Err(bollard::errors::Error::DockerContainerWaitError { code, .. })) => Ok(code),
        Some(Err(e)) => Err(translate_container_error(name_or_id, e)),
        None => Err(anyhow!(DockhandError::DockerOperation(format!(
            "Wait on container '{name_or_id}' ended without a status"
        )))),
    }
}

/// Deletes stopped containers; returns the ids that were removed.
#[instrument(skip(docker, filters))]
pub async fn prune_containers(
    docker: &Docker,
    filters: Option<HashMap<String, Vec<String>>>,
) -> Result<Vec<String>> {
    let options = filters.map(|f| PruneContainersOptions { filters: f });
    let response = docker
        .prune_containers(options)
        .await
        .map_err(|e| anyhow!(DockhandError::DockerApi { source: e }))
        .context("Failed to prune containers")?;
    let deleted = response.containers_deleted.unwrap_or_default();
    info!("Pruned {} containers", deleted.len());
    Ok(deleted)
}

/// Collects a container's stdout/stderr log lines without following.
///
/// `tail` limits output to the last N lines when given; otherwise the full
/// log is returned.
#[instrument(skip(docker))]
pub async fn container_logs(
    docker: &Docker,
    name_or_id: &str,
    tail: Option<usize>,
) -> Result<Vec<String>> {
    let options = LogsOptions::<String> {
        follow: false,
        stdout: true,
        stderr: true,
        tail: tail.map_or_else(|| "all".to_string(), |n| n.to_string()),
        ..Default::default()
    };

    let mut stream = docker.logs(name_or_id, Some(options));
    let mut lines = Vec::new();
    while let Some(chunk) = stream.next().await {
        match chunk {
            Ok(LogOutput::StdOut { message }) | Ok(LogOutput::StdErr { message }) => {
                lines.push(String::from_utf8_lossy(&message).into_owned());
            }
            Ok(_) => {}
            Err(e) => {
                warn!("Log stream for '{}' ended with error: {:?}", name_or_id, e);
                return Err(translate_container_error(name_or_id, e));
            }
        }
    }
    Ok(lines)
}
