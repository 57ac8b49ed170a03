//! # Dockhand Volume Resource (`common::docker::volumes`)
//!
//! File: lib/src/common/docker/volumes.rs
//!
//! Thin wrappers over the Engine's volume endpoints. A 404 on a
//! volume-scoped call becomes `DockhandError::VolumeNotFound`; other
//! failures propagate unchanged as `DockhandError::DockerApi`.
//!
use crate::core::error::{DockhandError, Result};
use anyhow::{anyhow, Context};
use bollard::{
    models::Volume,
    volume::{CreateVolumeOptions, ListVolumesOptions, RemoveVolumeOptions},
    Docker,
};
use std::collections::HashMap;
use tracing::{info, instrument};

fn translate_volume_error(name: &str, error: bollard::errors::Error) -> anyhow::Error {
    match error {
        bollard::errors::Error::DockerResponseServerError {
            status_code: 404, ..
        } => anyhow!(DockhandError::VolumeNotFound {
            name: name.to_string(),
        }),
        other => anyhow!(DockhandError::DockerApi { source: other }),
    }
}

/// Lists volumes, optionally filtered.
#[instrument(skip(docker, filters))]
pub async fn list_volumes(
    docker: &Docker,
    filters: Option<HashMap<String, Vec<String>>>,
) -> Result<Vec<Volume>> {
    let options = filters.map(|f| ListVolumesOptions { filters: f });
    let response = docker
        .list_volumes(options)
        .await
        .map_err(|e| anyhow!(DockhandError::DockerApi { source: e }))
        .context("Failed to list volumes")?;
    Ok(response.volumes.unwrap_or_default())
}

/// Creates a named volume (driver defaults to `local`).
#[instrument(skip(docker))]
pub async fn create_volume(docker: &Docker, name: &str, driver: Option<&str>) -> Result<Volume> {
    let options = CreateVolumeOptions {
        name: name.to_string(),
        driver: driver.unwrap_or("local").to_string(),
        ..Default::default()
    };
    let volume = docker
        .create_volume(options)
        .await
        .map_err(|e| anyhow!(DockhandError::DockerApi { source: e }))
        .context(format!("Failed to create volume '{name}'"))?;
    info!("Created volume '{}'", name);
    Ok(volume)
}

/// Returns low-level information about a volume.
#[instrument(skip(docker))]
pub async fn inspect_volume(docker: &Docker, name: &str) -> Result<Volume> {
    docker
        .inspect_volume(name)
        .await
        .map_err(|e| translate_volume_error(name, e))
}

/// Removes a volume, optionally by force.
#[instrument(skip(docker))]
pub async fn remove_volume(docker: &Docker, name: &str, force: bool) -> Result<()> {
    docker
        .remove_volume(name, Some(RemoveVolumeOptions { force }))
        .await
        .map_err(|e| translate_volume_error(name, e))?;
    info!("Removed volume '{}' (force={})", name, force);
    Ok(())
}

/// Deletes unused volumes; returns the names that were removed.
#[instrument(skip(docker))]
pub async fn prune_volumes(docker: &Docker) -> Result<Vec<String>> {
    let response = docker
        .prune_volumes(None::<bollard::volume::PruneVolumesOptions<String>>)
        .await
        .map_err(|e| anyhow!(DockhandError::DockerApi { source: e }))
        .context("Failed to prune volumes")?;
    Ok(response.volumes_deleted.unwrap_or_default())
}
