//! # Dockhand Network Resource (`common::docker::networks`)
//!
//! File: lib/src/common/docker/networks.rs
//!
//! Thin wrappers over the Engine's network endpoints. A 404 on a
//! network-scoped call becomes `DockhandError::NetworkNotFound`; other
//! failures propagate unchanged as `DockhandError::DockerApi`.
//!
use crate::core::error::{DockhandError, Result};
use anyhow::{anyhow, Context};
use bollard::{
    models::Network,
    network::{
        ConnectNetworkOptions, CreateNetworkOptions, DisconnectNetworkOptions,
        InspectNetworkOptions, ListNetworksOptions,
    },
    Docker,
};
use std::collections::HashMap;
use tracing::{info, instrument};

fn translate_network_error(name_or_id: &str, error: bollard::errors::Error) -> anyhow::Error {
    match error {
        bollard::errors::Error::DockerResponseServerError {
            status_code: 404, ..
        } => anyhow!(DockhandError::NetworkNotFound {
            name: name_or_id.to_string(),
        }),
        other => anyhow!(DockhandError::DockerApi { source: other }),
    }
}

/// Lists networks, optionally filtered.
#[instrument(skip(docker, filters))]
pub async fn list_networks(
    docker: &Docker,
    filters: Option<HashMap<String, Vec<String>>>,
) -> Result<Vec<Network>> {
    let options = filters.map(|f| ListNetworksOptions { filters: f });
    docker
        .list_networks(options)
        .await
        .map_err(|e| anyhow!(DockhandError::DockerApi { source: e }))
        .context("Failed to list networks")
}

/// Creates a network with the given driver (daemon default when `None`) and
/// returns its id.
#[instrument(skip(docker))]
pub async fn create_network(docker: &Docker, name: &str, driver: Option<&str>) -> Result<String> {
    let options = CreateNetworkOptions {
        name: name.to_string(),
        driver: driver.unwrap_or("").to_string(),
        ..Default::default()
    };
    let response = docker
        .create_network(options)
        .await
        .map_err(|e| anyhow!(DockhandError::DockerApi { source: e }))
        .context(format!("Failed to create network '{name}'"))?;
    info!("Created network '{}'", name);
    Ok(response.id)
}

/// Returns low-level information about a network.
#[instrument(skip(docker))]
pub async fn inspect_network(docker: &Docker, name_or_id: &str) -> Result<Network> {
    docker
        .inspect_network(name_or_id, None::<InspectNetworkOptions<String>>)
        .await
        .map_err(|e| translate_network_error(name_or_id, e))
}

/// Removes a network.
#[instrument(skip(docker))]
pub async fn remove_network(docker: &Docker, name_or_id: &str) -> Result<()> {
    docker
        .remove_network(name_or_id)
        .await
        .map_err(|e| translate_network_error(name_or_id, e))?;
    info!("Removed network '{}'", name_or_id);
    Ok(())
}

/// Connects a container to a network.
#[instrument(skip(docker))]
pub async fn connect_network(docker: &Docker, name_or_id: &str, container: &str) -> Result<()> {
    let options = ConnectNetworkOptions {
        container: container.to_string(),
        ..Default::default()
    };
    docker
        .connect_network(name_or_id, options)
        .await
        .map_err(|e| translate_network_error(name_or_id, e))
}

/// Disconnects a container from a network, optionally by force.
#[instrument(skip(docker))]
pub async fn disconnect_network(
    docker: &Docker,
    name_or_id: &str,
    container: &str,
    force: bool,
) -> Result<()> {
    let options = DisconnectNetworkOptions {
        container: container.to_string(),
        force,
    };
    docker
        .disconnect_network(name_or_id, options)
        .await
        .map_err(|e| translate_network_error(name_or_id, e))
}

/// Deletes unused networks; returns the names that were removed.
#[instrument(skip(docker))]
pub async fn prune_networks(docker: &Docker) -> Result<Vec<String>> {
    let response = docker
        .prune_networks(None::<bollard::network::PruneNetworksOptions<String>>)
        .await
        .map_err(|e| anyhow!(DockhandError::DockerApi { source: e }))
        .context("Failed to prune networks")?;
    Ok(response.networks_deleted.unwrap_or_default())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_404_to_network_not_found() {
        let err = translate_network_error(
            "ghost-net",
            bollard::errors::Error::DockerResponseServerError {
                status_code: 404,
                message: "network ghost-net not found".into(),
            },
        );
        assert!(matches!(
            err.downcast_ref::<DockhandError>(),
            Some(DockhandError::NetworkNotFound { name }) if name == "ghost-net"
        ));
    }
}
