//! # Dockhand Client Facade (`client`)
//!
//! File: lib/src/client.rs
//!
//! ## Overview
//!
//! `DockerClient` bundles a connected `bollard::Docker` handle with the
//! configuration it was built from and surfaces every library operation as a
//! method. Construction is cheap: bollard connects lazily, so errors about
//! an unreachable daemon appear on the first call, not at build time.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dockhand::{DockerClient, CopyOptions};
//! use std::path::Path;
//!
//! # async fn run() -> dockhand::Result<()> {
//! let client = DockerClient::connect()?;
//! client
//!     .copy_file_to("my-app", Path::new("config.toml"), "/etc/app/", &CopyOptions::default())
//!     .await?;
//! let logs = client.container_logs("my-app", Some(50)).await?;
//! # Ok(())
//! # }
//! ```
//!
use crate::common::docker::{self, containers, copy, exec, networks, volumes};
use crate::core::config::ClientConfig;
use crate::core::error::Result;
use bollard::container::Config as ContainerConfig;
use bollard::models::{ContainerInspectResponse, ContainerSummary, Network, Volume};
use bollard::Docker;
use std::collections::HashMap;
use std::path::Path;

/// High-level entry point for the library.
///
/// Holds the daemon connection and the `ClientConfig` used to create it.
/// Cloning is cheap; the underlying transport is shared.
#[derive(Clone)]
pub struct DockerClient {
    docker: Docker,
    config: ClientConfig,
}

impl std::fmt::Debug for DockerClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DockerClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl DockerClient {
    /// Connects using `DOCKER_HOST` when set, platform defaults otherwise.
    pub fn connect() -> Result<Self> {
        Self::with_config(ClientConfig::from_env()?)
    }

    /// Connects with an explicit configuration.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let docker = docker::connect_docker(&config)?;
        Ok(Self { docker, config })
    }

    /// The configuration this client was built from.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Escape hatch: the underlying `bollard::Docker` handle, for endpoints
    /// the facade does not wrap.
    pub fn raw(&self) -> &Docker {
        &self.docker
    }

    // --- Containers ---

    pub async fn list_containers(
        &self,
        all: bool,
        filters: Option<HashMap<String, Vec<String>>>,
    ) -> Result<Vec<ContainerSummary>> {
        containers::list_containers(&self.docker, all, filters).await
    }

    /// Creates a container and returns its id.
    pub async fn create_container(
        &self,
        name: Option<&str>,
        config: ContainerConfig<String>,
    ) -> Result<String> {
        containers::create_container(&self.docker, name, config).await
    }

    pub async fn inspect_container(&self, name_or_id: &str) -> Result<ContainerInspectResponse> {
        containers::inspect_container(&self.docker, name_or_id).await
    }

    pub async fn container_exists(&self, name_or_id: &str) -> Result<bool> {
        containers::container_exists(&self.docker, name_or_id).await
    }

    pub async fn start_container(&self, name_or_id: &str) -> Result<()> {
        containers::start_container(&self.docker, name_or_id).await
    }

    pub async fn stop_container(&self, name_or_id: &str, timeout_secs: Option<i64>) -> Result<()> {
        containers::stop_container(&self.docker, name_or_id, timeout_secs).await
    }

    pub async fn restart_container(
        &self,
        name_or_id: &str,
        timeout_secs: Option<isize>,
    ) -> Result<()> {
        containers::restart_container(&self.docker, name_or_id, timeout_secs).await
    }

    pub async fn kill_container(&self, name_or_id: &str, signal: Option<&str>) -> Result<()> {
        containers::kill_container(&self.docker, name_or_id, signal).await
    }

    pub async fn rename_container(&self, name_or_id: &str, new_name: &str) -> Result<()> {
        containers::rename_container(&self.docker, name_or_id, new_name).await
    }

    pub async fn pause_container(&self, name_or_id: &str) -> Result<()> {
        containers::pause_container(&self.docker, name_or_id).await
    }

    pub async fn unpause_container(&self, name_or_id: &str) -> Result<()> {
        containers::unpause_container(&self.docker, name_or_id).await
    }

    pub async fn remove_container(&self, name_or_id: &str, force: bool) -> Result<()> {
        containers::remove_container(&self.docker, name_or_id, force).await
    }

    /// Waits for the container to exit and returns its status code.
    pub async fn wait_container(&self, name_or_id: &str, condition: Option<&str>) -> Result<i64> {
        containers::wait_container(&self.docker, name_or_id, condition).await
    }

    pub async fn prune_containers(
        &self,
        filters: Option<HashMap<String, Vec<String>>>,
    ) -> Result<Vec<String>> {
        containers::prune_containers(&self.docker, filters).await
    }

    pub async fn container_logs(
        &self,
        name_or_id: &str,
        tail: Option<usize>,
    ) -> Result<Vec<String>> {
        containers::container_logs(&self.docker, name_or_id, tail).await
    }

    // --- Exec ---

    /// Runs a command in a running container and collects its output.
    pub async fn run_in_container(
        &self,
        name_or_id: &str,
        cmd: &[&str],
        workdir: Option<&str>,
    ) -> Result<exec::ExecOutput> {
        exec::run_in_container(&self.docker, name_or_id, cmd, workdir).await
    }

    // --- Copy ---

    /// Uploads a raw TAR archive to a path inside the container.
    pub async fn copy_to(
        &self,
        name_or_id: &str,
        destination_path: &str,
        archive: Vec<u8>,
        options: &copy::CopyOptions,
    ) -> Result<()> {
        copy::copy_to(&self.docker, name_or_id, destination_path, archive, options).await
    }

    /// Downloads the TAR archive for a path inside the container.
    pub async fn copy_from(&self, name_or_id: &str, source_path: &str) -> Result<copy::CopyResult> {
        copy::copy_from(&self.docker, name_or_id, source_path).await
    }

    /// Copies a single local file into the container.
    pub async fn copy_file_to(
        &self,
        name_or_id: &str,
        source_path: &Path,
        destination_path: &str,
        options: &copy::CopyOptions,
    ) -> Result<()> {
        copy::copy_file_to(&self.docker, name_or_id, source_path, destination_path, options).await
    }

    /// Copies a local directory tree into the container.
    pub async fn copy_directory_to(
        &self,
        name_or_id: &str,
        source_dir: &Path,
        destination_path: &str,
        options: &copy::CopyOptions,
    ) -> Result<()> {
        copy::copy_directory_to(&self.docker, name_or_id, source_dir, destination_path, options)
            .await
    }

    /// Copies a single file out of the container into a local directory.
    pub async fn copy_file_from(
        &self,
        name_or_id: &str,
        source_path: &str,
        destination_dir: &Path,
    ) -> Result<()> {
        copy::copy_file_from(&self.docker, name_or_id, source_path, destination_dir).await
    }

    /// Copies a directory tree out of the container into a local directory.
    pub async fn copy_directory_from(
        &self,
        name_or_id: &str,
        source_path: &str,
        destination_dir: &Path,
    ) -> Result<()> {
        copy::copy_directory_from(&self.docker, name_or_id, source_path, destination_dir).await
    }

    // --- Networks ---

    pub async fn list_networks(
        &self,
        filters: Option<HashMap<String, Vec<String>>>,
    ) -> Result<Vec<Network>> {
        networks::list_networks(&self.docker, filters).await
    }

    /// Creates a network and returns its id.
    pub async fn create_network(&self, name: &str, driver: Option<&str>) -> Result<String> {
        networks::create_network(&self.docker, name, driver).await
    }

    pub async fn inspect_network(&self, name_or_id: &str) -> Result<Network> {
        networks::inspect_network(&self.docker, name_or_id).await
    }

    pub async fn remove_network(&self, name_or_id: &str) -> Result<()> {
        networks::remove_network(&self.docker, name_or_id).await
    }

    pub async fn connect_network(&self, name_or_id: &str, container: &str) -> Result<()> {
        networks::connect_network(&self.docker, name_or_id, container).await
    }

    pub async fn disconnect_network(
        &self,
        name_or_id: &str,
        container: &str,
        force: bool,
    ) -> Result<()> {
        networks::disconnect_network(&self.docker, name_or_id, container, force).await
    }

    pub async fn prune_networks(&self) -> Result<Vec<String>> {
        networks::prune_networks(&self.docker).await
    }

    // --- Volumes ---

    pub async fn list_volumes(
        &self,
        filters: Option<HashMap<String, Vec<String>>>,
    ) -> Result<Vec<Volume>> {
        volumes::list_volumes(&self.docker, filters).await
    }

    pub async fn create_volume(&self, name: &str, driver: Option<&str>) -> Result<Volume> {
        volumes::create_volume(&self.docker, name, driver).await
    }

    pub async fn inspect_volume(&self, name: &str) -> Result<Volume> {
        volumes::inspect_volume(&self.docker, name).await
    }

    pub async fn remove_volume(&self, name: &str, force: bool) -> Result<()> {
        volumes::remove_volume(&self.docker, name, force).await
    }

    pub async fn prune_volumes(&self) -> Result<Vec<String>> {
        volumes::prune_volumes(&self.docker).await
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ConnectionTarget;

    /// Construction succeeds without a reachable daemon; bollard connects
    /// lazily on first use.
    #[test]
    fn test_with_config_is_lazy() -> Result<()> {
        let config = ClientConfig::unix("/nonexistent/docker.sock");
        let client = DockerClient::with_config(config)?;
        assert!(matches!(
            client.config().target,
            ConnectionTarget::UnixSocket(_)
        ));
        Ok(())
    }

    #[test]
    fn test_raw_handle_is_shared_on_clone() -> Result<()> {
        let client = DockerClient::with_config(ClientConfig::default())?;
        let cloned = client.clone();
        assert_eq!(
            client.config().timeout_secs,
            cloned.config().timeout_secs
        );
        Ok(())
    }
}
