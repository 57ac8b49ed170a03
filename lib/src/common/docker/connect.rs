//! # Dockhand Docker Connection Helper
//!
//! File: lib/src/common/docker/connect.rs
//!
//! ## Overview
//!
//! This internal utility module provides a single, standardized function,
//! `connect_docker`, responsible for turning a [`ClientConfig`] into a
//! `bollard::Docker` handle. It centralizes connection logic and error
//! handling for use by the rest of `common::docker`.
//!
//! ## Architecture
//!
//! - `ConnectionTarget::LocalDefaults` maps to `Docker::connect_with_local_defaults()`.
//! - `ConnectionTarget::UnixSocket` maps to `Docker::connect_with_unix()` with the configured timeout.
//! - `ConnectionTarget::Http` maps to `Docker::connect_with_http()` with the configured timeout.
//!
//! bollard's constructors validate configuration but do not open the socket;
//! actual I/O happens lazily per request. Connection failures are therefore
//! surfaced either here (bad configuration) or on the first API call.
//!
use crate::core::config::{ClientConfig, ConnectionTarget};
use crate::core::error::{DockhandError, Result};
use anyhow::{anyhow, Context};
use bollard::{Docker, API_DEFAULT_VERSION};
use tracing::debug;

/// Builds a `bollard::Docker` handle for the configured daemon endpoint.
///
/// # Errors
///
/// Returns an `Err` wrapping `DockhandError::DockerApi` if the client cannot
/// be constructed from the configuration (e.g. an unusable endpoint string).
pub fn connect_docker(config: &ClientConfig) -> Result<Docker> {
    let connection = match &config.target {
        ConnectionTarget::LocalDefaults => {
            debug!("Connecting to Docker daemon via platform defaults");
            Docker::connect_with_local_defaults()
        }
        ConnectionTarget::UnixSocket(path) => {
            debug!("Connecting to Docker daemon via unix socket {}", path);
            Docker::connect_with_unix(path, config.timeout_secs, API_DEFAULT_VERSION)
        }
        ConnectionTarget::Http(address) => {
            debug!("Connecting to Docker daemon via TCP at {}", address);
            Docker::connect_with_http(address, config.timeout_secs, API_DEFAULT_VERSION)
        }
    };

    connection
        .map_err(|e| anyhow!(DockhandError::DockerApi { source: e }))
        .context("Failed to configure Docker daemon connection. Is the endpoint valid?")
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    /// Constructing a client for the platform default endpoint never needs a
    /// running daemon; bollard connects lazily.
    #[test]
    fn test_connect_local_defaults_is_lazy() {
        let result = connect_docker(&ClientConfig::default());
        assert!(result.is_ok());
    }

    /// A unix socket target builds a client regardless of socket existence.
    #[test]
    fn test_connect_unix_socket_config() {
        let result = connect_docker(&ClientConfig::unix("/tmp/definitely-missing.sock"));
        assert!(result.is_ok());
    }
}
