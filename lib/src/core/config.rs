//! # Dockhand Client Configuration
//!
//! File: lib/src/core/config.rs
//!
//! ## Overview
//!
//! This module defines how a `DockerClient` decides where the Docker daemon
//! lives. The library does not read configuration files; a client is either
//! configured programmatically, from the `DOCKER_HOST` environment variable,
//! or falls back to the platform's default local socket.
//!
//! ## Architecture
//!
//! Connection targets (in order of precedence):
//! 1. An explicit `ClientConfig` passed to `DockerClient::with_config`
//! 2. The `DOCKER_HOST` environment variable (`unix://` or `tcp://`/`http://`)
//! 3. bollard's platform defaults (`/var/run/docker.sock` on Unix)
//!
//! Socket paths are tilde-expanded, so `unix://~/.docker/run/docker.sock`
//! (Docker Desktop's per-user socket) works as-is.
//!
//! ## Examples
//!
//! ```rust
//! use dockhand::core::config::ClientConfig;
//!
//! // Explicit socket
//! let explicit = ClientConfig::unix("/run/user/1000/docker.sock");
//!
//! // Environment-driven (DOCKER_HOST respected, local defaults otherwise)
//! let from_env = ClientConfig::from_env()?;
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
use crate::core::error::{DockhandError, Result};
use anyhow::anyhow;
use std::env;
use tracing::debug;

/// Default request timeout, in seconds, for Docker API calls.
///
/// Matches bollard's own default so that a plain `ClientConfig::default()`
/// behaves identically to `Docker::connect_with_local_defaults()`.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Where to reach the Docker daemon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionTarget {
    /// Use bollard's platform defaults (standard local socket / named pipe).
    LocalDefaults,
    /// A Unix domain socket at the given filesystem path (already expanded).
    UnixSocket(String),
    /// A TCP endpoint, e.g. `tcp://127.0.0.1:2375`.
    Http(String),
}

/// Connection settings for a `DockerClient`.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// The daemon endpoint to connect to.
    pub target: ConnectionTarget,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            target: ConnectionTarget::LocalDefaults,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    /// Configuration for a Unix socket at `path`. The path may start with `~`,
    /// which is expanded to the user's home directory.
    pub fn unix(path: &str) -> Self {
        Self {
            target: ConnectionTarget::UnixSocket(shellexpand::tilde(path).into_owned()),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Configuration for a TCP endpoint, e.g. `tcp://127.0.0.1:2375`.
    pub fn http(address: &str) -> Self {
        Self {
            target: ConnectionTarget::Http(address.to_string()),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Builds a configuration from the `DOCKER_HOST` environment variable,
    /// falling back to platform defaults when it is unset or empty.
    ///
    /// # Errors
    ///
    /// Returns `DockhandError::Config` if `DOCKER_HOST` is set but uses a
    /// scheme other than `unix://`, `tcp://`, or `http://`.
    pub fn from_env() -> Result<Self> {
        match env::var("DOCKER_HOST") {
            Ok(host) if !host.trim().is_empty() => Self::from_host_string(host.trim()),
            _ => {
                debug!("DOCKER_HOST not set; using platform default socket");
                Ok(Self::default())
            }
        }
    }

    /// Parses a `DOCKER_HOST`-style endpoint string.
    fn from_host_string(host: &str) -> Result<Self> {
        if let Some(path) = host.strip_prefix("unix://") {
            if path.is_empty() {
                return Err(anyhow!(DockhandError::Config(format!(
                    "DOCKER_HOST '{host}' has an empty socket path"
                ))));
            }
            debug!("Using unix socket from DOCKER_HOST: {}", path);
            Ok(Self::unix(path))
        } else if host.starts_with("tcp://") || host.starts_with("http://") {
            debug!("Using TCP endpoint from DOCKER_HOST: {}", host);
            Ok(Self::http(host))
        } else {
            Err(anyhow!(DockhandError::Config(format!(
                "Unsupported DOCKER_HOST scheme in '{host}' (expected unix://, tcp:// or http://)"
            ))))
        }
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_targets_local_socket() {
        let cfg = ClientConfig::default();
        assert_eq!(cfg.target, ConnectionTarget::LocalDefaults);
        assert_eq!(cfg.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_unix_host_string() -> Result<()> {
        let cfg = ClientConfig::from_host_string("unix:///run/docker.sock")?;
        assert_eq!(
            cfg.target,
            ConnectionTarget::UnixSocket("/run/docker.sock".into())
        );
        Ok(())
    }

    #[test]
    fn test_tcp_host_string() -> Result<()> {
        let cfg = ClientConfig::from_host_string("tcp://127.0.0.1:2375")?;
        assert_eq!(cfg.target, ConnectionTarget::Http("tcp://127.0.0.1:2375".into()));
        Ok(())
    }

    #[test]
    fn test_tilde_expansion_in_unix_path() {
        let cfg = ClientConfig::unix("~/.docker/run/docker.sock");
        match cfg.target {
            ConnectionTarget::UnixSocket(path) => assert!(!path.starts_with('~')),
            other => panic!("expected unix socket target, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_unknown_scheme() {
        let result = ClientConfig::from_host_string("ssh://example.com");
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Unsupported DOCKER_HOST scheme"));
    }

    #[test]
    fn test_rejects_empty_unix_path() {
        assert!(ClientConfig::from_host_string("unix://").is_err());
    }
}
