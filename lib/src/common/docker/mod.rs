//! # Dockhand Docker Module Interface
//!
//! File: lib/src/common/docker/mod.rs
//!
//! ## Overview
//!
//! Central interface for talking to the Docker Engine. Functionality is
//! organized into resource-scoped submodules, each a thin layer over the
//! `bollard` crate that adds the library's error taxonomy and logging.
//!
//! ## Architecture
//!
//! - **`connect`**: Builds the `bollard::Docker` handle from a `ClientConfig`.
//! - **`containers`**: Container lifecycle (create, start, stop, restart, kill, pause, rename, remove, wait, prune) plus listing, inspection, and logs.
//! - **`copy`**: Archive transfer between the local filesystem and containers, built on the in-house TAR codec and tree flattener.
//! - **`exec`**: Runs commands in running containers and collects output.
//! - **`networks`**: Network CRUD plus container connect/disconnect.
//! - **`volumes`**: Volume CRUD and pruning.
//!
//! The [`crate::client::DockerClient`] facade re-surfaces these functions as
//! methods; the free functions remain public for callers that manage their
//! own `Docker` handle.
//!
/// Establishes the connection to the Docker daemon.
pub mod connect;
/// Container lifecycle, inspection, and log retrieval.
pub mod containers;
/// File and directory copy between host and container.
pub mod copy;
/// Command execution inside running containers.
pub mod exec;
/// Network management and container attachment.
pub mod networks;
/// Volume management.
pub mod volumes;

// --- Re-exports for easier access from other parts of the library ---

pub use connect::connect_docker;
pub use copy::{decode_archive_stat, ArchiveStat, CopyOptions, CopyResult};
pub use exec::ExecOutput;
