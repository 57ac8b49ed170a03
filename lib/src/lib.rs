//! # Dockhand: a Docker Engine client with an in-house archive codec
//!
//! File: lib/src/lib.rs
//!
//! ## Overview
//!
//! Dockhand is a client library for the Docker Engine API, built on
//! `bollard` for transport and carrying its own POSIX ustar TAR codec for
//! the archive endpoints. The headline feature is file and directory copy
//! between the host and containers: local trees are flattened into archive
//! entries, encoded block-by-block, and shipped through
//! `PUT /containers/{id}/archive`; downloads run the same pipeline in
//! reverse, staging through scoped temporary directories.
//!
//! Alongside copy, the library wraps the container lifecycle, exec,
//! network, and volume endpoints with a uniform error taxonomy
//! ([`DockhandError`]) and `tracing` instrumentation.
//!
//! ## Architecture
//!
//! - **`client`**: The [`DockerClient`] facade; one method per operation.
//! - **`common::archive`**: The TAR codec ([`TarEntry`], `create_archive`,
//!   `extract_archive`) and the tree flattener.
//! - **`common::docker`**: Resource-scoped wrappers over `bollard`
//!   (containers, copy, exec, networks, volumes) plus connection setup.
//! - **`common::fs`**: Filesystem helpers shared by the archive and copy
//!   layers.
//! - **`core`**: Connection configuration ([`ClientConfig`]) and the error
//!   taxonomy ([`DockhandError`], [`Result`]).
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dockhand::{CopyOptions, DockerClient};
//! use std::path::Path;
//!
//! # async fn run() -> dockhand::Result<()> {
//! let client = DockerClient::connect()?;
//! client
//!     .copy_file_to("my-app", Path::new("notes.txt"), "/tmp/", &CopyOptions::default())
//!     .await?;
//! client
//!     .copy_file_from("my-app", "/tmp/notes.txt", Path::new("./out"))
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
/// The `DockerClient` facade.
pub mod client;
/// Shared utilities: archive codec, Docker wrappers, filesystem helpers.
pub mod common;
/// Core infrastructure: configuration and errors.
pub mod core;

pub use client::DockerClient;
pub use common::archive::flatten::{SystemClock, TimeSource};
pub use common::archive::tar::TarEntry;
pub use common::docker::copy::{decode_archive_stat, ArchiveStat, CopyOptions, CopyResult};
pub use common::docker::exec::ExecOutput;
pub use crate::core::config::{ClientConfig, ConnectionTarget};
pub use crate::core::error::{DockhandError, Result};
