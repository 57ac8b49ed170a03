//! # Dockhand Error Types
//!
//! File: lib/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types and error handling mechanisms used
//! throughout the dockhand library. It provides a consistent approach to
//! error management with named error kinds and context propagation.
//!
//! ## Architecture
//!
//! The error system consists of two main components:
//! - `DockhandError`: A custom error enum using `thiserror` for specific error types
//! - `Result<T>`: A type alias for `anyhow::Result<T>` for flexible error handling
//!
//! The error kinds cover the library's domains:
//! - Client configuration errors
//! - Local filesystem errors
//! - Docker API interaction errors (wrapping `bollard::errors::Error`)
//! - Resource-not-found conditions (container, archive path, network, volume)
//!
//! Resource-not-found kinds carry the identifying key (container reference or
//! path) so callers can match on them without string inspection. Any other
//! transport failure is propagated unchanged inside `DockerApi`, never
//! reinterpreted, and the library performs no retries anywhere.
//!
//! ## Examples
//!
//! ```rust,ignore
//! // Pattern matching on error kinds
//! match result {
//!     Ok(value) => println!("Success: {:?}", value),
//!     Err(e) if e.downcast_ref::<DockhandError>().map_or(false, |de| matches!(de, DockhandError::ContainerNotFound { .. })) => {
//!         println!("Container not found, creating...");
//!     },
//!     Err(e) => return Err(e),
//! }
//! ```
//!
use thiserror::Error;

/// Custom error type for the dockhand library.
// No PartialEq derive because the bollard source field doesn't implement it.
#[derive(Error, Debug)]
pub enum DockhandError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Filesystem error: {0}")]
    FileSystem(String),

    #[error("Docker API interaction failed: {source}")]
    DockerApi {
        #[from]
        source: bollard::errors::Error,
    },

    #[error("Docker operation failed: {0}")]
    DockerOperation(String),

    #[error("Container '{name}' not found.")]
    ContainerNotFound { name: String },

    #[error("Image '{name}' not found.")]
    ImageNotFound { name: String },

    #[error("Archive path '{path}' not found.")]
    ArchiveNotFound { path: String },

    #[error("Network '{name}' not found.")]
    NetworkNotFound { name: String },

    #[error("Volume '{name}' not found.")]
    VolumeNotFound { name: String },

    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

/// Type alias for Result using anyhow::Error for broad compatibility.
/// Anyhow allows for easy context addition and flexible error handling.
pub type Result<T> = anyhow::Result<T>;
