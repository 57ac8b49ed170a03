//! # Dockhand Common Utilities (`common`)
//!
//! File: lib/src/common/mod.rs
//!
//! ## Overview
//!
//! Root for the library's shared utility modules: archive handling, Docker
//! Engine access, and filesystem helpers. Keeping these under `common::`
//! separates reusable infrastructure from the public facade (`client`) and
//! the core plumbing (`core`).
//!
//! ## Architecture
//!
//! - **`archive`**: The POSIX ustar TAR codec and the directory-tree flattener that feeds it.
//! - **`docker`**: Resource-scoped wrappers over the `bollard` crate (containers, copy, exec, networks, volumes).
//! - **`fs`**: Foundational filesystem operations shared by the archive and copy layers.
//!
/// TAR encoding/decoding and directory flattening.
pub mod archive;
/// Docker Engine interaction via `bollard`.
pub mod docker;
/// Filesystem operations (read, write, list, remove).
pub mod fs;
