//! # Dockhand Filesystem Utilities (`common::fs`)
//!
//! File: lib/src/common/fs/mod.rs
//!
//! ## Overview
//!
//! Organizational unit for local filesystem access. Everything the archive
//! flattener and the copy orchestrator do on disk goes through the `io`
//! submodule, which keeps error context consistent and makes the disk
//! boundary easy to see when reading the higher layers.
//!
//! ## Architecture
//!
//! - **`io`**: Whole-file reads/writes, directory listing (sorted), directory creation, and recursive deletion.
//!
//! Temporary staging artifacts are managed with the `tempfile` crate at the
//! call sites that need them, so cleanup is bound to guard lifetimes.
//!

/// Basic file I/O operations (e.g., `ensure_dir_exists`, `read_file_bytes`, `list_dir`).
pub mod io;
