//! # Dockhand Filesystem I/O Operations
//!
//! File: lib/src/common/fs/io.rs
//!
//! ## Overview
//!
//! This module centralizes the filesystem operations the rest of the library
//! builds on: reading and writing whole files as byte buffers, listing
//! directories, ensuring directories exist, and recursive deletion. The
//! archive flattener and the copy orchestrator only ever touch the disk
//! through these wrappers.
//!
//! ## Architecture
//!
//! The module offers focused utility functions over `std::fs`:
//! - **`ensure_dir_exists`**: Creates a directory (and parents) if missing, and validates that an existing path is actually a directory.
//! - **`read_file_bytes`** / **`write_file_bytes`**: Whole-file reads and writes; writes create the parent directory first.
//! - **`list_dir`**: Immediate children of a directory, sorted by file name so directory traversal (and therefore archive output) is deterministic across platforms.
//! - **`path_exists`**: Existence probe used before building outbound archives.
//! - **`remove_path_recursively`**: Deletes a file or a whole directory tree, tolerating an already-missing path.
//!
//! Temporary staging files and directories are not created here; the copy
//! orchestrator uses the `tempfile` crate directly so deletion is tied to
//! guard lifetimes rather than explicit cleanup calls.
//!
use crate::core::error::{DockhandError, Result};
use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Ensures that a directory exists at the specified path.
///
/// If the path does not exist, this function attempts to create the directory,
/// including any necessary parent directories (similar to `mkdir -p`).
/// If the path already exists but is not a directory (e.g., it's a file),
/// an error (`DockhandError::FileSystem`) is returned.
///
/// # Errors
///
/// Returns an `Err` if:
/// - The path exists but is not a directory.
/// - Creating the directory fails (e.g., due to permissions).
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {:?}", path))?;
        debug!("Created directory: {:?}", path);
    } else if !path.is_dir() {
        anyhow::bail!(DockhandError::FileSystem(format!(
            "Path exists but is not a directory: {:?}",
            path
        )));
    }
    Ok(())
}

/// Reads the entire content of a file into a byte vector.
///
/// # Errors
///
/// Returns an `Err` if the file cannot be found, opened, or read, with
/// context indicating which file failed.
pub fn read_file_bytes(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("Failed to read file {:?}", path))
}

/// Writes a byte slice to the specified file path, overwriting if it exists.
///
/// The parent directory of `path` is created first when missing, so callers
/// can write decoded archive entries without pre-creating the tree.
///
/// # Errors
///
/// Returns an `Err` if the parent directory cannot be created or the write
/// itself fails.
pub fn write_file_bytes(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir_exists(parent)?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write to file {:?}", path))?;
    debug!("Wrote {} bytes to file: {:?}", content.len(), path);
    Ok(())
}

/// Lists the immediate children of a directory, sorted by file name.
///
/// The underlying readdir order is platform-dependent; sorting here keeps
/// directory traversal (and archives built from it) reproducible run-to-run.
///
/// # Errors
///
/// Returns an `Err` if `path` cannot be read as a directory.
pub fn list_dir(path: &Path) -> Result<Vec<PathBuf>> {
    let mut children = Vec::new();
    let read_dir =
        fs::read_dir(path).with_context(|| format!("Failed to list directory {:?}", path))?;
    for entry in read_dir {
        let entry =
            entry.with_context(|| format!("Failed to read directory entry in {:?}", path))?;
        children.push(entry.path());
    }
    children.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(children)
}

/// Returns whether a path exists on the local filesystem.
pub fn path_exists(path: &Path) -> bool {
    path.exists()
}

/// Removes a file, or a directory and all of its contents.
///
/// A path that does not exist is treated as already removed. This backs the
/// orchestrator's unconditional cleanup of staging artifacts.
///
/// # Errors
///
/// Returns an `Err` if deletion fails for an existing path.
pub fn remove_path_recursively(path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    if path.is_dir() {
        fs::remove_dir_all(path)
            .with_context(|| format!("Failed to remove directory tree {:?}", path))?;
    } else {
        fs::remove_file(path).with_context(|| format!("Failed to remove file {:?}", path))?;
    }
    debug!("Removed path: {:?}", path);
    Ok(())
}
