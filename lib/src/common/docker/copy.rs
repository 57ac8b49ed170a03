//! # Dockhand Copy Orchestrator (`common::docker::copy`)
//!
//! File: lib/src/common/docker/copy.rs
//!
//! ## Overview
//!
//! Implements file and directory copy between the local filesystem and a
//! container, layered on the TAR codec (`common::archive::tar`), the tree
//! flattener (`common::archive::flatten`), and the Engine's archive
//! endpoints (`PUT`/`GET /containers/{id}/archive`, reached through
//! bollard's `upload_to_container` / `download_from_container`).
//!
//! ## Architecture
//!
//! Two archive-level primitives carry all the bytes:
//! - **`copy_to`**: uploads a ready-made TAR archive to a destination path
//!   inside the container.
//! - **`copy_from`**: downloads the TAR archive the engine builds for a
//!   container path.
//!
//! Four convenience wrappers drive them:
//! - **`copy_file_to`**: single local file → single-entry archive → upload.
//! - **`copy_directory_to`**: flatten local tree (pre-order) → archive → upload.
//! - **`copy_file_from`**: download → decode → write the one file entry under the local destination, named by its base name.
//! - **`copy_directory_from`**: download → decode → unpack into a scoped temp staging directory → merge into the local destination. The `tempfile::TempDir` guard deletes staging on every exit path, including decode or merge failures.
//!
//! Error translation follows the endpoint contract: 404 mentioning the
//! container → `ContainerNotFound`; other 404s on a download →
//! `ArchiveNotFound` (remote path missing); 400 → `InvalidPath`; a missing
//! local source file → `ArchiveNotFound`. Everything else propagates
//! unchanged; nothing is retried.
//!
use crate::common::archive::flatten::{self, SystemClock, TimeSource};
use crate::common::archive::tar::{self, TarEntry};
use crate::common::fs;
use crate::core::error::{DockhandError, Result};
use anyhow::{anyhow, Context};
use base64::Engine as _;
use bollard::container::{DownloadFromContainerOptions, UploadToContainerOptions};
use bollard::Docker;
use chrono::{DateTime, Utc};
use futures_util::StreamExt;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Options for copy-to-container operations, mirroring the archive
/// endpoint's query parameters.
#[derive(Debug, Clone)]
pub struct CopyOptions {
    /// Extract the uploaded archive at the destination. The Engine's archive
    /// endpoint always extracts; the flag is carried for API completeness.
    pub extract_archive: bool,
    /// If true, fail rather than overwrite a directory with a non-directory
    /// (and vice versa) at the destination.
    pub no_overwrite_dir_non_dir: bool,
    /// If true, apply uid/gid maps from the archive to the copied files.
    pub copy_uidgid: bool,
}

impl Default for CopyOptions {
    fn default() -> Self {
        Self {
            extract_archive: true,
            no_overwrite_dir_non_dir: false,
            copy_uidgid: false,
        }
    }
}

/// Stat metadata for a container path, as reported by the engine alongside a
/// downloaded archive (`X-Docker-Container-Path-Stat`).
#[derive(Debug, Clone, Deserialize)]
pub struct ArchiveStat {
    pub name: String,
    pub size: i64,
    pub mode: i64,
    /// Modification time as an RFC 3339 string; see [`ArchiveStat::modified_at`].
    pub mtime: String,
    #[serde(rename = "linkTarget", default)]
    pub link_target: String,
}

impl ArchiveStat {
    /// Parses the `mtime` field into a UTC timestamp.
    pub fn modified_at(&self) -> Result<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.mtime)
            .map(|dt| dt.with_timezone(&Utc))
            .with_context(|| format!("Failed to parse archive mtime '{}'", self.mtime))
    }
}

/// Decodes the engine's base64-encoded JSON path-stat header value.
///
/// bollard's download stream does not expose response headers, so
/// [`copy_from`] returns `stat: None`; callers driving the endpoint through
/// a raw transport can decode the header themselves with this helper.
pub fn decode_archive_stat(header_value: &str) -> Result<ArchiveStat> {
    let raw = base64::engine::general_purpose::STANDARD
        .decode(header_value.trim())
        .context("Failed to base64-decode archive path stat header")?;
    serde_json::from_slice(&raw).context("Failed to parse archive path stat JSON")
}

/// Result of an archive-level download: the raw TAR bytes plus path stat
/// metadata when the transport exposes it.
#[derive(Debug, Clone)]
pub struct CopyResult {
    pub archive: Vec<u8>,
    pub stat: Option<ArchiveStat>,
}

/// Maps an upload failure to the library taxonomy. The PUT endpoint reports
/// a missing container as 404 and an unusable destination path as 400.
fn translate_upload_error(
    name_or_id: &str,
    destination: &str,
    error: bollard::errors::Error,
) -> anyhow::Error {
    match error {
        bollard::errors::Error::DockerResponseServerError {
            status_code: 404, ..
        } => anyhow!(DockhandError::ContainerNotFound {
            name: name_or_id.to_string(),
        }),
        bollard::errors::Error::DockerResponseServerError {
            status_code: 400,
            message,
        } => anyhow!(DockhandError::InvalidPath(format!(
            "{destination}: {message}"
        ))),
        other => anyhow!(DockhandError::DockerApi { source: other }),
    }
}

/// Maps a download failure. The GET endpoint reports both a missing
/// container and a missing path as 404, distinguished by the message.
fn translate_download_error(
    name_or_id: &str,
    source_path: &str,
    error: bollard::errors::Error,
) -> anyhow::Error {
    match error {
        bollard::errors::Error::DockerResponseServerError {
            status_code: 404,
            message,
        } => {
            if message.contains("No such container") {
                anyhow!(DockhandError::ContainerNotFound {
                    name: name_or_id.to_string(),
                })
            } else {
                anyhow!(DockhandError::ArchiveNotFound {
                    path: source_path.to_string(),
                })
            }
        }
        bollard::errors::Error::DockerResponseServerError {
            status_code: 400,
            message,
        } => anyhow!(DockhandError::InvalidPath(format!(
            "{source_path}: {message}"
        ))),
        other => anyhow!(DockhandError::DockerApi { source: other }),
    }
}

/// Uploads a TAR archive to `destination_path` inside a container.
///
/// This is the archive-level primitive: callers manage the archive bytes
/// themselves. The convenience wrappers below build archives from local
/// paths.
///
/// # Errors
///
/// * `DockhandError::ContainerNotFound` - If the container does not exist.
/// * `DockhandError::InvalidPath` - If the engine rejects the destination path.
#[instrument(skip(docker, archive), fields(container = %name_or_id, bytes = archive.len()))]
pub async fn copy_to(
    docker: &Docker,
    name_or_id: &str,
    destination_path: &str,
    archive: Vec<u8>,
    options: &CopyOptions,
) -> Result<()> {
    // TODO: forward copy_uidgid once bollard's UploadToContainerOptions
    // exposes the copyUIDGID query parameter.
    let upload_options = UploadToContainerOptions {
        path: destination_path.to_string(),
        no_overwrite_dir_non_dir: options.no_overwrite_dir_non_dir.to_string(),
    };

    docker
        .upload_to_container(
            name_or_id,
            Some(upload_options),
            bollard::body_full(bytes::Bytes::from(archive)),
        )
        .await
        .map_err(|e| translate_upload_error(name_or_id, destination_path, e))?;

    info!(
        "Uploaded archive to '{}' in container '{}'",
        destination_path, name_or_id
    );
    Ok(())
}

/// Downloads the TAR archive the engine builds for `source_path` inside a
/// container.
///
/// # Errors
///
/// * `DockhandError::ContainerNotFound` - If the container does not exist.
/// * `DockhandError::ArchiveNotFound` - If the path does not exist in the container.
#[instrument(skip(docker), fields(container = %name_or_id))]
pub async fn copy_from(docker: &Docker, name_or_id: &str, source_path: &str) -> Result<CopyResult> {
    let options = DownloadFromContainerOptions {
        path: source_path.to_string(),
    };

    let mut stream = docker.download_from_container(name_or_id, Some(options));
    let mut archive = Vec::new();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| translate_download_error(name_or_id, source_path, e))?;
        archive.extend_from_slice(&chunk);
    }

    debug!(
        "Downloaded {} archive bytes for '{}' from container '{}'",
        archive.len(),
        source_path,
        name_or_id
    );
    // bollard does not surface the X-Docker-Container-Path-Stat header; see
    // `decode_archive_stat` for callers with raw transport access.
    Ok(CopyResult {
        archive,
        stat: None,
    })
}

/// Copies a single local file into a container.
///
/// The file becomes a one-entry archive named by its base name, with mode
/// 644 and the current time as mtime, extracted at `destination_path`.
///
/// # Errors
///
/// * `DockhandError::ArchiveNotFound` - If the local file does not exist.
/// * `DockhandError::ContainerNotFound` - If the container does not exist.
#[instrument(skip(docker, options), fields(container = %name_or_id))]
pub async fn copy_file_to(
    docker: &Docker,
    name_or_id: &str,
    source_path: &Path,
    destination_path: &str,
    options: &CopyOptions,
) -> Result<()> {
    if !fs::io::path_exists(source_path) {
        return Err(anyhow!(DockhandError::ArchiveNotFound {
            path: source_path.display().to_string(),
        }));
    }

    let file_name = source_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| {
            anyhow!(DockhandError::InvalidPath(format!(
                "{} has no file name",
                source_path.display()
            )))
        })?;

    let data = fs::io::read_file_bytes(source_path)?;
    let entry = TarEntry::file(&file_name, 644, SystemClock.now_secs(), data);
    let archive = tar::create_archive(&[entry]);

    copy_to(docker, name_or_id, destination_path, archive, options).await
}

/// Copies a local directory tree into a container.
///
/// The tree is flattened in pre-order (directories before their contents)
/// and uploaded as a single archive extracted at `destination_path`.
///
/// # Errors
///
/// * `DockhandError::FileSystem` - If the local path is not a directory.
/// * `DockhandError::ContainerNotFound` - If the container does not exist.
#[instrument(skip(docker, options), fields(container = %name_or_id))]
pub async fn copy_directory_to(
    docker: &Docker,
    name_or_id: &str,
    source_dir: &Path,
    destination_path: &str,
    options: &CopyOptions,
) -> Result<()> {
    if !source_dir.is_dir() {
        return Err(anyhow!(DockhandError::FileSystem(format!(
            "Source directory not found: {}",
            source_dir.display()
        ))));
    }

    let entries = flatten::collect_entries(source_dir, "", &SystemClock)?;
    let archive = tar::create_archive(&entries);

    copy_to(docker, name_or_id, destination_path, archive, options).await
}

/// Copies a single file out of a container.
///
/// The engine strips the directory component, so the downloaded archive
/// holds one entry named by the file's base name; its payload is written to
/// `destination_dir` joined with that base name, creating parents as needed.
///
/// # Errors
///
/// * `DockhandError::ContainerNotFound` / `DockhandError::ArchiveNotFound` - From the download.
/// * `DockhandError::DockerOperation` - If the archive does not hold a file entry.
#[instrument(skip(docker), fields(container = %name_or_id))]
pub async fn copy_file_from(
    docker: &Docker,
    name_or_id: &str,
    source_path: &str,
    destination_dir: &Path,
) -> Result<()> {
    let result = copy_from(docker, name_or_id, source_path).await?;
    let entries = tar::extract_archive(&result.archive);

    let entry = entries.iter().find(|e| !e.is_directory).ok_or_else(|| {
        anyhow!(DockhandError::DockerOperation(format!(
            "Archive for '{source_path}' contained no file entry"
        )))
    })?;

    let base_name = entry
        .name
        .rsplit('/')
        .find(|segment| !segment.is_empty())
        .unwrap_or(&entry.name);
    let target = destination_dir.join(base_name);

    let payload = entry.data.as_deref().unwrap_or_default();
    fs::io::write_file_bytes(&target, payload)?;

    info!(
        "Copied '{}' from container '{}' to {:?}",
        source_path, name_or_id, target
    );
    Ok(())
}

/// Copies a directory tree out of a container.
///
/// The engine prefixes every entry with the last path segment of
/// `source_path`; that structure is preserved under `destination_dir`. The
/// decoded entries are first unpacked into a scoped temp staging directory,
/// then merged into the destination, so a decode failure never leaves a
/// half-written destination tree. Staging is deleted on every exit path.
///
/// # Errors
///
/// * `DockhandError::ContainerNotFound` / `DockhandError::ArchiveNotFound` - From the download.
/// * Local I/O errors from staging or the final merge.
#[instrument(skip(docker), fields(container = %name_or_id))]
pub async fn copy_directory_from(
    docker: &Docker,
    name_or_id: &str,
    source_path: &str,
    destination_dir: &Path,
) -> Result<()> {
    let result = copy_from(docker, name_or_id, source_path).await?;
    let entries = tar::extract_archive(&result.archive);

    // Staging directory is removed when the guard drops, on success and on
    // every error path below.
    let staging = tempfile::tempdir().context("Failed to create staging directory")?;
    flatten::unpack_entries(&entries, staging.path())?;

    fs::io::ensure_dir_exists(destination_dir)?;
    copy_tree(staging.path(), destination_dir)?;

    info!(
        "Copied '{}' ({} entries) from container '{}' to {:?}",
        source_path,
        entries.len(),
        name_or_id,
        destination_dir
    );
    Ok(())
}

/// Recursively merges the contents of `source` into `destination`.
fn copy_tree(source: &Path, destination: &Path) -> Result<()> {
    fs::io::ensure_dir_exists(destination)?;
    for child in fs::io::list_dir(source)? {
        let name = child
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        let target = destination.join(name);
        if child.is_dir() {
            copy_tree(&child, &target)?;
        } else {
            fs::io::write_file_bytes(&target, &fs::io::read_file_bytes(&child)?)?;
        }
    }
    Ok(())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::docker::connect::connect_docker;
    use crate::core::config::ClientConfig;
    use std::fs as std_fs;
    use tempfile::tempdir;

    #[test]
    fn test_copy_options_defaults() {
        let options = CopyOptions::default();
        assert!(options.extract_archive);
        assert!(!options.no_overwrite_dir_non_dir);
        assert!(!options.copy_uidgid);
    }

    /// The stat header decodes from base64 JSON with an RFC 3339 mtime.
    #[test]
    fn test_decode_archive_stat() -> Result<()> {
        let json = r#"{"name":"test.txt","size":13,"mode":420,"mtime":"2024-01-15T10:30:00Z","linkTarget":""}"#;
        let encoded = base64::engine::general_purpose::STANDARD.encode(json);

        let stat = decode_archive_stat(&encoded)?;
        assert_eq!(stat.name, "test.txt");
        assert_eq!(stat.size, 13);
        assert_eq!(stat.mode, 420);
        assert_eq!(stat.link_target, "");

        let parsed = stat.modified_at()?;
        assert_eq!(parsed.timestamp(), 1_705_314_600);
        Ok(())
    }

    #[test]
    fn test_decode_archive_stat_rejects_garbage() {
        assert!(decode_archive_stat("not-base64!!").is_err());
    }

    /// Upload errors: 404 → ContainerNotFound, 400 → InvalidPath.
    #[test]
    fn test_translate_upload_errors() {
        let not_found = translate_upload_error(
            "ghost",
            "/tmp/",
            bollard::errors::Error::DockerResponseServerError {
                status_code: 404,
                message: "No such container: ghost".into(),
            },
        );
        assert!(matches!(
            not_found.downcast_ref::<DockhandError>(),
            Some(DockhandError::ContainerNotFound { name }) if name == "ghost"
        ));

        let bad_path = translate_upload_error(
            "c",
            "relative/path",
            bollard::errors::Error::DockerResponseServerError {
                status_code: 400,
                message: "must be absolute".into(),
            },
        );
        assert!(matches!(
            bad_path.downcast_ref::<DockhandError>(),
            Some(DockhandError::InvalidPath(_))
        ));
    }

    /// Download 404s split on the engine's message: container vs path.
    #[test]
    fn test_translate_download_errors() {
        let container_missing = translate_download_error(
            "ghost",
            "/etc/hosts",
            bollard::errors::Error::DockerResponseServerError {
                status_code: 404,
                message: "No such container: ghost".into(),
            },
        );
        assert!(matches!(
            container_missing.downcast_ref::<DockhandError>(),
            Some(DockhandError::ContainerNotFound { .. })
        ));

        let path_missing = translate_download_error(
            "c",
            "/missing.txt",
            bollard::errors::Error::DockerResponseServerError {
                status_code: 404,
                message: "Could not find the file /missing.txt in container c".into(),
            },
        );
        assert!(matches!(
            path_missing.downcast_ref::<DockhandError>(),
            Some(DockhandError::ArchiveNotFound { path }) if path == "/missing.txt"
        ));
    }

    /// A missing local source fails before any daemon traffic happens.
    #[tokio::test]
    async fn test_copy_file_to_missing_source() -> Result<()> {
        let docker = connect_docker(&ClientConfig::default())?;
        let base = tempdir()?;
        let missing = base.path().join("missing.txt");

        let result = copy_file_to(
            &docker,
            "any-container",
            &missing,
            "/tmp/",
            &CopyOptions::default(),
        )
        .await;

        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DockhandError>(),
            Some(DockhandError::ArchiveNotFound { .. })
        ));
        Ok(())
    }

    /// A missing local source directory fails before any daemon traffic.
    #[tokio::test]
    async fn test_copy_directory_to_missing_source() -> Result<()> {
        let docker = connect_docker(&ClientConfig::default())?;
        let base = tempdir()?;
        let missing = base.path().join("no-such-dir");

        let result = copy_directory_to(
            &docker,
            "any-container",
            &missing,
            "/tmp/",
            &CopyOptions::default(),
        )
        .await;

        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DockhandError>(),
            Some(DockhandError::FileSystem(_))
        ));
        Ok(())
    }

    /// `copy_tree` merges a staged tree into a destination recursively.
    #[test]
    fn test_copy_tree_merges_recursively() -> Result<()> {
        let source = tempdir()?;
        std_fs::create_dir_all(source.path().join("sub"))?;
        std_fs::write(source.path().join("root.txt"), "r")?;
        std_fs::write(source.path().join("sub/leaf.txt"), "l")?;

        let dest = tempdir()?;
        copy_tree(source.path(), dest.path())?;

        assert_eq!(std_fs::read(dest.path().join("root.txt"))?, b"r");
        assert_eq!(std_fs::read(dest.path().join("sub/leaf.txt"))?, b"l");
        Ok(())
    }
}
