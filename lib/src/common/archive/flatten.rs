//! # Dockhand Directory Tree Flattener (`common::archive::flatten`)
//!
//! File: lib/src/common/archive/flatten.rs
//!
//! ## Overview
//!
//! This module converts between directory trees on disk and flat, ordered
//! lists of [`TarEntry`] values. `collect_entries` walks a directory
//! recursively and produces entries in pre-order (a directory always precedes
//! its contents), which is what the TAR format needs for a consumer to be
//! able to recreate the tree in a single pass. `unpack_entries` is the
//! inverse: it materializes decoded entries under a destination root.
//!
//! ## Architecture
//!
//! - Children are read through the filesystem shim (`common::fs::io`), which
//!   returns them sorted by name, so archive output is deterministic
//!   run-to-run.
//! - Synthesized entries use fixed permission shorthands: 755 for
//!   directories, 644 for files.
//! - `mtime` is the wall-clock time at entry creation, not the file's own
//!   modification time. The clock is injected through the [`TimeSource`]
//!   trait so unit tests get reproducible archives; production callers use
//!   [`SystemClock`].
//! - `unpack_entries` creates parent directories defensively for every file
//!   entry, because a decoded archive carries no guarantee that a parent
//!   directory entry was ever present.
//!
use crate::common::archive::tar::TarEntry;
use crate::common::fs;
use crate::core::error::Result;
use std::path::Path;
use tracing::debug;

/// Injectable wall-clock source for synthesized entry timestamps.
pub trait TimeSource {
    /// Current time as whole seconds since the Unix epoch.
    fn now_secs(&self) -> i64;
}

/// The real clock, backed by `chrono`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn now_secs(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

/// Recursively flattens the contents of `root` into TAR entries.
///
/// Entry names are `base_prefix + "/" + child_name` (or just `child_name`
/// when the prefix is empty); directory names get a trailing `/`. Directories
/// are emitted before their contents (pre-order). The entries reference file
/// contents fully read into memory.
///
/// # Errors
///
/// Returns an `Err` if `root` cannot be listed or a file cannot be read.
pub fn collect_entries(root: &Path, base_prefix: &str, clock: &dyn TimeSource) -> Result<Vec<TarEntry>> {
    let mut entries = Vec::new();
    collect_into(root, base_prefix, clock, &mut entries)?;
    debug!(
        "Flattened {:?} into {} archive entries",
        root,
        entries.len()
    );
    Ok(entries)
}

fn collect_into(
    dir: &Path,
    base_prefix: &str,
    clock: &dyn TimeSource,
    entries: &mut Vec<TarEntry>,
) -> Result<()> {
    for child in fs::io::list_dir(dir)? {
        let child_name = child
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let entry_name = if base_prefix.is_empty() {
            child_name
        } else {
            format!("{base_prefix}/{child_name}")
        };

        if child.is_dir() {
            entries.push(TarEntry::directory(
                &format!("{entry_name}/"),
                755,
                clock.now_secs(),
            ));
            collect_into(&child, &entry_name, clock, entries)?;
        } else {
            let data = fs::io::read_file_bytes(&child)?;
            entries.push(TarEntry::file(&entry_name, 644, clock.now_secs(), data));
        }
    }
    Ok(())
}

/// Reconstructs a directory tree from decoded entries under `destination`.
///
/// Entries are processed in the order given. Directory entries become
/// directories (with any missing parents); file entries get their parent
/// directories created defensively before the payload is written, since the
/// decoder imposes no ordering guarantee and a file's parent directory entry
/// may never have been present at all. File entries without a payload create
/// nothing.
///
/// # Errors
///
/// Returns an `Err` if directory creation or a file write fails.
pub fn unpack_entries(entries: &[TarEntry], destination: &Path) -> Result<()> {
    for entry in entries {
        let entry_path = destination.join(&entry.name);

        if entry.is_directory {
            fs::io::ensure_dir_exists(&entry_path)?;
        } else if let Some(data) = &entry.data {
            // write_file_bytes creates missing parents itself.
            fs::io::write_file_bytes(&entry_path, data)?;
        }
    }
    debug!(
        "Unpacked {} archive entries into {:?}",
        entries.len(),
        destination
    );
    Ok(())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as std_fs;
    use tempfile::tempdir;

    /// A clock pinned to a fixed instant, for reproducible entries.
    struct FixedClock(i64);

    impl TimeSource for FixedClock {
        fn now_secs(&self) -> i64 {
            self.0
        }
    }

    /// Flattening `parent/child/file.txt` yields pre-order entries with the
    /// expected names, modes, and payload.
    #[test]
    fn test_collect_entries_pre_order() -> Result<()> {
        let base = tempdir()?;
        let root = base.path();
        std_fs::create_dir_all(root.join("parent/child"))?;
        std_fs::write(root.join("parent/child/file.txt"), "content")?;

        let entries = collect_entries(root, "", &FixedClock(1_000_000))?;

        assert_eq!(entries.len(), 3);

        assert_eq!(entries[0].name, "parent/");
        assert!(entries[0].is_directory);
        assert_eq!(entries[0].mode, 755);
        assert_eq!(entries[0].mtime, 1_000_000);
        assert_eq!(entries[0].data, None);

        assert_eq!(entries[1].name, "parent/child/");
        assert!(entries[1].is_directory);

        assert_eq!(entries[2].name, "parent/child/file.txt");
        assert!(!entries[2].is_directory);
        assert_eq!(entries[2].mode, 644);
        assert_eq!(entries[2].data.as_deref(), Some(&b"content"[..]));
        Ok(())
    }

    /// A non-empty base prefix is prepended to every entry name.
    #[test]
    fn test_collect_entries_with_prefix() -> Result<()> {
        let base = tempdir()?;
        std_fs::write(base.path().join("file.txt"), "x")?;

        let entries = collect_entries(base.path(), "staging", &FixedClock(1))?;

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "staging/file.txt");
        Ok(())
    }

    /// Siblings are emitted sorted by name.
    #[test]
    fn test_collect_entries_sorted_siblings() -> Result<()> {
        let base = tempdir()?;
        std_fs::write(base.path().join("b.txt"), "b")?;
        std_fs::write(base.path().join("a.txt"), "a")?;

        let entries = collect_entries(base.path(), "", &FixedClock(1))?;
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a.txt", "b.txt"]);
        Ok(())
    }

    /// Flatten then unpack into a fresh root reconstructs the tree
    /// byte-for-byte.
    #[test]
    fn test_flatten_unpack_round_trip() -> Result<()> {
        let source = tempdir()?;
        std_fs::create_dir_all(source.path().join("parent/child"))?;
        std_fs::write(source.path().join("parent/child/file.txt"), "content")?;

        let entries = collect_entries(source.path(), "", &FixedClock(7))?;

        let dest = tempdir()?;
        unpack_entries(&entries, dest.path())?;

        assert!(dest.path().join("parent").is_dir());
        assert!(dest.path().join("parent/child").is_dir());
        let copied = std_fs::read(dest.path().join("parent/child/file.txt"))?;
        assert_eq!(copied, b"content");
        Ok(())
    }

    /// A file entry whose parent directory entry is missing still unpacks;
    /// parents are created defensively.
    #[test]
    fn test_unpack_creates_missing_parents() -> Result<()> {
        let entries = vec![crate::common::archive::tar::TarEntry::file(
            "orphan/deep/file.txt",
            644,
            1,
            b"data".to_vec(),
        )];

        let dest = tempdir()?;
        unpack_entries(&entries, dest.path())?;

        let written = std_fs::read(dest.path().join("orphan/deep/file.txt"))?;
        assert_eq!(written, b"data");
        Ok(())
    }

    /// Directory entries with decode-time empty payloads unpack as
    /// directories, not files.
    #[test]
    fn test_unpack_directory_entry() -> Result<()> {
        let mut dir_entry = crate::common::archive::tar::TarEntry::directory("only-dir/", 755, 1);
        // Decoded directories carry Some(vec![]) rather than None.
        dir_entry.data = Some(Vec::new());

        let dest = tempdir()?;
        unpack_entries(&[dir_entry], dest.path())?;

        assert!(dest.path().join("only-dir").is_dir());
        Ok(())
    }
}
