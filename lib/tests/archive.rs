//! # Archive Integration Tests
//!
//! File: lib/tests/archive.rs
//!
//! Exercises the TAR codec and the flattener together, and checks the wire
//! format against the `tar` crate in both directions. Header comparisons
//! stay at the name/payload level: the codec stores the permission
//! shorthand's decimal digits in the mode field, which is deliberate and not
//! what a general-purpose TAR writer produces.
//!
use dockhand::common::archive::flatten::{self, TimeSource};
use dockhand::common::archive::tar::{self, TarEntry};
use dockhand::Result;
use std::fs;
use std::io::Read;
use tempfile::tempdir;

struct FixedClock(i64);

impl TimeSource for FixedClock {
    fn now_secs(&self) -> i64 {
        self.0
    }
}

/// Routes library tracing into the test harness; `RUST_LOG` controls the
/// level. Safe to call from every test, only the first call installs.
fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Archives produced by the codec are readable by the `tar` crate: entry
/// names, ordering, and payloads all survive.
#[test]
fn archives_are_readable_by_tar_crate() -> Result<()> {
    init_logging();
    let entries = vec![
        TarEntry::directory("app/", 755, 1_700_000_000),
        TarEntry::file("app/config.toml", 644, 1_700_000_000, b"port = 8080\n".to_vec()),
        TarEntry::file("app/empty.log", 644, 1_700_000_000, Vec::new()),
    ];
    let bytes = tar::create_archive(&entries);

    let mut archive = ::tar::Archive::new(&bytes[..]);
    let mut seen = Vec::new();
    for entry in archive.entries()? {
        let mut entry = entry?;
        let name = entry.path()?.to_string_lossy().into_owned();
        let mut payload = Vec::new();
        entry.read_to_end(&mut payload)?;
        seen.push((name, entry.header().entry_type().is_dir(), payload));
    }

    assert_eq!(seen.len(), 3);
    assert_eq!(seen[0].0, "app/");
    assert!(seen[0].1);
    assert_eq!(seen[1].0, "app/config.toml");
    assert_eq!(seen[1].2, b"port = 8080\n");
    assert_eq!(seen[2].0, "app/empty.log");
    assert!(seen[2].2.is_empty());
    Ok(())
}

/// Archives produced by the `tar` crate decode cleanly: names, payloads, and
/// the directory flag come through.
#[test]
fn tar_crate_archives_decode() -> Result<()> {
    init_logging();
    let mut builder = ::tar::Builder::new(Vec::new());

    let mut dir_header = ::tar::Header::new_ustar();
    dir_header.set_entry_type(::tar::EntryType::Directory);
    dir_header.set_size(0);
    dir_header.set_mode(0o755);
    dir_header.set_mtime(1_700_000_000);
    builder.append_data(&mut dir_header, "data/", &[][..])?;

    let payload = b"hello from tar-rs";
    let mut file_header = ::tar::Header::new_ustar();
    file_header.set_entry_type(::tar::EntryType::Regular);
    file_header.set_size(payload.len() as u64);
    file_header.set_mode(0o644);
    file_header.set_mtime(1_700_000_000);
    builder.append_data(&mut file_header, "data/hello.txt", &payload[..])?;

    let bytes = builder.into_inner()?;
    let decoded = tar::extract_archive(&bytes);

    assert_eq!(decoded.len(), 2);
    assert_eq!(decoded[0].name, "data/");
    assert!(decoded[0].is_directory);
    assert_eq!(decoded[0].data, Some(Vec::new()));
    assert_eq!(decoded[1].name, "data/hello.txt");
    assert!(!decoded[1].is_directory);
    assert_eq!(decoded[1].data.as_deref(), Some(&payload[..]));
    assert_eq!(decoded[1].size, payload.len() as u64);
    assert_eq!(decoded[1].mtime, 1_700_000_000);
    Ok(())
}

/// Full pipeline on disk: flatten a tree, encode, decode, unpack into a
/// fresh root, and compare the result file-by-file.
#[test]
fn flatten_encode_decode_unpack_round_trip() -> Result<()> {
    init_logging();
    let source = tempdir()?;
    fs::create_dir_all(source.path().join("site/assets"))?;
    fs::write(source.path().join("site/index.html"), "<html></html>")?;
    fs::write(source.path().join("site/assets/app.js"), "console.log(1)")?;
    fs::write(source.path().join("readme.md"), "# readme")?;

    let entries = flatten::collect_entries(source.path(), "", &FixedClock(1_650_000_000))?;
    let bytes = tar::create_archive(&entries);
    let decoded = tar::extract_archive(&bytes);

    let names: Vec<_> = decoded.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "readme.md",
            "site/",
            "site/assets/",
            "site/assets/app.js",
            "site/index.html",
        ]
    );

    let dest = tempdir()?;
    flatten::unpack_entries(&decoded, dest.path())?;

    assert_eq!(fs::read(dest.path().join("readme.md"))?, b"# readme");
    assert_eq!(
        fs::read(dest.path().join("site/index.html"))?,
        b"<html></html>"
    );
    assert_eq!(
        fs::read(dest.path().join("site/assets/app.js"))?,
        b"console.log(1)"
    );
    assert!(dest.path().join("site/assets").is_dir());
    Ok(())
}

/// The deterministic clock makes encoding reproducible byte-for-byte.
#[test]
fn archives_are_deterministic_for_a_fixed_clock() -> Result<()> {
    init_logging();
    let source = tempdir()?;
    fs::write(source.path().join("b.txt"), "b")?;
    fs::write(source.path().join("a.txt"), "a")?;

    let first = tar::create_archive(&flatten::collect_entries(
        source.path(),
        "",
        &FixedClock(42),
    )?);
    let second = tar::create_archive(&flatten::collect_entries(
        source.path(),
        "",
        &FixedClock(42),
    )?);

    assert_eq!(first, second);
    Ok(())
}
