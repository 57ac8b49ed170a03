//! # Dockhand Archive Utilities (`common::archive`)
//!
//! File: lib/src/common/archive/mod.rs
//!
//! ## Overview
//!
//! Everything archive-shaped lives here: the from-scratch TAR codec and the
//! directory-tree flattener built on top of it. These modules are pure,
//! synchronous transformations over in-memory buffers and entry lists; the
//! codec itself never performs I/O, and the flattener only touches the disk
//! through the filesystem shim.
//!
//! ## Architecture
//!
//! - **`tar`**: The ustar-style block codec: [`tar::TarEntry`],
//!   [`tar::create_archive`], [`tar::extract_archive`].
//! - **`flatten`**: Tree-to-entry-list conversion ([`flatten::collect_entries`])
//!   and its inverse ([`flatten::unpack_entries`]), with the wall clock
//!   injected via [`flatten::TimeSource`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dockhand::common::archive::{flatten, tar};
//! use dockhand::common::archive::flatten::SystemClock;
//! use std::path::Path;
//!
//! let entries = flatten::collect_entries(Path::new("./context"), "", &SystemClock)?;
//! let bytes = tar::create_archive(&entries);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!

/// Tree flattening and reconstruction (`collect_entries`, `unpack_entries`).
pub mod flatten;
/// The TAR block codec (`TarEntry`, `create_archive`, `extract_archive`).
pub mod tar;
