//! # Dockhand TAR Archive Codec (`common::archive::tar`)
//!
//! File: lib/src/common/archive/tar.rs
//!
//! ## Overview
//!
//! This module implements a self-contained POSIX ustar-style TAR codec:
//! `create_archive` serializes a list of [`TarEntry`] values into a TAR byte
//! stream, and `extract_archive` parses such a stream back into entries. It
//! exists because the copy endpoints of the Docker Engine API speak raw TAR
//! over HTTP, and the library cannot assume a platform tar implementation on
//! every target.
//!
//! ## Architecture
//!
//! The format is the classic 512-byte-block layout:
//!
//! - One header block per entry: name @0 (100 bytes, NUL-terminated), mode
//!   @100 (8), uid @108 (8, always zero), gid @116 (8, always zero), size
//!   @124 (12), mtime @136 (12), checksum @148 (8), typeflag @156 (1 byte,
//!   `'0'` regular file / `'5'` directory). Remaining header bytes are zero.
//! - Numeric fields are left-justified octal ASCII followed by a NUL; values
//!   too wide for a field keep only their least-significant octal digits.
//! - The checksum is the unsigned sum of all 512 header bytes with the
//!   checksum field itself blanked to ASCII spaces.
//! - File payloads follow their header, zero-padded to the next 512-byte
//!   boundary; a payload that already ends on a block boundary gets no pad.
//! - The archive ends with two all-zero blocks (1024 zero bytes).
//!
//! Decoding is deliberately best-effort: an all-zero block, fewer than 512
//! remaining bytes, or a payload cut short ends parsing; unparsable octal
//! fields decode to 0 and no checksum validation is performed. Corrupt input
//! yields whatever complete entries could be collected, never an error.
//!
//! Long names (PAX / GNU `@LongLink`), sparse files, and compression are out
//! of scope; names longer than 99 bytes are truncated, which is a documented
//! format limitation rather than an error.
//!
//! ## Usage
//!
//! ```rust
//! use dockhand::common::archive::tar::{self, TarEntry};
//!
//! let entry = TarEntry::file("hello.txt", 644, 1_234_567_890, b"hi".to_vec());
//! let bytes = tar::create_archive(&[entry]);
//! let decoded = tar::extract_archive(&bytes);
//! assert_eq!(decoded[0].data.as_deref(), Some(&b"hi"[..]));
//! ```
//!
use tracing::debug;

/// Size of a TAR block; headers, payload padding, and end markers are all
/// multiples of this.
pub const BLOCK_SIZE: usize = 512;

const NAME_SIZE: usize = 100;
const MODE_SIZE: usize = 8;
const UID_SIZE: usize = 8;
const GID_SIZE: usize = 8;
const SIZE_SIZE: usize = 12;
const MTIME_SIZE: usize = 12;
const CHECKSUM_SIZE: usize = 8;

const MODE_OFFSET: usize = 100;
const UID_OFFSET: usize = 108;
const GID_OFFSET: usize = 116;
const SIZE_OFFSET: usize = 124;
const MTIME_OFFSET: usize = 136;
const CHECKSUM_OFFSET: usize = 148;
const TYPEFLAG_OFFSET: usize = 156;

const TYPE_REGULAR: u8 = b'0';
const TYPE_DIRECTORY: u8 = b'5';

/// One logical archive member: a regular file or a directory.
///
/// `mode` carries the POSIX permission shorthand as an integer whose decimal
/// digits spell the permission bits (`644`, `755`); like every numeric header
/// field it is stored on the wire in octal. `mtime` is seconds since the Unix
/// epoch.
///
/// `data` distinguishes "no payload present" (`None`, the encode-time state
/// of a directory) from a present-but-empty payload (`Some(vec![])`). The
/// decoder always materializes `Some(vec![])` for zero-size entries,
/// directories included, so a directory's `data` changes from `None` to
/// `Some(vec![])` across a round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TarEntry {
    /// Path relative to the archive root, forward-slash separated. Directory
    /// names conventionally end with `/`.
    pub name: String,
    /// Payload length in bytes; 0 for directories.
    pub size: u64,
    /// POSIX permission shorthand (e.g. 644, 755).
    pub mode: u32,
    /// Modification time, seconds since the Unix epoch.
    pub mtime: i64,
    /// Whether this entry is a directory (typeflag `'5'`).
    pub is_directory: bool,
    /// Optional payload; see the type-level docs for the `None` vs
    /// `Some(vec![])` distinction.
    pub data: Option<Vec<u8>>,
}

impl TarEntry {
    /// Builds a regular-file entry; `size` is derived from the payload.
    pub fn file(name: &str, mode: u32, mtime: i64, data: Vec<u8>) -> Self {
        Self {
            name: name.to_string(),
            size: data.len() as u64,
            mode,
            mtime,
            is_directory: false,
            data: Some(data),
        }
    }

    /// Builds a directory entry; directories carry no payload.
    pub fn directory(name: &str, mode: u32, mtime: i64) -> Self {
        Self {
            name: name.to_string(),
            size: 0,
            mode,
            mtime,
            is_directory: true,
            data: None,
        }
    }
}

/// Serializes `entries`, in input order, into a TAR byte stream terminated by
/// two all-zero blocks.
///
/// Order is significant for consumers that reconstruct directory trees:
/// parents must precede their children, which the flattener guarantees via
/// pre-order traversal.
pub fn create_archive(entries: &[TarEntry]) -> Vec<u8> {
    let mut buffer = Vec::new();

    for entry in entries {
        write_entry(&mut buffer, entry);
    }

    // Two empty blocks mark the end of the archive.
    buffer.extend_from_slice(&[0u8; BLOCK_SIZE * 2]);

    debug!(
        "Created archive: {} entries, {} bytes",
        entries.len(),
        buffer.len()
    );
    buffer
}

/// Writes one header block plus payload blocks for `entry`.
fn write_entry(buffer: &mut Vec<u8>, entry: &TarEntry) {
    // Each entry gets its own header buffer; nothing is shared between
    // iterations.
    let mut header = [0u8; BLOCK_SIZE];

    write_string(&mut header, 0, &entry.name, NAME_SIZE);
    write_octal(&mut header, MODE_OFFSET, entry.mode as u64, MODE_SIZE);
    write_octal(&mut header, UID_OFFSET, 0, UID_SIZE);
    write_octal(&mut header, GID_OFFSET, 0, GID_SIZE);
    write_octal(&mut header, SIZE_OFFSET, entry.size, SIZE_SIZE);
    write_octal(&mut header, MTIME_OFFSET, entry.mtime.max(0) as u64, MTIME_SIZE);

    // Checksum field is blanked to spaces while the sum is taken.
    for byte in header
        .iter_mut()
        .skip(CHECKSUM_OFFSET)
        .take(CHECKSUM_SIZE)
    {
        *byte = b' ';
    }

    header[TYPEFLAG_OFFSET] = if entry.is_directory {
        TYPE_DIRECTORY
    } else {
        TYPE_REGULAR
    };

    let checksum: u64 = header.iter().map(|b| *b as u64).sum();
    write_octal(&mut header, CHECKSUM_OFFSET, checksum, CHECKSUM_SIZE - 1);
    header[CHECKSUM_OFFSET + CHECKSUM_SIZE - 1] = 0;

    buffer.extend_from_slice(&header);

    // Payload blocks only exist for files with a payload present.
    if !entry.is_directory {
        if let Some(data) = &entry.data {
            buffer.extend_from_slice(data);

            let padding = (BLOCK_SIZE - data.len() % BLOCK_SIZE) % BLOCK_SIZE;
            if padding > 0 {
                buffer.extend_from_slice(&vec![0u8; padding]);
            }
        }
    }
}

/// Parses a TAR byte stream into its entries, best-effort.
///
/// Parsing stops at the first all-zero header block (end-of-archive marker),
/// when fewer than 512 bytes remain, or when a payload is cut short; whatever
/// complete entries were collected up to that point are returned. Unparsable
/// numeric fields decode to 0 and no checksum validation is performed, so
/// corrupt (but non-zero) headers still produce an entry.
pub fn extract_archive(data: &[u8]) -> Vec<TarEntry> {
    let mut entries = Vec::new();
    let mut pos = 0usize;

    while data.len() - pos >= BLOCK_SIZE {
        let header = &data[pos..pos + BLOCK_SIZE];
        pos += BLOCK_SIZE;

        // All-zero block: end of archive.
        if header.iter().all(|b| *b == 0) {
            break;
        }

        let name = read_string(header, 0, NAME_SIZE);
        let size = read_octal(header, SIZE_OFFSET, SIZE_SIZE);
        let mode = read_octal(header, MODE_OFFSET, MODE_SIZE) as u32;
        let mtime = read_octal(header, MTIME_OFFSET, MTIME_SIZE) as i64;
        let is_directory = header[TYPEFLAG_OFFSET] == TYPE_DIRECTORY;

        // Zero-size entries (directories included) decode with an explicit
        // empty payload, not an absent one.
        if size == 0 {
            entries.push(TarEntry {
                name,
                size,
                mode,
                mtime,
                is_directory,
                data: Some(Vec::new()),
            });
            continue;
        }

        let data_field = if !is_directory {
            // A payload cut short cannot form a complete entry; drop it and
            // end parsing with what was collected so far.
            if data.len() - pos < size as usize {
                break;
            }
            let payload = data[pos..pos + size as usize].to_vec();
            pos += size as usize;

            let padding = (BLOCK_SIZE - (size as usize) % BLOCK_SIZE) % BLOCK_SIZE;
            pos = (pos + padding).min(data.len());

            Some(payload)
        } else {
            // Malformed input: a directory claiming a payload size. No
            // payload bytes are consumed for it.
            None
        };

        entries.push(TarEntry {
            name,
            size,
            mode,
            mtime,
            is_directory,
            data: data_field,
        });
    }

    debug!("Extracted {} entries from archive", entries.len());
    entries
}

/// Writes a NUL-terminated string into a fixed-width field, truncating to
/// `max_length - 1` bytes to leave room for the terminator.
fn write_string(dest: &mut [u8], offset: usize, value: &str, max_length: usize) {
    let bytes = value.as_bytes();
    let length = bytes.len().min(max_length - 1);
    dest[offset..offset + length].copy_from_slice(&bytes[..length]);
    dest[offset + length] = 0;
}

/// Writes a number as left-justified octal ASCII with a NUL terminator,
/// keeping only the least-significant digits that fit in the field.
fn write_octal(dest: &mut [u8], offset: usize, value: u64, max_length: usize) {
    let octal = format!("{value:o}");
    let digits = octal.as_bytes();
    let length = digits.len().min(max_length - 1);
    let start = digits.len() - length;
    dest[offset..offset + length].copy_from_slice(&digits[start..]);
    dest[offset + length] = 0;
}

/// Reads a NUL-terminated (or full-width) string from a fixed-width field.
fn read_string(source: &[u8], offset: usize, max_length: usize) -> String {
    let field = &source[offset..offset + max_length];
    let end = field.iter().position(|b| *b == 0).unwrap_or(max_length);
    String::from_utf8_lossy(&field[..end]).into_owned()
}

/// Reads an octal ASCII field; whitespace is trimmed, and empty or
/// unparsable content decodes to 0.
fn read_octal(source: &[u8], offset: usize, max_length: usize) -> u64 {
    let text = read_string(source, offset, max_length);
    let trimmed = text.trim();
    if trimmed.is_empty() {
        0
    } else {
        u64::from_str_radix(trimmed, 8).unwrap_or(0)
    }
}
