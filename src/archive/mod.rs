//! ZIP archive building.
//!
//! This module bundles a sequence of files into a single ZIP archive stream,
//! writing either into a caller-provided sink or into a fresh in-memory
//! buffer, with blocking and async execution paths.
//!
//! ## Architecture
//!
//! The module is organized into three components:
//!
//! - `structures`: writer-side ZIP format records (local file headers,
//!   central directory headers, the EOCD record)
//! - `entry`: file handles and per-entry compression
//! - `builder`: high-level archive assembly API
//!
//! ## ZIP Format Overview
//!
//! A ZIP file is written front to back:
//! 1. A local file header followed by the compressed data, for each file
//! 2. The Central Directory with metadata for all files
//! 3. The End of Central Directory (EOCD) record
//!
//! Because the central directory is only emitted after every entry has been
//! written, an aborted build leaves an archive that readers will reject.
//!
//! ## Supported Features
//!
//! - STORED (no compression) and DEFLATE methods, picked per entry
//! - UTF-8 entry names
//!
//! ## Limitations
//!
//! - No ZIP64 extensions: entries, offsets, and the directory must fit
//!   within 32-bit fields, and at most 65535 entries per archive
//! - No encryption, no multi-disk archives
//! - Entries carry a fixed 1980-01-01 DOS timestamp

mod builder;
mod entry;
mod structures;

pub use builder::{build_to_memory, build_to_memory_async, build_to_stream, build_to_stream_async};
pub use entry::FileEntry;
pub use structures::CompressionMethod;
