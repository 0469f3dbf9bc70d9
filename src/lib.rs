//! # flatepack
//!
//! Length-prefixed GZIP framing and ZIP bundling helpers.
//!
//! This library provides small, stateless helpers for byte-level compression:
//! a GZIP codec that prefixes every compressed buffer with its original
//! length, generic variants that carry arbitrary typed values via pluggable
//! serialization functions, a string convenience layer, and a ZIP archive
//! builder that bundles a set of files into a single archive stream, both
//! synchronously and asynchronously.
//!
//! ## Features
//!
//! - Compress/decompress byte buffers as `[u32 LE original length][GZIP]`
//!   frames, so decompression allocates exactly once at the right size
//! - Frame arbitrary values through caller-supplied serialize/deserialize
//!   functions
//! - Bundle files into ZIP archives, into any `Write`/`AsyncWrite` sink or
//!   into a rewound in-memory buffer
//!
//! ## Example
//!
//! ```
//! use flatepack::{compress, decompress};
//!
//! # fn main() -> flatepack::Result<()> {
//! let frame = compress(b"hello, world")?;
//! assert_eq!(&frame[..4], &12u32.to_le_bytes());
//!
//! let original = decompress(frame.as_slice())?;
//! assert_eq!(original, b"hello, world");
//! # Ok(())
//! # }
//! ```

pub mod archive;
pub mod error;
pub mod frame;
pub mod text;

pub use archive::{
    FileEntry, build_to_memory, build_to_memory_async, build_to_stream, build_to_stream_async,
};
pub use error::{Error, Result};
pub use frame::{compress, compress_value, decompress, decompress_value};
pub use text::{compress_text, decompress_text};
