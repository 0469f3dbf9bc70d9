use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures surfaced by the frame codec and the archive builder.
///
/// Failures from underlying primitives (the compression codec, the file
/// system, caller-supplied serialize/deserialize functions) propagate to the
/// immediate caller; nothing is swallowed or retried.
#[derive(Debug, Error)]
pub enum Error {
    /// An input cannot be represented in the frame or archive format.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// Bytes presented for decoding are not a valid frame or GZIP stream.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// A referenced file does not exist.
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Read or write failure on an underlying stream.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Failure raised by a caller-supplied serialize or deserialize function,
    /// passed through unchanged.
    #[error(transparent)]
    Convert(#[from] anyhow::Error),
}
