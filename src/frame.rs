//! Length-prefixed GZIP frame codec.
//!
//! A frame is a single self-describing buffer:
//!
//! 1. A 4-byte little-endian unsigned integer holding the byte length of the
//!    *uncompressed* payload
//! 2. A standard GZIP stream holding the compressed payload
//!
//! The prefix exists because GZIP does not reliably expose the decompressed
//! size up front across streaming implementations; with it, [`decompress`]
//! allocates the output buffer once, at exactly the right size, and fills it
//! without growing. Byte order (little-endian) and prefix width (4 bytes,
//! unsigned) are part of the wire contract: the largest representable payload
//! is `u32::MAX` bytes.
//!
//! There is no magic number, no version byte, and no checksum beyond the
//! CRC-32 GZIP itself embeds (which this codec does not read).

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use std::io::{ErrorKind, Read, Write};

use crate::error::{Error, Result};

/// Width in bytes of the length prefix ahead of the GZIP stream.
pub const LENGTH_PREFIX_SIZE: usize = 4;

/// Compress a byte buffer into a length-prefixed GZIP frame.
///
/// The compression level favors smaller output over speed.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if the input is longer than the 4-byte
/// prefix can represent (`u32::MAX` bytes).
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    let original_len = u32::try_from(data.len())
        .map_err(|_| Error::InvalidArgument("input exceeds the u32 frame length limit"))?;

    let mut frame = Vec::with_capacity(LENGTH_PREFIX_SIZE + data.len() / 2);
    frame.write_u32::<LittleEndian>(original_len)?;

    let mut encoder = GzEncoder::new(frame, Compression::best());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

/// Serialize a value with the supplied function, then compress the resulting
/// bytes into a frame.
///
/// A failure inside `serialize` propagates unchanged.
pub fn compress_value<T, F>(value: &T, serialize: F) -> Result<Vec<u8>>
where
    F: FnOnce(&T) -> anyhow::Result<Vec<u8>>,
{
    let bytes = serialize(value)?;
    compress(&bytes)
}

/// Decompress a length-prefixed GZIP frame from a buffer or readable stream.
///
/// Reads the 4-byte prefix, allocates exactly that many output bytes, and
/// fills them from the GZIP decoding layer, accumulating across short reads
/// until the buffer is complete.
///
/// # Errors
///
/// Returns [`Error::InvalidData`] if the source ends before the prefix is
/// complete, if the bytes after the prefix are not a valid GZIP stream, or if
/// the stream ends before the declared length has been produced.
pub fn decompress<R: Read>(mut source: R) -> Result<Vec<u8>> {
    let declared = source
        .read_u32::<LittleEndian>()
        .map_err(|err| match err.kind() {
            ErrorKind::UnexpectedEof => {
                Error::InvalidData("frame shorter than its 4-byte length prefix".to_string())
            }
            _ => Error::Io(err),
        })?;

    let mut payload = vec![0u8; declared as usize];
    let mut decoder = GzDecoder::new(source);
    decoder
        .read_exact(&mut payload)
        .map_err(|err| match err.kind() {
            ErrorKind::InvalidInput | ErrorKind::InvalidData => {
                Error::InvalidData(format!("not a valid GZIP stream: {err}"))
            }
            ErrorKind::UnexpectedEof => Error::InvalidData(format!(
                "GZIP stream ended before the declared {declared} bytes were produced"
            )),
            _ => Error::Io(err),
        })?;

    Ok(payload)
}

/// Decompress a frame, then turn the recovered bytes back into a value with
/// the supplied function.
///
/// A failure inside `deserialize` propagates unchanged.
pub fn decompress_value<R, T, F>(source: R, deserialize: F) -> Result<T>
where
    R: Read,
    F: FnOnce(&[u8]) -> anyhow::Result<T>,
{
    let payload = decompress(source)?;
    Ok(deserialize(&payload)?)
}

/// Read the uncompressed length a frame declares, without decompressing it.
pub fn declared_len(frame: &[u8]) -> Result<usize> {
    if frame.len() < LENGTH_PREFIX_SIZE {
        return Err(Error::InvalidData(
            "frame shorter than its 4-byte length prefix".to_string(),
        ));
    }
    let declared = u32::from_le_bytes([frame[0], frame[1], frame[2], frame[3]]);
    Ok(declared as usize)
}
