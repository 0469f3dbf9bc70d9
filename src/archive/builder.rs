//! High-level archive assembly.
//!
//! An archive is laid out front to back: each entry's local file header and
//! compressed payload in input order, then the central directory, then the
//! end-of-central-directory record. The container requires a single writer
//! appending entries and closing the directory, so entries are processed
//! strictly one at a time on both the blocking and the async path; the async
//! variants only suspend around file reads and archive writes, and spawn no
//! tasks.
//!
//! There is no partial-success mode: the first failing entry aborts the build
//! and leaves the output without a central directory, so the caller must
//! discard it.

use std::io::{Cursor, Write};

use log::debug;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::archive::entry::{FileEntry, PreparedEntry};
use crate::archive::structures::{
    CentralDirectoryHeader, EndOfCentralDirectory, LocalFileHeader,
};
use crate::error::{Error, Result};

/// Write the given files into `output` as a ZIP archive.
///
/// Entries appear in the archive in the order given, named after each file's
/// display name. After this call returns, `output` holds a complete,
/// independently-openable archive.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if a referenced file does not exist,
/// [`Error::Io`] on any read or write failure, and
/// [`Error::InvalidArgument`] if an entry or the archive itself cannot be
/// represented within ZIP32 limits. Processing stops at the first failing
/// entry.
pub fn build_to_stream<W: Write>(files: &[FileEntry], output: &mut W) -> Result<()> {
    let mut offset = 0u64;
    let mut directory = Vec::with_capacity(files.len());

    for file in files {
        let data = file.read_bytes()?;
        let (chunk, record) = encode_entry(file.name(), &data, offset)?;
        output.write_all(&chunk)?;
        offset += chunk.len() as u64;
        directory.push(record);
    }

    let trailer = encode_directory(&directory, offset)?;
    output.write_all(&trailer)?;
    output.flush()?;
    Ok(())
}

/// Write the given files into a fresh in-memory archive.
///
/// The returned cursor is rewound to the start, so the caller can read the
/// full archive immediately without seeking.
pub fn build_to_memory(files: &[FileEntry]) -> Result<Cursor<Vec<u8>>> {
    let mut cursor = Cursor::new(Vec::new());
    build_to_stream(files, &mut cursor)?;
    cursor.set_position(0);
    Ok(cursor)
}

/// Async variant of [`build_to_stream`] with identical semantics and entry
/// ordering.
pub async fn build_to_stream_async<W>(files: &[FileEntry], output: &mut W) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut offset = 0u64;
    let mut directory = Vec::with_capacity(files.len());

    for file in files {
        let data = file.read_bytes_async().await?;
        let (chunk, record) = encode_entry(file.name(), &data, offset)?;
        output.write_all(&chunk).await?;
        offset += chunk.len() as u64;
        directory.push(record);
    }

    let trailer = encode_directory(&directory, offset)?;
    output.write_all(&trailer).await?;
    output.flush().await?;
    Ok(())
}

/// Async variant of [`build_to_memory`]; the returned cursor is rewound to
/// the start.
pub async fn build_to_memory_async(files: &[FileEntry]) -> Result<Cursor<Vec<u8>>> {
    let mut cursor = Cursor::new(Vec::new());
    build_to_stream_async(files, &mut cursor).await?;
    cursor.set_position(0);
    Ok(cursor)
}

/// Compress one entry and lay out its local header plus payload, returning
/// the bytes to append and the matching central directory record.
fn encode_entry(
    name: &str,
    data: &[u8],
    offset: u64,
) -> Result<(Vec<u8>, CentralDirectoryHeader)> {
    let lfh_offset = u32::try_from(offset)
        .map_err(|_| Error::InvalidArgument("archive exceeds the 4 GiB ZIP limit"))?;

    let prepared = PreparedEntry::encode(name, data)?;
    let header = LocalFileHeader {
        method: prepared.method,
        crc32: prepared.crc32,
        compressed_size: prepared.compressed_size(),
        uncompressed_size: prepared.uncompressed_size,
        name: &prepared.name,
    };

    let mut chunk = header.to_bytes()?;
    chunk.extend_from_slice(&prepared.payload);

    debug!(
        "entry {}: {} -> {} bytes ({:?})",
        prepared.name,
        prepared.uncompressed_size,
        prepared.compressed_size(),
        prepared.method,
    );

    let record = CentralDirectoryHeader {
        method: prepared.method,
        crc32: prepared.crc32,
        compressed_size: prepared.compressed_size(),
        uncompressed_size: prepared.uncompressed_size,
        lfh_offset,
        name: prepared.name,
    };
    Ok((chunk, record))
}

/// Lay out the central directory and the end-of-central-directory record.
fn encode_directory(directory: &[CentralDirectoryHeader], offset: u64) -> Result<Vec<u8>> {
    let cd_offset = u32::try_from(offset)
        .map_err(|_| Error::InvalidArgument("archive exceeds the 4 GiB ZIP limit"))?;
    let total_entries = u16::try_from(directory.len())
        .map_err(|_| Error::InvalidArgument("archive exceeds 65535 entries"))?;

    let mut trailer = Vec::new();
    for record in directory {
        trailer.extend_from_slice(&record.to_bytes()?);
    }
    let cd_size = u32::try_from(trailer.len())
        .map_err(|_| Error::InvalidArgument("central directory exceeds the 4 GiB ZIP limit"))?;

    let eocd = EndOfCentralDirectory {
        total_entries,
        cd_size,
        cd_offset,
    };
    trailer.extend_from_slice(&eocd.to_bytes()?);

    debug!(
        "archive finalized: {} entries, central directory at {}",
        total_entries, cd_offset,
    );
    Ok(trailer)
}
