use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::Crc;
use flate2::write::DeflateEncoder;

use crate::archive::structures::CompressionMethod;
use crate::error::{Error, Result};

/// One file to be written into an archive.
///
/// An entry pairs a display name (used as the ZIP entry name) with the path
/// of the file supplying its content. The builder opens a read handle on the
/// path only for the duration of copying its bytes.
#[derive(Debug, Clone)]
pub struct FileEntry {
    name: String,
    path: PathBuf,
}

impl FileEntry {
    /// Entry named after the file's base name. Directory components of the
    /// path are not carried into the archive.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { name, path }
    }

    /// Entry with an explicit name, independent of the path's base name.
    pub fn with_name(path: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn read_bytes(&self) -> Result<Vec<u8>> {
        std::fs::read(&self.path).map_err(|err| self.map_read_error(err))
    }

    pub(crate) async fn read_bytes_async(&self) -> Result<Vec<u8>> {
        tokio::fs::read(&self.path)
            .await
            .map_err(|err| self.map_read_error(err))
    }

    fn map_read_error(&self, err: std::io::Error) -> Error {
        match err.kind() {
            ErrorKind::NotFound => Error::NotFound(self.path.clone()),
            _ => Error::Io(err),
        }
    }
}

/// One entry's content after compression, ready to be laid out in the
/// archive.
#[derive(Debug)]
pub(crate) struct PreparedEntry {
    pub name: String,
    pub method: CompressionMethod,
    pub crc32: u32,
    pub uncompressed_size: u32,
    pub payload: Vec<u8>,
}

impl PreparedEntry {
    /// Compress one entry's bytes, favoring smaller output over speed.
    ///
    /// Entries that DEFLATE cannot shrink are kept STORED, so `payload` is
    /// never longer than the input.
    pub fn encode(name: &str, data: &[u8]) -> Result<Self> {
        if name.is_empty() {
            return Err(Error::InvalidArgument("entry name is empty"));
        }
        if name.len() > u16::MAX as usize {
            return Err(Error::InvalidArgument("entry name exceeds 65535 bytes"));
        }
        let uncompressed_size = u32::try_from(data.len())
            .map_err(|_| Error::InvalidArgument("entry exceeds the 4 GiB ZIP limit"))?;

        let mut crc = Crc::new();
        crc.update(data);

        let mut encoder = DeflateEncoder::new(
            Vec::with_capacity(data.len() / 2),
            Compression::best(),
        );
        encoder.write_all(data)?;
        let deflated = encoder.finish()?;

        let (method, payload) = if deflated.len() < data.len() {
            (CompressionMethod::Deflate, deflated)
        } else {
            (CompressionMethod::Stored, data.to_vec())
        };

        Ok(Self {
            name: name.to_string(),
            method,
            crc32: crc.sum(),
            uncompressed_size,
            payload,
        })
    }

    pub fn compressed_size(&self) -> u32 {
        // `payload` never exceeds the input, which fits in u32
        self.payload.len() as u32
    }
}
