use byteorder::{LittleEndian, WriteBytesExt};

use crate::error::Result;

/// ZIP compression methods this builder emits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionMethod {
    Stored,
    Deflate,
}

impl CompressionMethod {
    pub fn as_u16(&self) -> u16 {
        match self {
            CompressionMethod::Stored => 0,
            CompressionMethod::Deflate => 8,
        }
    }
}

/// Version needed to extract DEFLATE entries (PKZIP 2.0)
const VERSION_NEEDED: u16 = 20;
/// Version made by; kept at the baseline so external attributes stay neutral
const VERSION_MADE_BY: u16 = 20;
/// General purpose flag bit 11: the entry name is UTF-8
const UTF8_NAME_FLAG: u16 = 0x0800;
/// Every entry carries a fixed DOS timestamp of 1980-01-01 00:00:00
const DOS_EPOCH_DATE: u16 = (1 << 5) | 1;
const DOS_EPOCH_TIME: u16 = 0;

/// Local File Header (LFH) - 30 bytes plus the entry name
pub struct LocalFileHeader<'a> {
    pub method: CompressionMethod,
    pub crc32: u32,
    pub compressed_size: u32,
    pub uncompressed_size: u32,
    pub name: &'a str,
}

impl LocalFileHeader<'_> {
    pub const SIGNATURE: &'static [u8] = b"PK\x03\x04";
    pub const SIZE: usize = 30;

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(Self::SIZE + self.name.len());
        buf.extend_from_slice(Self::SIGNATURE);
        buf.write_u16::<LittleEndian>(VERSION_NEEDED)?;
        buf.write_u16::<LittleEndian>(UTF8_NAME_FLAG)?;
        buf.write_u16::<LittleEndian>(self.method.as_u16())?;
        buf.write_u16::<LittleEndian>(DOS_EPOCH_TIME)?;
        buf.write_u16::<LittleEndian>(DOS_EPOCH_DATE)?;
        buf.write_u32::<LittleEndian>(self.crc32)?;
        buf.write_u32::<LittleEndian>(self.compressed_size)?;
        buf.write_u32::<LittleEndian>(self.uncompressed_size)?;
        buf.write_u16::<LittleEndian>(self.name.len() as u16)?;
        buf.write_u16::<LittleEndian>(0)?; // extra field length
        buf.extend_from_slice(self.name.as_bytes());
        Ok(buf)
    }
}

/// Central Directory File Header (CDFH) - 46 bytes plus the entry name
pub struct CentralDirectoryHeader {
    pub method: CompressionMethod,
    pub crc32: u32,
    pub compressed_size: u32,
    pub uncompressed_size: u32,
    pub lfh_offset: u32,
    pub name: String,
}

impl CentralDirectoryHeader {
    pub const SIGNATURE: &'static [u8] = b"PK\x01\x02";
    pub const SIZE: usize = 46;

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(Self::SIZE + self.name.len());
        buf.extend_from_slice(Self::SIGNATURE);
        buf.write_u16::<LittleEndian>(VERSION_MADE_BY)?;
        buf.write_u16::<LittleEndian>(VERSION_NEEDED)?;
        buf.write_u16::<LittleEndian>(UTF8_NAME_FLAG)?;
        buf.write_u16::<LittleEndian>(self.method.as_u16())?;
        buf.write_u16::<LittleEndian>(DOS_EPOCH_TIME)?;
        buf.write_u16::<LittleEndian>(DOS_EPOCH_DATE)?;
        buf.write_u32::<LittleEndian>(self.crc32)?;
        buf.write_u32::<LittleEndian>(self.compressed_size)?;
        buf.write_u32::<LittleEndian>(self.uncompressed_size)?;
        buf.write_u16::<LittleEndian>(self.name.len() as u16)?;
        buf.write_u16::<LittleEndian>(0)?; // extra field length
        buf.write_u16::<LittleEndian>(0)?; // file comment length
        buf.write_u16::<LittleEndian>(0)?; // disk number start
        buf.write_u16::<LittleEndian>(0)?; // internal attributes
        buf.write_u32::<LittleEndian>(0)?; // external attributes
        buf.write_u32::<LittleEndian>(self.lfh_offset)?;
        buf.extend_from_slice(self.name.as_bytes());
        Ok(buf)
    }
}

/// End of Central Directory (EOCD) - 22 bytes, no archive comment
pub struct EndOfCentralDirectory {
    pub total_entries: u16,
    pub cd_size: u32,
    pub cd_offset: u32,
}

impl EndOfCentralDirectory {
    pub const SIGNATURE: &'static [u8] = b"PK\x05\x06";
    pub const SIZE: usize = 22;

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(Self::SIZE);
        buf.extend_from_slice(Self::SIGNATURE);
        buf.write_u16::<LittleEndian>(0)?; // this disk
        buf.write_u16::<LittleEndian>(0)?; // disk with the central directory
        buf.write_u16::<LittleEndian>(self.total_entries)?;
        buf.write_u16::<LittleEndian>(self.total_entries)?;
        buf.write_u32::<LittleEndian>(self.cd_size)?;
        buf.write_u32::<LittleEndian>(self.cd_offset)?;
        buf.write_u16::<LittleEndian>(0)?; // comment length
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_header_layout() {
        let header = LocalFileHeader {
            method: CompressionMethod::Deflate,
            crc32: 0xDEADBEEF,
            compressed_size: 10,
            uncompressed_size: 20,
            name: "hello.txt",
        };
        let bytes = header.to_bytes().unwrap();
        assert_eq!(bytes.len(), LocalFileHeader::SIZE + "hello.txt".len());
        assert_eq!(&bytes[0..4], LocalFileHeader::SIGNATURE);
        assert_eq!(&bytes[14..18], &0xDEADBEEFu32.to_le_bytes());
        assert_eq!(&bytes[30..], b"hello.txt");
    }

    #[test]
    fn eocd_is_exactly_22_bytes() {
        let eocd = EndOfCentralDirectory {
            total_entries: 3,
            cd_size: 150,
            cd_offset: 1024,
        };
        let bytes = eocd.to_bytes().unwrap();
        assert_eq!(bytes.len(), EndOfCentralDirectory::SIZE);
        assert_eq!(&bytes[0..4], EndOfCentralDirectory::SIGNATURE);
        assert_eq!(&bytes[16..20], &1024u32.to_le_bytes());
    }
}
