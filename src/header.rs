//! Fixed 12-byte GLB header.
//!
//! ```text
//! [4 bytes] magic          b"glTF"
//! [4 bytes] version        u32 little-endian
//! [4 bytes] total_length   u32 little-endian (declared size of the file)
//! ```
//!
//! `total_length` is informational only: reads are always bounded by the
//! bytes actually present, never by what the header claims.

use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};
use std::io::{self, Write};

use crate::error::{describe_tag, FallbackSignal};

pub const GLB_MAGIC: &[u8; 4] = b"glTF";
pub const GLB_MAGIC_SIZE: usize = 4;
pub const GLB_HEADER_SIZE: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlbHeader {
    pub magic:        [u8; 4],
    pub version:      u32,
    pub total_length: u32,
}

impl GlbHeader {
    pub fn new(version: u32, total_length: u32) -> Self {
        Self { magic: *GLB_MAGIC, version, total_length }
    }

    pub fn write<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_all(&self.magic)?;
        writer.write_u32::<LittleEndian>(self.version)?;
        writer.write_u32::<LittleEndian>(self.total_length)?;
        Ok(())
    }

    /// Parse the header from the start of `bytes`.
    ///
    /// The magic is checked before anything else, so a buffer shorter than
    /// four bytes is `InvalidMagic` rather than `Truncated`.
    pub fn parse(bytes: &[u8]) -> Result<Self, FallbackSignal> {
        if bytes.len() < GLB_MAGIC_SIZE || &bytes[..GLB_MAGIC_SIZE] != GLB_MAGIC {
            let seen = &bytes[..bytes.len().min(GLB_MAGIC_SIZE)];
            return Err(FallbackSignal::InvalidMagic { found: describe_tag(seen) });
        }
        if bytes.len() < GLB_HEADER_SIZE {
            return Err(truncated(bytes.len()));
        }

        let mut magic = [0u8; 4];
        magic.copy_from_slice(&bytes[..GLB_MAGIC_SIZE]);
        let version = LittleEndian::read_u32(&bytes[4..8]);
        let total_length = LittleEndian::read_u32(&bytes[8..GLB_HEADER_SIZE]);

        Ok(Self { magic, version, total_length })
    }
}

fn truncated(available: usize) -> FallbackSignal {
    FallbackSignal::Truncated {
        context:   "GLB header",
        needed:    GLB_HEADER_SIZE as u64,
        available: available as u64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FallbackReason;

    #[test]
    fn header_write_then_parse() {
        let mut buf = Vec::new();
        GlbHeader::new(2, 1234).write(&mut buf).unwrap();
        assert_eq!(buf.len(), GLB_HEADER_SIZE);

        let hdr = GlbHeader::parse(&buf).unwrap();
        assert_eq!(hdr.magic, *GLB_MAGIC);
        assert_eq!(hdr.version, 2);
        assert_eq!(hdr.total_length, 1234);
    }

    #[test]
    fn fields_are_little_endian() {
        let buf = *b"glTF\x02\x00\x00\x00\x10\x27\x00\x00";
        let hdr = GlbHeader::parse(&buf).unwrap();
        assert_eq!(hdr.version, 2);
        assert_eq!(hdr.total_length, 10_000);
    }

    #[test]
    fn short_magic_is_invalid_magic() {
        for len in 0..GLB_MAGIC_SIZE {
            let err = GlbHeader::parse(&GLB_MAGIC[..len]).unwrap_err();
            assert_eq!(err.reason(), FallbackReason::InvalidMagic);
        }
    }

    #[test]
    fn wrong_magic_reports_found_bytes() {
        let err = GlbHeader::parse(b"PK\x03\x04rest-of-zip").unwrap_err();
        assert_eq!(err, FallbackSignal::InvalidMagic { found: "0x504b0304".into() });
    }

    #[test]
    fn magic_without_fields_is_truncated() {
        let err = GlbHeader::parse(b"glTF\x02\x00").unwrap_err();
        assert_eq!(
            err,
            FallbackSignal::Truncated { context: "GLB header", needed: 12, available: 6 }
        );
    }
}
