use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};
use std::io::{self, Write};

use crate::error::FallbackSignal;

pub const CHUNK_HEADER_SIZE: usize = 8;
pub const CHUNK_TYPE_JSON: &[u8; 4] = b"JSON";
pub const CHUNK_TYPE_BIN: &[u8; 4] = b"BIN\0";

/// Length-prefixed chunk header: `[u32 LE length][4-byte type tag]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkHeader {
    pub length:     u32,
    pub chunk_type: [u8; 4],
}

impl ChunkHeader {
    pub fn new(chunk_type: &[u8; 4], length: u32) -> Self {
        Self { length, chunk_type: *chunk_type }
    }

    pub fn is_json(&self) -> bool {
        &self.chunk_type == CHUNK_TYPE_JSON
    }

    pub fn write<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_u32::<LittleEndian>(self.length)?;
        writer.write_all(&self.chunk_type)?;
        Ok(())
    }

    /// Parse a chunk header from the start of `bytes`.
    pub fn parse(bytes: &[u8]) -> Result<Self, FallbackSignal> {
        let truncated = || FallbackSignal::Truncated {
            context:   "chunk header",
            needed:    CHUNK_HEADER_SIZE as u64,
            available: bytes.len() as u64,
        };
        if bytes.len() < CHUNK_HEADER_SIZE {
            return Err(truncated());
        }

        let length = LittleEndian::read_u32(&bytes[..4]);
        let mut chunk_type = [0u8; 4];
        chunk_type.copy_from_slice(&bytes[4..CHUNK_HEADER_SIZE]);

        Ok(Self { length, chunk_type })
    }

    /// Borrow this chunk's payload from `body`, the bytes that follow the
    /// chunk header.  The declared length is checked against what is
    /// actually there before slicing.
    pub fn payload<'a>(&self, body: &'a [u8]) -> Result<&'a [u8], FallbackSignal> {
        let needed = self.length as u64;
        if needed > body.len() as u64 {
            return Err(FallbackSignal::Truncated {
                context:   "chunk payload",
                needed,
                available: body.len() as u64,
            });
        }
        Ok(&body[..self.length as usize])
    }
}
