//! Container reader: binary envelope to JSON text.
//!
//! # Layout consumed
//! ```text
//! 0..4     magic         b"glTF"
//! 4..8     version       u32 LE
//! 8..12    total_length  u32 LE (informational)
//! 12..16   chunk length  u32 LE  (L)
//! 16..20   chunk type    b"JSON"
//! 20..20+L payload       UTF-8 JSON
//! ```
//!
//! Only the first chunk is looked at.  If it is not a JSON chunk the
//! container is rejected outright; the reader never skips ahead looking
//! for one.  Anything after the first payload (usually the `BIN\0` buffer
//! chunk) is ignored.
//!
//! Every failure is a [`FallbackSignal`]; no input can make this module
//! panic or allocate more than the input it was given.

use log::{debug, trace};

use crate::chunk::{ChunkHeader, CHUNK_HEADER_SIZE};
use crate::error::{describe_tag, FallbackSignal};
use crate::header::{GlbHeader, GLB_HEADER_SIZE};

/// Header values of a container whose JSON chunk was decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerInfo {
    pub version:      u32,
    /// Declared by the header; not checked against the real size.
    pub total_length: u32,
    pub chunk_length: u32,
}

/// Decoded JSON chunk, ready for the normalizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonPayload {
    pub text: String,
    pub info: ContainerInfo,
}

/// Validate the envelope in `bytes` and return the first chunk as JSON text.
pub fn read_container(bytes: &[u8]) -> Result<JsonPayload, FallbackSignal> {
    let header = GlbHeader::parse(bytes)?;
    trace!(
        "GLB header: version={} total_length={} actual={}",
        header.version, header.total_length, bytes.len()
    );

    let rest = &bytes[GLB_HEADER_SIZE..];
    let chunk = ChunkHeader::parse(rest)?;
    if !chunk.is_json() {
        return Err(FallbackSignal::UnexpectedChunkType {
            found: describe_tag(&chunk.chunk_type),
        });
    }

    let payload = chunk.payload(&rest[CHUNK_HEADER_SIZE..])?;
    let text = std::str::from_utf8(payload)?.to_owned();
    debug!("JSON chunk decoded: {} bytes", payload.len());

    Ok(JsonPayload {
        text,
        info: ContainerInfo {
            version:      header.version,
            total_length: header.total_length,
            chunk_length: chunk.length,
        },
    })
}
