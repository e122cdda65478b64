//! Fallback diagnostics.
//!
//! Nothing in this crate returns a hard error to the caller.  Every way a
//! container or document can be unusable is described by a
//! [`FallbackSignal`], which the extraction layer turns into the sample
//! record while keeping the signal around for reporting.

use std::str::Utf8Error;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FallbackSignal {
    /// Fewer than 4 bytes, or the first 4 bytes are not `glTF`.
    #[error("Invalid magic header (found {found})")]
    InvalidMagic { found: String },

    /// A length-prefixed read ran past the end of the buffer.
    #[error("Truncated {context}: need {needed} bytes, {available} available")]
    Truncated {
        context:   &'static str,
        needed:    u64,
        available: u64,
    },

    /// The first chunk is not a JSON chunk.
    #[error("Expected JSON chunk, got {found}")]
    UnexpectedChunkType { found: String },

    #[error("JSON chunk is not valid UTF-8: {0}")]
    Encoding(#[from] Utf8Error),

    /// `extensions.VRM` is missing or empty.
    #[error("No VRM extension found in file")]
    MissingExtension,

    #[error("Malformed JSON chunk: {0}")]
    MalformedJson(String),

    /// There was no input to parse (file missing, unreadable, not supplied).
    #[error("Input unavailable: {0}")]
    Unavailable(String),
}

/// Fieldless discriminant of a [`FallbackSignal`], for logging and matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FallbackReason {
    InvalidMagic,
    Truncated,
    UnexpectedChunkType,
    Encoding,
    MissingExtension,
    MalformedJson,
    Unavailable,
}

impl FallbackSignal {
    pub fn reason(&self) -> FallbackReason {
        match self {
            FallbackSignal::InvalidMagic { .. }        => FallbackReason::InvalidMagic,
            FallbackSignal::Truncated { .. }           => FallbackReason::Truncated,
            FallbackSignal::UnexpectedChunkType { .. } => FallbackReason::UnexpectedChunkType,
            FallbackSignal::Encoding(_)                => FallbackReason::Encoding,
            FallbackSignal::MissingExtension           => FallbackReason::MissingExtension,
            FallbackSignal::MalformedJson(_)           => FallbackReason::MalformedJson,
            FallbackSignal::Unavailable(_)             => FallbackReason::Unavailable,
        }
    }
}

impl From<serde_json::Error> for FallbackSignal {
    fn from(e: serde_json::Error) -> Self {
        FallbackSignal::MalformedJson(e.to_string())
    }
}

/// Render a 4-byte tag for diagnostics: quoted ASCII when printable,
/// hex otherwise.
pub(crate) fn describe_tag(tag: &[u8]) -> String {
    if !tag.is_empty() && tag.iter().all(|b| b.is_ascii_graphic()) {
        format!("{:?}", String::from_utf8_lossy(tag))
    } else {
        format!("0x{}", hex::encode(tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_printable_tag() {
        assert_eq!(describe_tag(b"JSON"), "\"JSON\"");
    }

    #[test]
    fn describe_binary_tag() {
        assert_eq!(describe_tag(b"BIN\0"), "0x42494e00");
        assert_eq!(describe_tag(b""), "0x");
    }

    #[test]
    fn reason_matches_variant() {
        let sig = FallbackSignal::Truncated { context: "GLB header", needed: 12, available: 4 };
        assert_eq!(sig.reason(), FallbackReason::Truncated);
        assert_eq!(FallbackSignal::MissingExtension.reason(), FallbackReason::MissingExtension);
    }
}
