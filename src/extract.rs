//! High-level extraction API, the primary embedding surface.
//!
//! ```no_run
//! use vrm_meta::extract::{extract, inspect_path};
//!
//! // Just the record; never fails.
//! let bytes = std::fs::read("avatar.vrm").ok();
//! let meta = extract(bytes.as_deref());
//! println!("{} by {}", meta.name, meta.author);
//!
//! // Record plus the reason the sample was used, if it was.
//! let ex = inspect_path("avatar.vrm");
//! if let Some(sig) = ex.fallback() {
//!     eprintln!("using sample data: {sig}");
//! }
//! ```

use std::path::Path;

use log::{info, warn};

use crate::container::{read_container, ContainerInfo};
use crate::error::FallbackSignal;
use crate::metadata::AvatarMetadata;
use crate::normalize::{replace_with_sample, try_normalize};

/// Where an [`Extraction`]'s record came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataSource {
    /// Built from the container's VRM extension block.
    Parsed,
    /// The sample record, with the reason it was substituted.
    Sample(FallbackSignal),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub metadata:  AvatarMetadata,
    pub source:    MetadataSource,
    /// Present whenever the JSON chunk was decoded, even if the document
    /// was then rejected.
    pub container: Option<ContainerInfo>,
}

impl Extraction {
    pub fn is_sample(&self) -> bool {
        matches!(self.source, MetadataSource::Sample(_))
    }

    pub fn fallback(&self) -> Option<&FallbackSignal> {
        match &self.source {
            MetadataSource::Sample(sig) => Some(sig),
            MetadataSource::Parsed      => None,
        }
    }

    fn sample(signal: FallbackSignal, container: Option<ContainerInfo>) -> Self {
        warn!("Using sample VRM data: {signal}");
        Self {
            metadata: replace_with_sample(),
            source:   MetadataSource::Sample(signal),
            container,
        }
    }
}

/// Extract metadata from `bytes`, or return the sample record.
pub fn extract(bytes: Option<&[u8]>) -> AvatarMetadata {
    inspect(bytes).metadata
}

/// Like [`extract`], keeping the diagnostics.
pub fn inspect(bytes: Option<&[u8]>) -> Extraction {
    let Some(bytes) = bytes else {
        return Extraction::sample(FallbackSignal::Unavailable("no input".into()), None);
    };

    let payload = match read_container(bytes) {
        Ok(p)    => p,
        Err(sig) => return Extraction::sample(sig, None),
    };

    match try_normalize(&payload.text) {
        Ok(metadata) => {
            info!(
                "Parsed VRM metadata: {:?} by {:?} ({} blendshapes)",
                metadata.name, metadata.author, metadata.blendshapes.len()
            );
            Extraction {
                metadata,
                source:    MetadataSource::Parsed,
                container: Some(payload.info),
            }
        }
        Err(sig) => Extraction::sample(sig, Some(payload.info)),
    }
}

/// Read the file at `path` and inspect it.  A missing or unreadable file
/// is reported as `Unavailable`, never as an error.
pub fn inspect_path<P: AsRef<Path>>(path: P) -> Extraction {
    let path = path.as_ref();
    match std::fs::read(path) {
        Ok(bytes) => {
            info!("Loaded {} ({:.1} KB)", path.display(), bytes.len() as f64 / 1024.0);
            inspect(Some(bytes.as_slice()))
        }
        Err(e) => Extraction::sample(
            FallbackSignal::Unavailable(format!("{}: {e}", path.display())),
            None,
        ),
    }
}
