pub mod error;
pub mod header;
pub mod chunk;
pub mod container;
pub mod metadata;
pub mod normalize;
pub mod extract;

pub use error::{FallbackReason, FallbackSignal};
pub use header::{GlbHeader, GLB_MAGIC};
pub use chunk::{ChunkHeader, CHUNK_TYPE_BIN, CHUNK_TYPE_JSON};
pub use container::{read_container, ContainerInfo, JsonPayload};
pub use metadata::{AvatarMetadata, FieldDefaults, FIELD_DEFAULTS};
pub use normalize::{normalize, try_normalize};
pub use extract::{extract, inspect, inspect_path, Extraction, MetadataSource};
