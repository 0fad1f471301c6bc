//! Document processing pipeline: segmentation, chunk assembly, and packaging.

mod chunking;
mod package;
mod segment;
mod service;
mod types;

pub use package::compute_chunk_hash;
pub use service::DocumentService;
pub use types::{ChunkDocument, ChunkPolicy, ChunkingError, ProcessingError};
