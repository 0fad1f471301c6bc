//! Core data types and error definitions for the processing pipeline.

use crate::{extract::ExtractError, staging::StagingError};
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors produced while assembling chunks from normalized text.
#[derive(Debug, Error)]
pub enum ChunkingError {
    /// A chunk size of zero can never hold any content.
    #[error("chunk size must be greater than zero")]
    InvalidChunkSize,
    /// The requested overlap would keep the window from ever advancing.
    #[error("chunk overlap {overlap} must be smaller than the chunk size {chunk_size}")]
    OverlapTooLarge {
        /// Configured window size in characters.
        chunk_size: usize,
        /// Configured overlap in characters.
        overlap: usize,
    },
}

/// Errors emitted by the document processing pipeline.
#[derive(Debug, Error)]
pub enum ProcessingError {
    /// Declared file type is outside the supported set (pdf, txt, md).
    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),
    /// Upload could not be staged, or the staged file could not be removed.
    #[error("Failed to stage upload: {0}")]
    Staging(#[from] StagingError),
    /// Text extraction failed for the staged file.
    #[error("Failed to extract document text: {0}")]
    Extraction(#[from] ExtractError),
    /// Chunk assembly was misconfigured or failed.
    #[error("Failed to chunk document: {0}")]
    Chunking(#[from] ChunkingError),
}

/// Policy used to assemble normalized text into chunks.
///
/// Both policies are first-class: sentence packing is the default
/// content-splitting path, while the fixed window exists for
/// vector-store-oriented splitting where guaranteed overlap between
/// neighboring chunks improves retrieval recall.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChunkPolicy {
    /// Pack whole sentences until the accumulated chunk would reach `max_size` characters.
    Sentence {
        /// Upper bound, in characters, on a packed chunk. Only a single
        /// sentence longer than this bound may exceed it.
        max_size: usize,
    },
    /// Slide a fixed-size character window, extending each window end to a
    /// sentence boundary and repeating `overlap` trailing characters at the
    /// start of the next chunk.
    Window {
        /// Nominal window size in characters.
        chunk_size: usize,
        /// Characters shared between neighboring chunks; must stay below
        /// `chunk_size`.
        overlap: usize,
    },
}

impl Default for ChunkPolicy {
    fn default() -> Self {
        Self::Sentence {
            max_size: crate::config::DEFAULT_MAX_CHUNK_SIZE,
        }
    }
}

impl ChunkPolicy {
    /// Reject impossible configurations before any processing begins.
    pub fn validate(&self) -> Result<(), ChunkingError> {
        match *self {
            Self::Sentence { max_size: 0 } => Err(ChunkingError::InvalidChunkSize),
            Self::Window { chunk_size: 0, .. } => Err(ChunkingError::InvalidChunkSize),
            Self::Window {
                chunk_size,
                overlap,
            } if overlap >= chunk_size => Err(ChunkingError::OverlapTooLarge {
                chunk_size,
                overlap,
            }),
            _ => Ok(()),
        }
    }
}

/// Chunk plus metadata, the unit handed to downstream indexers.
#[derive(Debug, Clone, Serialize)]
pub struct ChunkDocument {
    /// Chunk text content.
    pub content: String,
    /// Caller-supplied metadata extended with `chunk_id` and `chunk_hash`.
    pub metadata: Map<String, Value>,
}
