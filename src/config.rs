use std::env;
use std::path::PathBuf;
use thiserror::Error;

use crate::processing::ChunkPolicy;

/// Default maximum size, in characters, of a sentence-packed chunk.
pub const DEFAULT_MAX_CHUNK_SIZE: usize = 1000;

/// Errors encountered while loading configuration from environment variables.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Environment variable contained a value that could not be parsed.
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

/// Runtime configuration for the Chunkmill pipeline.
///
/// Loaded once from the environment and passed explicitly into
/// [`crate::processing::DocumentService`]; the staging root in particular is
/// injected rather than read from a global so tests can sandbox it per run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory where uploads are staged during extraction.
    pub staging_dir: PathBuf,
    /// Maximum chunk size, in characters, for sentence-packed chunks.
    pub max_chunk_size: usize,
    /// Optional window size for fixed-window splitting (defaults to `max_chunk_size`).
    pub window_chunk_size: Option<usize>,
    /// Optional overlap, in characters, between neighboring window chunks.
    pub chunk_overlap: Option<usize>,
}

impl Config {
    /// Load configuration from environment variables, performing validation along the way.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            staging_dir: load_env_optional("CHUNKMILL_STAGING_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("temp")),
            max_chunk_size: parse_env_optional("CHUNKMILL_MAX_CHUNK_SIZE")?
                .unwrap_or(DEFAULT_MAX_CHUNK_SIZE),
            window_chunk_size: parse_env_optional("CHUNKMILL_WINDOW_CHUNK_SIZE")?,
            chunk_overlap: parse_env_optional("CHUNKMILL_CHUNK_OVERLAP")?,
        })
    }

    /// Chunking policy implied by this configuration.
    ///
    /// An overlap greater than zero selects fixed-window splitting; otherwise
    /// documents are packed sentence by sentence up to `max_chunk_size`.
    pub fn default_policy(&self) -> ChunkPolicy {
        match self.chunk_overlap {
            Some(overlap) if overlap > 0 => ChunkPolicy::Window {
                chunk_size: self.window_chunk_size.unwrap_or(self.max_chunk_size),
                overlap,
            },
            _ => ChunkPolicy::Sentence {
                max_size: self.max_chunk_size,
            },
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            staging_dir: PathBuf::from("temp"),
            max_chunk_size: DEFAULT_MAX_CHUNK_SIZE,
            window_chunk_size: None,
            chunk_overlap: None,
        }
    }
}

fn load_env_optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_env_optional(key: &str) -> Result<Option<usize>, ConfigError> {
    load_env_optional(key)
        .map(|value| {
            value
                .parse()
                .map_err(|_| ConfigError::InvalidValue(key.to_string()))
        })
        .transpose()
}
