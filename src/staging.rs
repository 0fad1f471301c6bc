//! Scoped staging of uploaded bytes on disk.
//!
//! Uploads are written to a call-unique path under a dedicated staging root
//! before extraction and removed again before control returns to the caller.
//! Highlights:
//!
//! - The staging root is injected by the caller, never read from a global, so
//!   tests can sandbox it per run.
//! - Staged file names carry a UUID v4 prefix; concurrent uploads sharing a
//!   file name never collide.
//! - [`StagedFile::remove`] surfaces removal failures instead of swallowing
//!   them; a leftover file under a caller-provided name could be picked up by
//!   an unrelated later call. `Drop` remains as a best-effort backstop.

use std::path::{Path, PathBuf};
use thiserror::Error;
use uuid::Uuid;

/// Errors raised while staging or releasing an uploaded file.
#[derive(Debug, Error)]
pub enum StagingError {
    /// Staging directory could not be created.
    #[error("failed to create staging directory {path}: {source}")]
    CreateDir {
        /// Staging root we attempted to create.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Uploaded bytes could not be written to the staging path.
    #[error("failed to write staged file {path}: {source}")]
    Write {
        /// Path of the staged file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Staged file could not be removed after processing.
    #[error("failed to remove staged file {path}: {source}")]
    Remove {
        /// Path of the staged file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Factory for call-scoped staging paths under a single root directory.
#[derive(Debug, Clone)]
pub struct StagingArea {
    root: PathBuf,
}

impl StagingArea {
    /// Create a staging area rooted at the given directory.
    ///
    /// The directory itself is created lazily on the first [`stage`](Self::stage) call.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory that staged files are written beneath.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write the uploaded bytes to a call-unique path inside the staging root.
    ///
    /// The returned [`StagedFile`] owns the on-disk file; callers are expected
    /// to invoke [`StagedFile::remove`] once extraction has finished so that
    /// removal failures surface as errors.
    pub async fn stage(&self, bytes: &[u8], file_name: &str) -> Result<StagedFile, StagingError> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|source| StagingError::CreateDir {
                path: self.root.clone(),
                source,
            })?;

        let unique_name = format!("{}-{}", Uuid::new_v4(), sanitize_file_name(file_name));
        let path = self.root.join(unique_name);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|source| StagingError::Write {
                path: path.clone(),
                source,
            })?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "Staged upload");

        Ok(StagedFile {
            path,
            removed: false,
        })
    }
}

/// Ownership-scoped handle to a file staged for extraction.
///
/// The file lives exactly as long as the handle: either through an explicit
/// [`remove`](Self::remove) or, failing that, the `Drop` backstop.
#[derive(Debug)]
pub struct StagedFile {
    path: PathBuf,
    removed: bool,
}

impl StagedFile {
    /// Location of the staged bytes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the staged file, surfacing any removal failure.
    ///
    /// A file that is already gone counts as removed; anything else is a
    /// [`StagingError::Remove`] that the caller must not ignore.
    pub async fn remove(mut self) -> Result<(), StagingError> {
        self.removed = true;
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StagingError::Remove {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        if self.removed {
            return;
        }
        if let Err(error) = std::fs::remove_file(&self.path) {
            if error.kind() != std::io::ErrorKind::NotFound {
                tracing::error!(
                    path = %self.path.display(),
                    error = %error,
                    "Failed to remove staged file"
                );
            }
        }
    }
}

/// Strip path separators and shell-unfriendly characters from an upload name.
fn sanitize_file_name(file_name: &str) -> String {
    let sanitized: String = file_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "upload".to_string()
    } else {
        sanitized
    }
}
