//! Text extraction for supported upload types.
//!
//! The extractor is polymorphic over [`FileType`]: plain text and Markdown are
//! read verbatim as UTF-8, while PDF text extraction is delegated to the
//! injected [`PdfTextSource`] capability. All extracted text is normalized by
//! collapsing whitespace runs to single spaces before chunking.

pub mod pdf;

pub use pdf::{PdfExtractSource, PdfTextSource};

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors produced while turning staged bytes into text.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The PDF capability failed to produce text for the staged file.
    #[error("failed to extract text from PDF {path}: {source}")]
    Pdf {
        /// Staged file we attempted to extract.
        path: PathBuf,
        /// Underlying error raised by the PDF capability.
        #[source]
        source: anyhow::Error,
    },
    /// The staged file could not be read as UTF-8 text.
    #[error("failed to read {path} as UTF-8 text: {source}")]
    Read {
        /// Staged file we attempted to read.
        path: PathBuf,
        /// Underlying I/O error (including invalid-encoding failures).
        #[source]
        source: std::io::Error,
    },
}

/// Upload types the extractor understands.
///
/// The set is closed on purpose: any other declared type is rejected with
/// [`crate::processing::ProcessingError::UnsupportedFileType`] before staging
/// or extraction is attempted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileType {
    /// Portable Document Format, extracted via the injected PDF capability.
    Pdf,
    /// Plain text, read verbatim.
    Txt,
    /// Markdown, read verbatim.
    Md,
}

impl std::str::FromStr for FileType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pdf" => Ok(Self::Pdf),
            "txt" => Ok(Self::Txt),
            "md" => Ok(Self::Md),
            _ => Err(()),
        }
    }
}

/// Extract the raw text of a staged file according to its declared type.
///
/// PDF segments returned by the capability are joined with newline
/// separators; text and Markdown files are read verbatim. The result still
/// needs [`normalize_whitespace`] before segmentation.
pub async fn extract_text(
    file_type: FileType,
    path: &Path,
    pdf_source: &dyn PdfTextSource,
) -> Result<String, ExtractError> {
    match file_type {
        FileType::Pdf => {
            let segments =
                pdf_source
                    .extract_text(path)
                    .await
                    .map_err(|source| ExtractError::Pdf {
                        path: path.to_path_buf(),
                        source,
                    })?;
            Ok(segments.join("\n"))
        }
        FileType::Txt | FileType::Md => {
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| ExtractError::Read {
                    path: path.to_path_buf(),
                    source,
                })
        }
    }
}

/// Collapse every whitespace run (spaces, tabs, newlines) to a single space.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
