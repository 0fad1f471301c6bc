//! Injected PDF-to-text capability and its default implementation.

use async_trait::async_trait;
use std::path::Path;

/// Interface implemented by PDF text extraction backends.
///
/// The capability performs its own page/paragraph splitting and returns the
/// resulting segments in document order; the extractor joins them with
/// newline separators. Alternative backends (a remote OCR service, a test
/// stub) plug in here.
#[async_trait]
pub trait PdfTextSource: Send + Sync {
    /// Produce the ordered text segments of the PDF at `path`.
    async fn extract_text(&self, path: &Path) -> Result<Vec<String>, anyhow::Error>;
}

/// Default capability backed by the `pdf-extract` crate.
///
/// Parsing is CPU-bound, so it runs on the blocking thread pool.
pub struct PdfExtractSource;

impl PdfExtractSource {
    /// Construct the default PDF text source.
    pub const fn new() -> Self {
        Self
    }
}

impl Default for PdfExtractSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PdfTextSource for PdfExtractSource {
    async fn extract_text(&self, path: &Path) -> Result<Vec<String>, anyhow::Error> {
        let path = path.to_path_buf();
        let text = tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text(&path)
                .map_err(|error| anyhow::anyhow!("pdf text extraction failed: {error}"))
        })
        .await
        .map_err(|error| anyhow::anyhow!("pdf extraction task failed: {error}"))??;

        Ok(split_pages(&text))
    }
}

/// Split extracted text into page segments on form-feed breaks.
fn split_pages(text: &str) -> Vec<String> {
    text.split('\x0C')
        .map(str::trim)
        .filter(|page| !page.is_empty())
        .map(str::to_string)
        .collect()
}
