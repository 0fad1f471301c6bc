//! Processing service coordinating staging, extraction, and chunk assembly.

use crate::{
    config::Config,
    extract::{self, FileType, PdfExtractSource, PdfTextSource},
    metrics::{IngestMetrics, MetricsSnapshot},
    processing::{
        chunking::assemble_chunks,
        package::package_chunks,
        types::{ChunkDocument, ChunkPolicy, ProcessingError},
    },
    staging::StagingArea,
};
use serde_json::{Map, Value};
use std::str::FromStr;
use std::sync::Arc;

/// Coordinates the full ingestion pipeline for one upload at a time.
///
/// The service owns the staging area, the injected PDF capability, and the
/// metrics registry. Construct it once near process start and share it
/// through an `Arc`; each [`process_file`](Self::process_file) call handles
/// exactly one upload start-to-finish with no internal parallelism.
pub struct DocumentService {
    staging: StagingArea,
    pdf_source: Box<dyn PdfTextSource>,
    policy: ChunkPolicy,
    metrics: Arc<IngestMetrics>,
}

impl DocumentService {
    /// Build a service from configuration, using the default PDF capability.
    pub fn new(config: &Config) -> Self {
        Self::with_pdf_source(config, Box::new(PdfExtractSource::new()))
    }

    /// Build a service with an explicit PDF capability.
    ///
    /// Used by tests and by embedders that bring their own PDF reader.
    pub fn with_pdf_source(config: &Config, pdf_source: Box<dyn PdfTextSource>) -> Self {
        Self {
            staging: StagingArea::new(config.staging_dir.clone()),
            pdf_source,
            policy: config.default_policy(),
            metrics: Arc::new(IngestMetrics::new()),
        }
    }

    /// Stage, extract, chunk, and package one uploaded document.
    ///
    /// The declared file type is checked before any staging work; invalid
    /// chunk configuration is likewise rejected up front. The staged file is
    /// removed on every exit path, and a removal failure fails the call even
    /// when extraction already succeeded.
    pub async fn process_file(
        &self,
        bytes: &[u8],
        file_name: &str,
        file_type: &str,
        metadata: Map<String, Value>,
    ) -> Result<Vec<ChunkDocument>, ProcessingError> {
        let declared = FileType::from_str(file_type)
            .map_err(|()| ProcessingError::UnsupportedFileType(file_type.to_string()))?;
        self.policy.validate()?;

        tracing::info!(file = file_name, file_type, "Processing upload");
        let staged = self.staging.stage(bytes, file_name).await?;
        let extracted =
            extract::extract_text(declared, staged.path(), self.pdf_source.as_ref()).await;
        let cleanup = staged.remove().await;

        // extraction failure takes precedence; an unremovable staged file
        // still fails the call even after a successful extraction
        let text = extracted?;
        cleanup?;

        let normalized = extract::normalize_whitespace(&text);
        drop(text);

        let chunks = assemble_chunks(&normalized, self.policy)?;
        let documents = package_chunks(chunks, &metadata);

        self.metrics.record_document(documents.len() as u64);
        tracing::info!(
            file = file_name,
            chunks = documents.len(),
            "Document processed"
        );
        Ok(documents)
    }

    /// Split already-extracted content under an explicit policy and package it.
    ///
    /// This is the content-only path used for vector-store ingestion: no
    /// staging or extraction is involved, so it applies to text from any
    /// origin.
    pub fn split_text(
        &self,
        content: &str,
        policy: ChunkPolicy,
        metadata: &Map<String, Value>,
    ) -> Result<Vec<ChunkDocument>, ProcessingError> {
        let chunks = assemble_chunks(content, policy)?;
        let documents = package_chunks(chunks, metadata);
        tracing::debug!(chunks = documents.len(), "Split content into chunks");
        Ok(documents)
    }

    /// Chunking policy applied by [`process_file`](Self::process_file).
    pub fn policy(&self) -> ChunkPolicy {
        self.policy
    }

    /// Return the current ingestion metrics snapshot.
    pub fn metrics_snapshot(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}
