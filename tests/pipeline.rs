//! End-to-end pipeline tests: staging lifecycle, extraction dispatch,
//! chunk assembly, and packaging, run against a sandboxed staging root.

use async_trait::async_trait;
use chunkmill::config::Config;
use chunkmill::extract::PdfTextSource;
use chunkmill::processing::{ChunkPolicy, DocumentService, ProcessingError};
use serde_json::{Map, Value, json};
use std::path::Path;
use tempfile::TempDir;

struct StubPdf(Vec<String>);

#[async_trait]
impl PdfTextSource for StubPdf {
    async fn extract_text(&self, _path: &Path) -> Result<Vec<String>, anyhow::Error> {
        Ok(self.0.clone())
    }
}

struct FailingPdf;

#[async_trait]
impl PdfTextSource for FailingPdf {
    async fn extract_text(&self, _path: &Path) -> Result<Vec<String>, anyhow::Error> {
        Err(anyhow::anyhow!("corrupt cross-reference table"))
    }
}

struct Harness {
    service: DocumentService,
    staging: TempDir,
}

impl Harness {
    fn new() -> Self {
        Self::with_pdf(Box::new(StubPdf(vec![])))
    }

    fn with_pdf(pdf: Box<dyn PdfTextSource>) -> Self {
        let staging = TempDir::new().expect("staging sandbox");
        let config = Config {
            staging_dir: staging.path().to_path_buf(),
            ..Config::default()
        };
        Self {
            service: DocumentService::with_pdf_source(&config, pdf),
            staging,
        }
    }

    fn staged_file_count(&self) -> usize {
        std::fs::read_dir(self.staging.path())
            .map(|entries| entries.count())
            .unwrap_or(0)
    }
}

fn metadata(pairs: &[(&str, &str)]) -> Map<String, Value> {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), Value::String(value.to_string())))
        .collect()
}

#[tokio::test]
async fn txt_upload_produces_a_single_normalized_chunk() {
    let harness = Harness::new();
    let text = b"Hello   world. This is\na test! Another sentence? End.";

    let documents = harness
        .service
        .process_file(text, "greeting.txt", "txt", Map::new())
        .await
        .expect("process txt");

    assert_eq!(documents.len(), 1);
    assert_eq!(
        documents[0].content,
        "Hello world. This is a test! Another sentence? End."
    );
    assert_eq!(documents[0].metadata["chunk_id"], json!(0));
}

#[tokio::test]
async fn staged_file_is_removed_after_success() {
    let harness = Harness::new();

    harness
        .service
        .process_file(b"Some document text.", "doc.md", "md", Map::new())
        .await
        .expect("process md");

    assert_eq!(harness.staged_file_count(), 0);
}

#[tokio::test]
async fn staged_file_is_removed_after_extraction_failure() {
    let harness = Harness::with_pdf(Box::new(FailingPdf));

    let error = harness
        .service
        .process_file(b"%PDF-1.4 garbage", "broken.pdf", "pdf", Map::new())
        .await
        .expect_err("extraction fails");

    assert!(matches!(error, ProcessingError::Extraction(_)));
    assert_eq!(harness.staged_file_count(), 0);
}

#[tokio::test]
async fn unsupported_file_type_fails_without_staging_anything() {
    let harness = Harness::new();

    let error = harness
        .service
        .process_file(b"a,b,c\n1,2,3", "table.csv", "csv", Map::new())
        .await
        .expect_err("csv is unsupported");

    match error {
        ProcessingError::UnsupportedFileType(declared) => assert_eq!(declared, "csv"),
        other => panic!("expected UnsupportedFileType, got {other}"),
    }
    assert_eq!(harness.staged_file_count(), 0);
}

#[tokio::test]
async fn pdf_pages_are_joined_before_normalization() {
    let harness = Harness::with_pdf(Box::new(StubPdf(vec![
        "Intro paragraph on page one.".into(),
        "Continuation on\npage two.".into(),
    ])));

    let documents = harness
        .service
        .process_file(b"%PDF-1.7", "paper.pdf", "pdf", Map::new())
        .await
        .expect("process pdf");

    assert_eq!(documents.len(), 1);
    assert_eq!(
        documents[0].content,
        "Intro paragraph on page one. Continuation on page two."
    );
    assert_eq!(harness.staged_file_count(), 0);
}

#[tokio::test]
async fn metadata_rides_along_on_every_chunk() {
    let harness = Harness::new();
    let many_sentences = "A fact worth keeping around for retrieval. ".repeat(80);

    let documents = harness
        .service
        .process_file(
            many_sentences.as_bytes(),
            "facts.txt",
            "txt",
            metadata(&[("source", "facts.txt"), ("owner", "ingest-worker")]),
        )
        .await
        .expect("process txt");

    assert!(documents.len() > 1);
    for (index, document) in documents.iter().enumerate() {
        assert_eq!(document.metadata["chunk_id"], json!(index));
        assert_eq!(document.metadata["source"], json!("facts.txt"));
        assert_eq!(document.metadata["owner"], json!("ingest-worker"));
        assert!(document.metadata["chunk_hash"].is_string());
        assert!(document.content.chars().count() < 1000);
    }
}

#[tokio::test]
async fn simple_mode_chunks_reconstruct_the_document() {
    let harness = Harness::new();
    let many_sentences = "Sentence number one of the corpus. ".repeat(120);

    let documents = harness
        .service
        .process_file(many_sentences.as_bytes(), "corpus.txt", "txt", Map::new())
        .await
        .expect("process txt");

    let rejoined = documents
        .iter()
        .map(|doc| doc.content.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    assert_eq!(rejoined, many_sentences.trim());
}

#[tokio::test]
async fn split_text_packages_window_chunks_with_overlap() {
    let harness = Harness::new();
    let content = "Vector stores like overlapping context. ".repeat(60);

    let documents = harness
        .service
        .split_text(
            content.trim(),
            ChunkPolicy::Window {
                chunk_size: 1000,
                overlap: 100,
            },
            &metadata(&[("source", "notes")]),
        )
        .expect("split content");

    assert!(documents.len() > 1);
    for (index, document) in documents.iter().enumerate() {
        assert_eq!(document.metadata["chunk_id"], json!(index));
    }
    // neighbors share trailing/leading text
    for pair in documents.windows(2) {
        let tail: String = {
            let chars: Vec<char> = pair[0].content.chars().collect();
            chars[chars.len().saturating_sub(40)..].iter().collect()
        };
        assert!(pair[1].content.contains(tail.trim()));
    }
}

#[tokio::test]
async fn invalid_overlap_config_is_rejected_before_producing_chunks() {
    let harness = Harness::new();

    let error = harness
        .service
        .split_text(
            "Some content worth splitting.",
            ChunkPolicy::Window {
                chunk_size: 100,
                overlap: 200,
            },
            &Map::new(),
        )
        .expect_err("overlap larger than chunk size");

    assert!(matches!(error, ProcessingError::Chunking(_)));
}

#[tokio::test]
async fn concurrent_uploads_with_the_same_name_do_not_collide() {
    let harness = Harness::new();
    let service = &harness.service;

    let (left, right) = tokio::join!(
        service.process_file(b"Left document body.", "shared.txt", "txt", Map::new()),
        service.process_file(b"Right document body.", "shared.txt", "txt", Map::new()),
    );

    assert_eq!(left.expect("left")[0].content, "Left document body.");
    assert_eq!(right.expect("right")[0].content, "Right document body.");
    assert_eq!(harness.staged_file_count(), 0);
}
