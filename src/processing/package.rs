//! Packaging of assembled chunks into indexable documents.

use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use super::types::ChunkDocument;

/// Stable SHA-256 hex digest of a chunk's content.
///
/// Downstream indexers use it to dedupe or upsert; this core never drops a
/// chunk based on it.
pub fn compute_chunk_hash(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    hex::encode(digest)
}

/// Attach per-chunk metadata to each chunk, in order.
///
/// Every document carries a copy of the caller-supplied metadata plus
/// `chunk_id` (its 0-based sequence position) and `chunk_hash`. No chunk is
/// dropped or reordered.
pub(crate) fn package_chunks(
    chunks: Vec<String>,
    metadata: &Map<String, Value>,
) -> Vec<ChunkDocument> {
    chunks
        .into_iter()
        .enumerate()
        .map(|(index, content)| {
            let mut metadata = metadata.clone();
            metadata.insert("chunk_id".to_string(), Value::from(index));
            metadata.insert(
                "chunk_hash".to_string(),
                Value::String(compute_chunk_hash(&content)),
            );
            ChunkDocument { content, metadata }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn chunk_ids_follow_sequence_order() {
        let documents = package_chunks(
            vec!["first".into(), "second".into(), "third".into()],
            &Map::new(),
        );

        let ids: Vec<_> = documents
            .iter()
            .map(|doc| doc.metadata["chunk_id"].as_u64().expect("chunk_id"))
            .collect();
        assert_eq!(ids, vec![0, 1, 2]);
        let contents: Vec<_> = documents.iter().map(|doc| doc.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "second", "third"]);
    }

    #[test]
    fn caller_metadata_is_copied_into_every_document() {
        let mut metadata = Map::new();
        metadata.insert("source".to_string(), json!("upload.txt"));
        metadata.insert("owner".to_string(), json!("alice"));

        let documents = package_chunks(vec!["a".into(), "b".into()], &metadata);
        for doc in &documents {
            assert_eq!(doc.metadata["source"], json!("upload.txt"));
            assert_eq!(doc.metadata["owner"], json!("alice"));
        }
        // the original map is untouched
        assert!(!metadata.contains_key("chunk_id"));
    }

    #[test]
    fn chunk_hash_is_stable_and_content_addressed() {
        let documents = package_chunks(vec!["same".into(), "same".into()], &Map::new());
        assert_eq!(
            documents[0].metadata["chunk_hash"],
            documents[1].metadata["chunk_hash"]
        );
        assert_ne!(documents[0].metadata["chunk_id"], documents[1].metadata["chunk_id"]);

        let h1 = compute_chunk_hash("text");
        let h2 = compute_chunk_hash("text");
        assert_eq!(h1, h2);
        assert!(!h1.is_empty());
    }

    #[test]
    fn empty_chunk_sequence_packages_to_nothing() {
        assert!(package_chunks(Vec::new(), &Map::new()).is_empty());
    }
}
