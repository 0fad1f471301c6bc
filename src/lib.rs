#![deny(missing_docs)]

//! Core library for the Chunkmill document ingestion engine.

/// Environment-driven configuration management.
pub mod config;
/// Text extraction for supported upload types.
pub mod extract;
/// Structured logging and tracing setup.
pub mod logging;
/// Ingestion metrics helpers.
pub mod metrics;
/// Document processing pipeline utilities.
pub mod processing;
/// Scoped on-disk staging for uploaded bytes.
pub mod staging;
