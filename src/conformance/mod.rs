//! Conformance corpus runner.
//!
//! Replays JSON test vectors through the document and streaming pipelines
//! and compares the output text (or error name) byte for byte.

pub mod corpus;

pub use corpus::{
    format_document, format_stream, run_vector, Corpus, CorpusResults, CorpusRunner, Expected,
    Pipeline, TestResult, TestVector,
};

use thiserror::Error;

/// Result type for conformance operations.
pub type ConformanceResult<T> = Result<T, ConformanceError>;

/// Errors that can occur while loading a corpus.
#[derive(Debug, Error)]
pub enum ConformanceError {
    /// Corpus file could not be read.
    #[error("failed to read corpus file: {0}")]
    Io(#[from] std::io::Error),
    /// Corpus file is not valid corpus JSON.
    #[error("failed to parse corpus JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// Corpus declares a format this runner does not know.
    #[error("unsupported corpus version {0:?}")]
    UnsupportedVersion(String),
}
