//! Corpus-based conformance testing.
//!
//! A corpus is a JSON file of test vectors. Each vector names an input
//! text and the outcome the codec must produce for it: the canonical
//! re-serialization, or the name of the parse error.
//!
//! ```json
//! {
//!   "version": "1",
//!   "vectors": [
//!     { "id": "obj-order", "input": "{\"a\":1,\"b\":2}", "expected": { "ok": "{\"a\":1,\"b\":2}" } },
//!     { "id": "trailing", "input": "1 2", "expected": { "err": "ROOT_NOT_SINGULAR" } }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::{ConformanceError, ConformanceResult};
use crate::document::Document;
use crate::error::{ErrorCode, ParseResult};
use crate::reader::{Limits, Reader};
use crate::stream::{StringReadStream, StringWriteStream};
use crate::writer::Writer;

/// Corpus format this runner understands.
pub const CORPUS_VERSION: &str = "1";

/// A corpus containing test vectors.
#[derive(Debug, Deserialize)]
pub struct Corpus {
    /// Format version of the corpus file.
    pub version: String,
    /// List of test vectors.
    pub vectors: Vec<TestVector>,
}

/// Which pipeline a vector runs through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pipeline {
    /// Parse into a [`Document`], then serialize the tree.
    #[default]
    Document,
    /// Stream parser events straight into a [`Writer`].
    Stream,
}

/// Expected outcome of a vector.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Expected {
    /// Parse succeeds and serializes to this text.
    Ok(String),
    /// Parse fails with the error of this name.
    Err(String),
}

/// A single test vector.
#[derive(Debug, Deserialize)]
pub struct TestVector {
    /// Unique identifier for the test.
    pub id: String,
    /// Input text.
    pub input: String,
    /// Expected result.
    pub expected: Expected,
    /// Pipeline to run; defaults to the document pipeline.
    #[serde(default)]
    pub pipeline: Pipeline,
    /// Nesting bound override.
    #[serde(default)]
    pub max_depth: Option<usize>,
}

/// Result of running a single test vector.
#[derive(Debug, PartialEq, Eq)]
pub enum TestResult {
    /// Test passed.
    Pass,
    /// Test failed with mismatch.
    Fail {
        /// Expected outcome.
        expected: String,
        /// Actual outcome.
        actual: String,
    },
    /// The vector itself is malformed.
    Error {
        /// Error message.
        message: String,
    },
}

impl TestResult {
    /// Returns true if this is a passing result.
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    /// Returns true if this is a failing result.
    pub fn is_fail(&self) -> bool {
        matches!(self, Self::Fail { .. })
    }
}

/// Results from running the corpus.
#[derive(Debug, Default)]
pub struct CorpusResults {
    /// Number of tests that passed.
    pub passed: usize,
    /// Number of tests that failed.
    pub failed: usize,
    /// Number of malformed vectors.
    pub errors: usize,
    /// Detailed results for each test.
    pub details: Vec<(String, TestResult)>,
}

impl CorpusResults {
    /// Create a new empty results container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a test result.
    pub fn record(&mut self, id: &str, result: TestResult) {
        match &result {
            TestResult::Pass => self.passed += 1,
            TestResult::Fail { .. } => self.failed += 1,
            TestResult::Error { .. } => self.errors += 1,
        }
        self.details.push((id.to_string(), result));
    }

    /// Get total number of tests run.
    pub fn total(&self) -> usize {
        self.passed + self.failed + self.errors
    }

    /// Returns true if every vector passed.
    pub fn all_passed(&self) -> bool {
        self.failed == 0 && self.errors == 0
    }

    /// One-line summary.
    pub fn summary(&self) -> String {
        format!(
            "{} passed, {} failed, {} errors (total: {})",
            self.passed,
            self.failed,
            self.errors,
            self.total()
        )
    }

    /// Results that did not pass.
    pub fn failures(&self) -> impl Iterator<Item = &(String, TestResult)> {
        self.details.iter().filter(|(_, r)| !r.is_pass())
    }
}

/// Corpus runner that executes test vectors.
#[derive(Debug)]
pub struct CorpusRunner {
    corpus: Corpus,
}

impl CorpusRunner {
    /// Load corpus from a file path.
    pub fn load<P: AsRef<Path>>(path: P) -> ConformanceResult<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    /// Load corpus from JSON text.
    pub fn from_json(content: &str) -> ConformanceResult<Self> {
        let corpus: Corpus = serde_json::from_str(content)?;
        if corpus.version != CORPUS_VERSION {
            return Err(ConformanceError::UnsupportedVersion(corpus.version));
        }
        tracing::debug!(vectors = corpus.vectors.len(), "corpus loaded");
        Ok(Self { corpus })
    }

    /// Get the number of test vectors.
    pub fn vector_count(&self) -> usize {
        self.corpus.vectors.len()
    }

    /// Run all test vectors and return results.
    pub fn run_all(&self) -> CorpusResults {
        let mut results = CorpusResults::new();
        for vector in &self.corpus.vectors {
            let result = run_vector(vector);
            if !result.is_pass() {
                tracing::debug!(id = %vector.id, ?result, "vector did not pass");
            }
            results.record(&vector.id, result);
        }
        results
    }
}

/// Run one vector through its pipeline and compare.
pub fn run_vector(vector: &TestVector) -> TestResult {
    let limits = vector
        .max_depth
        .map_or_else(Limits::default, Limits::with_max_depth);
    let actual = match vector.pipeline {
        Pipeline::Document => format_document(&vector.input, limits),
        Pipeline::Stream => format_stream(&vector.input, limits),
    };

    match (&vector.expected, actual) {
        (Expected::Ok(want), Ok(got)) if *want == got => TestResult::Pass,
        (Expected::Err(want), Err(got)) if want == got.name() => TestResult::Pass,
        (Expected::Err(want), _) if ErrorCode::from_name(want).is_none() => TestResult::Error {
            message: format!("unknown error name {want:?}"),
        },
        (expected, actual) => TestResult::Fail {
            expected: describe_expected(expected),
            actual: describe_actual(&actual),
        },
    }
}

/// Parse into a tree, then serialize it.
pub fn format_document(input: &str, limits: Limits) -> ParseResult<String> {
    let mut doc = Document::new();
    let mut is = StringReadStream::new(input);
    doc.parse_with_limits(&mut is, limits)?;
    let mut writer = Writer::new(StringWriteStream::new());
    doc.write_to(&mut writer);
    Ok(writer.into_inner().into_string())
}

/// Serialize parser events as they arrive.
pub fn format_stream(input: &str, limits: Limits) -> ParseResult<String> {
    let mut is = StringReadStream::new(input);
    let mut writer = Writer::new(StringWriteStream::new());
    Reader::parse_with_limits(&mut is, &mut writer, limits)?;
    Ok(writer.into_inner().into_string())
}

fn describe_expected(expected: &Expected) -> String {
    match expected {
        Expected::Ok(text) => format!("ok: {text}"),
        Expected::Err(name) => format!("err: {name}"),
    }
}

fn describe_actual(actual: &ParseResult<String>) -> String {
    match actual {
        Ok(text) => format!("ok: {text}"),
        Err(code) => format!("err: {}", code.name()),
    }
}
