//! Parsed Document Cache Port

use std::sync::Arc;

/// A parsed query document, opaque to the wiring layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDocument {
    /// The original query text
    pub source: String,
    /// Number of operations the parser found in the document
    pub operation_count: usize,
}

impl ParsedDocument {
    /// Create a single-operation document from query text
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            operation_count: 1,
        }
    }
}

/// Caches parsed documents keyed by their query text
pub trait DocumentCache: Send + Sync {
    /// Look up the parsed form of `query`
    fn get(&self, query: &str) -> Option<Arc<ParsedDocument>>;

    /// Store the parsed form of `query`
    fn set(&self, query: &str, document: Arc<ParsedDocument>);
}
