//! Document Cache Implementations

use std::sync::Arc;

use quiver_domain::{DocumentCache, ParsedDocument};

/// Caches nothing; the baseline the builder seeds by default
#[derive(Debug, Clone, Copy, Default)]
pub struct NullDocumentCache;

impl DocumentCache for NullDocumentCache {
    fn get(&self, _query: &str) -> Option<Arc<ParsedDocument>> {
        None
    }

    fn set(&self, _query: &str, _document: Arc<ParsedDocument>) {}
}

/// Bounded in-memory cache backed by moka
pub struct MemoryDocumentCache {
    inner: moka::sync::Cache<String, Arc<ParsedDocument>>,
}

impl MemoryDocumentCache {
    /// Cache holding at most `max_capacity` documents
    pub fn new(max_capacity: u64) -> Self {
        Self {
            inner: moka::sync::Cache::new(max_capacity),
        }
    }
}

impl Default for MemoryDocumentCache {
    fn default() -> Self {
        Self::new(1024)
    }
}

impl DocumentCache for MemoryDocumentCache {
    fn get(&self, query: &str) -> Option<Arc<ParsedDocument>> {
        self.inner.get(query)
    }

    fn set(&self, query: &str, document: Arc<ParsedDocument>) {
        self.inner.insert(query.to_string(), document);
    }
}

impl std::fmt::Debug for MemoryDocumentCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryDocumentCache")
            .field("entries", &self.inner.entry_count())
            .finish()
    }
}
