//! Field Instrumentation Middleware
//!
//! The built-in middleware wired by the metrics operations. It times
//! every field resolution it wraps and keeps per-field aggregates in a
//! concurrent map keyed by `ParentType.field`.
//!
//! Installation on the schema and per-request metrics recording are
//! independent gates: this middleware may be installed while a request
//! has metrics disabled, in which case the engine simply skips reading
//! the aggregates.

use std::time::{Duration, Instant};

use dashmap::DashMap;
use quiver_domain::{FieldContext, FieldMiddleware, Result};
use serde_json::Value;
use tracing::trace;

/// Aggregated timings for one field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldStats {
    /// Number of resolutions observed
    pub count: u64,
    /// Total time spent resolving the field
    pub total: Duration,
}

/// Times field resolutions into a per-field aggregate table
#[derive(Debug, Default)]
pub struct InstrumentFieldMiddleware {
    timings: DashMap<String, FieldStats>,
}

impl InstrumentFieldMiddleware {
    /// Create an instrumentation middleware with an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the aggregate table
    pub fn snapshot(&self) -> Vec<(String, FieldStats)> {
        self.timings
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect()
    }

    /// Aggregates for one field path, if observed
    pub fn stats_for(&self, path: &str) -> Option<FieldStats> {
        self.timings.get(path).map(|entry| *entry.value())
    }
}

impl FieldMiddleware for InstrumentFieldMiddleware {
    fn resolve_field(
        &self,
        ctx: &FieldContext,
        next: &dyn Fn(&FieldContext) -> Result<Value>,
    ) -> Result<Value> {
        let started = Instant::now();
        let result = next(ctx);
        let elapsed = started.elapsed();

        let mut stats = self.timings.entry(ctx.path()).or_default();
        stats.count += 1;
        stats.total += elapsed;
        trace!("resolved {} in {:?}", ctx.path(), elapsed);

        result
    }
}
