//! Per-Request Execution Options
//!
//! One `ExecutionOptions` value is built per request and handed through
//! the execution-configuration callbacks before the engine starts. The
//! callbacks mutate it in registration order; the engine reads it.

use std::sync::Arc;

use crate::ports::listener::DocumentListener;
use crate::ports::registry::ServiceProvider;

/// Mutable options for one document execution
pub struct ExecutionOptions {
    /// The query text to execute
    pub query: String,
    /// Operation to run when the document contains several
    pub operation_name: Option<String>,
    /// The request's resolution scope
    pub services: Arc<dyn ServiceProvider>,
    /// Listeners notified around this execution, in registration order
    pub listeners: Vec<Arc<dyn DocumentListener>>,
    /// Whether instrumentation middleware records metrics for this request
    pub metrics_enabled: bool,
}

impl ExecutionOptions {
    /// Create options for one request against the given scope
    pub fn new(services: Arc<dyn ServiceProvider>, query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            operation_name: None,
            services,
            listeners: Vec::new(),
            metrics_enabled: false,
        }
    }

    /// Select a named operation within the document
    pub fn with_operation_name(mut self, operation_name: impl Into<String>) -> Self {
        self.operation_name = Some(operation_name.into());
        self
    }
}

impl std::fmt::Debug for ExecutionOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutionOptions")
            .field("query", &self.query)
            .field("operation_name", &self.operation_name)
            .field("listeners", &self.listeners.len())
            .field("metrics_enabled", &self.metrics_enabled)
            .finish_non_exhaustive()
    }
}
