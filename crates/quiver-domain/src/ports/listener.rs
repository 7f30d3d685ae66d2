//! Document Execution Listener Port
//!
//! Listeners observe the lifecycle of one request. They are resolved from
//! the request's scope by an execution-configuration callback, so a
//! scoped registration yields one listener instance per request.

use async_trait::async_trait;

use crate::error::Result;
use crate::options::ExecutionOptions;

/// Observes the lifecycle of one document execution
#[async_trait]
pub trait DocumentListener: Send + Sync {
    /// Called before the engine starts executing the document
    async fn before_execution(&self, _options: &ExecutionOptions) -> Result<()> {
        Ok(())
    }

    /// Called after the engine finishes executing the document
    async fn after_execution(&self, _options: &ExecutionOptions) -> Result<()> {
        Ok(())
    }
}
