//! Configuration Accumulators and the Built Pipeline
//!
//! Two ordered callback lists capture deferred configuration intents:
//!
//! - schema configurators run once per constructed schema
//! - execution configurators run once per request
//!
//! Both are replayed in strict registration order by whatever drives the
//! corresponding phase. Caller-supplied errors propagate unmodified; no
//! callback is caught, wrapped, or retried here.

use std::sync::Arc;

use quiver_domain::{ExecutionOptions, Result, Schema, ServiceProvider};

/// Deferred callback run once per constructed schema
pub type SchemaConfigurator =
    Arc<dyn Fn(&dyn ServiceProvider, &dyn Schema) -> Result<()> + Send + Sync>;

/// Deferred callback run once per request
pub type ExecutionConfigurator = Arc<dyn Fn(&mut ExecutionOptions) -> Result<()> + Send + Sync>;

/// Predicate gating middleware installation, evaluated at schema-build time
pub type InstallPredicate = Arc<dyn Fn(&dyn ServiceProvider, &dyn Schema) -> bool + Send + Sync>;

/// Whether (and when) a registered middleware is installed on the schema
#[derive(Clone)]
pub enum InstallMode {
    /// Register for lookup only; never touch the schema's chain
    Never,
    /// Install unconditionally
    Always,
    /// Install only when the predicate holds at schema-build time
    When(InstallPredicate),
}

impl InstallMode {
    /// Install when `predicate` holds at schema-build time
    pub fn when<F>(predicate: F) -> Self
    where
        F: Fn(&dyn ServiceProvider, &dyn Schema) -> bool + Send + Sync + 'static,
    {
        Self::When(Arc::new(predicate))
    }
}

impl std::fmt::Debug for InstallMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Never => f.write_str("Never"),
            Self::Always => f.write_str("Always"),
            Self::When(_) => f.write_str("When(..)"),
        }
    }
}

/// The frozen configuration handed to the execution engine.
///
/// Immutable after [`build`](crate::builder::PipelineBuilder::build); the
/// engine replays each list exactly once per schema / per request.
pub struct Pipeline {
    schema_configurators: Vec<SchemaConfigurator>,
    execution_configurators: Vec<ExecutionConfigurator>,
}

impl Pipeline {
    pub(crate) fn new(
        schema_configurators: Vec<SchemaConfigurator>,
        execution_configurators: Vec<ExecutionConfigurator>,
    ) -> Self {
        Self {
            schema_configurators,
            execution_configurators,
        }
    }

    /// Run every schema configurator against one schema, in order
    pub fn apply_schema_configuration(
        &self,
        provider: &dyn ServiceProvider,
        schema: &dyn Schema,
    ) -> Result<()> {
        for configurator in &self.schema_configurators {
            configurator(provider, schema)?;
        }
        Ok(())
    }

    /// Run every execution configurator against one request's options, in order
    pub fn apply_execution_configuration(&self, options: &mut ExecutionOptions) -> Result<()> {
        for configurator in &self.execution_configurators {
            configurator(options)?;
        }
        Ok(())
    }

    /// Number of captured schema configurators
    pub fn schema_configurator_count(&self) -> usize {
        self.schema_configurators.len()
    }

    /// Number of captured execution configurators
    pub fn execution_configurator_count(&self) -> usize {
        self.execution_configurators.len()
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("schema_configurators", &self.schema_configurators.len())
            .field("execution_configurators", &self.execution_configurators.len())
            .finish()
    }
}
