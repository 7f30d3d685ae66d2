//! Mutable Schema Surface
//!
//! The schema itself belongs to the execution engine; this port is the
//! slice of it the wiring layer configures. Schema-configuration
//! callbacks receive `&dyn Schema` and mutate it through interior
//! mutability, because the same schema instance is shared with the
//! engine as `Arc<dyn Schema>`.

use std::sync::Arc;

use super::middleware::FieldMiddleware;
use super::registry::ServiceKey;

/// The configurable surface of an engine schema
pub trait Schema: Send + Sync {
    /// Name of this schema, for diagnostics
    fn schema_name(&self) -> &str;

    /// Append a middleware to the end of the field middleware chain
    fn install_middleware(&self, middleware: Arc<dyn FieldMiddleware>);

    /// The middleware chain in installation order
    fn installed_middleware(&self) -> Vec<Arc<dyn FieldMiddleware>>;

    /// Map a host type to the graph type that represents it
    fn register_type_mapping(&self, host: ServiceKey, graph: ServiceKey);

    /// All registered type mappings in registration order
    fn type_mappings(&self) -> Vec<(ServiceKey, ServiceKey)>;
}
