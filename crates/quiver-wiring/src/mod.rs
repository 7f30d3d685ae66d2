//! # Quiver Wiring
//!
//! Service wiring for a graph query execution pipeline: a fluent
//! configuration builder that binds pluggable components (schema, field
//! middleware, document listeners, document cache, document writer,
//! error-info provider, metrics) into a service registry and two ordered
//! lists of deferred configuration callbacks.
//!
//! ## Architecture
//!
//! ```text
//! PipelineBuilder ──registers──► ServiceRegister (port)
//!       │                              ▲
//!       │ appends                      │ implements
//!       ▼                              │
//!   Pipeline                    ServiceRegistry ──► ServiceScope
//!   ├── schema configurators    (root instance       (per request)
//!   │   (once per schema)        caches)
//!   └── execution configurators
//!       (once per request)
//! ```
//!
//! This crate contains ONLY wiring logic. Query execution, type
//! resolution, and object-graph construction belong to the engine.
//!
//! ## Usage
//!
//! ```
//! use std::sync::Arc;
//! use quiver_wiring::builder::PipelineBuilder;
//! use quiver_wiring::registry::ServiceRegistry;
//! # use quiver_wiring::domain::{Result, ResourceOwnership, Schema, ServiceLifetime};
//! # #[derive(Default)]
//! # struct AppSchema(std::sync::RwLock<Vec<(quiver_wiring::domain::ServiceKey, quiver_wiring::domain::ServiceKey)>>, std::sync::RwLock<Vec<std::sync::Arc<dyn quiver_wiring::domain::FieldMiddleware>>>);
//! # impl ResourceOwnership for AppSchema {}
//! # impl Schema for AppSchema {
//! #     fn schema_name(&self) -> &str { "app" }
//! #     fn install_middleware(&self, m: std::sync::Arc<dyn quiver_wiring::domain::FieldMiddleware>) { self.1.write().unwrap().push(m); }
//! #     fn installed_middleware(&self) -> Vec<std::sync::Arc<dyn quiver_wiring::domain::FieldMiddleware>> { self.1.read().unwrap().clone() }
//! #     fn register_type_mapping(&self, h: quiver_wiring::domain::ServiceKey, g: quiver_wiring::domain::ServiceKey) { self.0.write().unwrap().push((h, g)); }
//! #     fn type_mappings(&self) -> Vec<(quiver_wiring::domain::ServiceKey, quiver_wiring::domain::ServiceKey)> { self.0.read().unwrap().clone() }
//! # }
//! # fn main() -> Result<()> {
//! let registry = Arc::new(ServiceRegistry::new());
//! let pipeline = PipelineBuilder::new(registry.clone())
//!     .add_schema::<AppSchema>(ServiceLifetime::Singleton)?
//!     .add_metrics()
//!     .build();
//! # let _ = pipeline;
//! # Ok(())
//! # }
//! ```

/// Fluent pipeline configuration builder
pub mod builder;
/// Configuration-time graph type enumeration
pub mod catalog;
/// Service registry implementations
pub mod registry;
/// Built-in implementations of the pluggable ports
pub mod services;

/// Domain layer re-export for convenience
pub mod domain {
    pub use quiver_domain::*;
}

// Re-export the primary entry points at the crate root
pub use builder::{InstallMode, Pipeline, PipelineBuilder};
pub use catalog::{TypeCatalog, GRAPH_TYPES};
pub use registry::{ServiceRegistry, ServiceScope};
