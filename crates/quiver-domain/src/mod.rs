//! # Quiver Domain
//!
//! Core contracts for the Quiver query pipeline wiring layer.
//!
//! This crate defines the boundary between the wiring layer and the
//! execution engine it configures. It contains no wiring logic itself:
//! only the service registry capability, the pluggable component ports,
//! the per-request execution options, and the shared error taxonomy.
//!
//! ## Architecture
//!
//! Ports follow the Dependency Inversion Principle:
//! - High-level modules (domain) define interfaces
//! - Low-level modules (wiring, engine adapters) implement them
//!
//! ```text
//! quiver-wiring (builder, registry)      execution engine (external)
//!         │                                       │
//!         ▼                                       ▼
//! ┌──────────────────────────────────────────────────────┐
//! │                    quiver-domain                      │
//! │  ServiceRegister / ServiceProvider   Schema           │
//! │  ServiceLifetime / ResourceOwnership FieldMiddleware  │
//! │  ExecutionOptions                    DocumentListener │
//! │  Error / Result                      DocumentCache …  │
//! └──────────────────────────────────────────────────────┘
//! ```

/// Error handling types
pub mod error;
/// Service lifetimes and lifetime validation
pub mod lifetime;
/// Per-request execution options
pub mod options;
/// Boundary contracts between the wiring layer and external layers
pub mod ports;

// Re-export commonly used types at the crate root
pub use error::{Error, Result};
pub use lifetime::{validate_lifetime, ResourceOwnership, ServiceLifetime};
pub use options::ExecutionOptions;
pub use ports::registry::{
    AnyService, ServiceDescriptor, ServiceKey, ServiceProvider, ServiceProviderExt,
    ServiceRegister, ServiceSource,
};
pub use ports::{
    DocumentCache, DocumentListener, DocumentWriter, ErrorInfo, ErrorInfoOptions,
    ErrorInfoProvider, FieldContext, FieldMiddleware, FieldResolver, GraphType, ParsedDocument,
    Schema,
};
