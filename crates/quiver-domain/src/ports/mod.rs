//! Domain Port Interfaces
//!
//! Defines all boundary contracts between the wiring layer and external
//! layers. Ports are organized by their purpose and enable dependency
//! injection with clear separation of concerns.
//!
//! ## Organization
//!
//! - **registry** - the service registry capability (register / resolve)
//! - **schema** - the mutable schema surface configured at build time
//! - **middleware** - field resolution middleware
//! - **listener** - per-request document execution listeners
//! - **cache** - parsed document caching
//! - **writer** - execution result serialization
//! - **error_info** - wire-format error payload construction
//! - **graph_type** - the graph type capability used by bulk registration

/// Parsed document caching port
pub mod cache;
/// Wire-format error payload construction port
pub mod error_info;
/// Graph type capability
pub mod graph_type;
/// Per-request document execution listener port
pub mod listener;
/// Field resolution middleware port
pub mod middleware;
/// Service registry capability
pub mod registry;
/// Mutable schema surface
pub mod schema;
/// Execution result serialization port
pub mod writer;

// Re-export commonly used port traits for convenience
pub use cache::{DocumentCache, ParsedDocument};
pub use error_info::{ErrorInfo, ErrorInfoOptions, ErrorInfoProvider};
pub use graph_type::GraphType;
pub use listener::DocumentListener;
pub use middleware::{FieldContext, FieldMiddleware, FieldResolver};
pub use schema::Schema;
pub use writer::DocumentWriter;
