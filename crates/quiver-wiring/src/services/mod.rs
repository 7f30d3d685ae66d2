//! Built-in Service Implementations
//!
//! Default and null implementations of the pluggable ports, following
//! the pattern of seeding the container with working baselines that user
//! registrations overwrite.

/// Document caches: null and bounded in-memory
pub mod cache;
/// Error-info provider honoring `ErrorInfoOptions`
pub mod error_info;
/// Field instrumentation middleware
pub mod metrics;
/// JSON document writer
pub mod writer;

pub use cache::{MemoryDocumentCache, NullDocumentCache};
pub use error_info::BasicErrorInfoProvider;
pub use metrics::{FieldStats, InstrumentFieldMiddleware};
pub use writer::JsonDocumentWriter;
