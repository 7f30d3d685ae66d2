//! Graph Type Capability
//!
//! The minimal surface the wiring layer needs from the engine's type
//! system: a name. Bulk registration binds concrete graph types under
//! their own keys, resolvable as `Arc<dyn GraphType>`.

/// A type participating in the engine's schema
pub trait GraphType: Send + Sync {
    /// The type's name as it appears in the schema
    fn type_name(&self) -> &str;
}
