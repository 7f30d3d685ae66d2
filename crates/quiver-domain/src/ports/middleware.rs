//! Field Resolution Middleware Port
//!
//! Middleware installed on a schema wraps every field resolution. The
//! engine drives the chain; the wiring layer only installs it.

use serde_json::Value;

use crate::error::Result;

/// Context for one field resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldContext {
    /// Name of the type the field belongs to
    pub parent_type: String,
    /// Name of the field being resolved
    pub field_name: String,
}

impl FieldContext {
    /// Create a field context
    pub fn new(parent_type: impl Into<String>, field_name: impl Into<String>) -> Self {
        Self {
            parent_type: parent_type.into(),
            field_name: field_name.into(),
        }
    }

    /// `ParentType.field` path used as a metrics key
    pub fn path(&self) -> String {
        format!("{}.{}", self.parent_type, self.field_name)
    }
}

/// The continuation a middleware delegates to
pub type FieldResolver<'a> = &'a dyn Fn(&FieldContext) -> Result<Value>;

/// Middleware wrapping field resolution
pub trait FieldMiddleware: Send + Sync {
    /// Resolve a field, delegating to `next` for the inner chain
    fn resolve_field(&self, ctx: &FieldContext, next: FieldResolver<'_>) -> Result<Value>;
}
