//! JSON Document Writer

use quiver_domain::{DocumentWriter, Result};
use serde_json::Value;

/// Serializes execution results as JSON, compact by default
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDocumentWriter {
    pretty: bool,
}

impl JsonDocumentWriter {
    /// Compact output
    pub fn new() -> Self {
        Self::default()
    }

    /// Human-readable indented output
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl DocumentWriter for JsonDocumentWriter {
    fn write(&self, result: &Value) -> Result<Vec<u8>> {
        let bytes = if self.pretty {
            serde_json::to_vec_pretty(result)?
        } else {
            serde_json::to_vec(result)?
        };
        Ok(bytes)
    }
}
