//! Execution Result Serialization Port

use serde_json::Value;

use crate::error::Result;

/// Serializes an execution result for the transport layer
pub trait DocumentWriter: Send + Sync {
    /// Serialize `result` to its wire representation
    fn write(&self, result: &Value) -> Result<Vec<u8>>;
}
