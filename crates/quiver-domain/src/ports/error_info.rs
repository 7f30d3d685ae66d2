//! Wire-Format Error Payload Construction
//!
//! An error-info provider decides what an `Error` looks like on the wire.
//! The provider and its options are two independent bindings: the
//! concrete provider resolves its options at construction time.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Error;

/// Wire-format representation of one error
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorInfo {
    /// Human-readable message
    pub message: String,
    /// Stable machine-readable code, when exposed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Additional structured detail, when exposed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Map<String, Value>>,
}

impl ErrorInfo {
    /// A message-only payload
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
            extensions: None,
        }
    }
}

/// Controls how much detail error payloads expose
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfoOptions {
    /// Include the stable error code
    pub expose_code: bool,
    /// Include structured extensions
    pub expose_extensions: bool,
}

impl Default for ErrorInfoOptions {
    fn default() -> Self {
        Self {
            expose_code: true,
            expose_extensions: false,
        }
    }
}

/// Builds wire-format payloads from errors
pub trait ErrorInfoProvider: Send + Sync {
    /// The payload for `error`
    fn error_info(&self, error: &Error) -> ErrorInfo;
}
