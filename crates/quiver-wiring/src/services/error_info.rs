//! Basic Error-Info Provider
//!
//! Maps errors to wire payloads, honoring the independently registered
//! `ErrorInfoOptions` binding.

use quiver_domain::{Error, ErrorInfo, ErrorInfoOptions, ErrorInfoProvider};
use serde_json::{Map, Value};

/// Default payload builder: message always, code and extensions per options
#[derive(Debug, Clone, Default)]
pub struct BasicErrorInfoProvider {
    options: ErrorInfoOptions,
}

impl BasicErrorInfoProvider {
    /// Provider honoring the given options
    pub fn new(options: ErrorInfoOptions) -> Self {
        Self { options }
    }
}

impl ErrorInfoProvider for BasicErrorInfoProvider {
    fn error_info(&self, error: &Error) -> ErrorInfo {
        let mut info = ErrorInfo::message_only(error.to_string());
        if self.options.expose_code {
            info.code = Some(error.code().to_string());
        }
        if self.options.expose_extensions {
            let mut extensions = Map::new();
            extensions.insert("code".to_string(), Value::String(error.code().to_string()));
            if let Some(source) = std::error::Error::source(error) {
                extensions.insert("source".to_string(), Value::String(source.to_string()));
            }
            info.extensions = Some(extensions);
        }
        info
    }
}
