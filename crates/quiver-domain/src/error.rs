//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the Quiver wiring layer
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration-time contract violation, raised synchronously at the
    /// offending builder call. Fail-fast and non-recoverable.
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration {
        /// Description of the configuration violation
        message: String,
    },

    /// No binding exists for the requested service key
    #[error("Service not registered: {service}")]
    NotRegistered {
        /// Type name of the missing service
        service: &'static str,
    },

    /// A binding exists but holds a different type than the caller asked for
    #[error("Service type mismatch for {service}: stored value is not a {expected}")]
    TypeMismatch {
        /// Type name of the service key that was resolved
        service: &'static str,
        /// Type name the caller expected
        expected: &'static str,
    },

    /// JSON serialization error
    #[error("Serialization error: {source}")]
    Serialization {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// Failure raised by a caller-supplied factory, predicate, or
    /// configuration callback. Propagated verbatim to the invoking phase.
    #[error("Execution error: {message}")]
    Execution {
        /// Description of the failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl Error {
    /// Create an invalid configuration error
    pub fn invalid_configuration<S: Into<String>>(message: S) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }

    /// Create a not-registered error for the given service type name
    pub fn not_registered(service: &'static str) -> Self {
        Self::NotRegistered { service }
    }

    /// Create a type mismatch error
    pub fn type_mismatch(service: &'static str, expected: &'static str) -> Self {
        Self::TypeMismatch { service, expected }
    }

    /// Create an execution error
    pub fn execution<S: Into<String>>(message: S) -> Self {
        Self::Execution {
            message: message.into(),
            source: None,
        }
    }

    /// Create an execution error with source
    pub fn execution_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Execution {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Stable machine-readable code for this error, used by error-info
    /// providers when building wire-format error payloads.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidConfiguration { .. } => "INVALID_CONFIGURATION",
            Self::NotRegistered { .. } => "NOT_REGISTERED",
            Self::TypeMismatch { .. } => "TYPE_MISMATCH",
            Self::Serialization { .. } => "SERIALIZATION",
            Self::Execution { .. } => "EXECUTION",
        }
    }
}
