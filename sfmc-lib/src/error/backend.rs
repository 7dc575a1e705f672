//! Backend error types

/// Errors raised by a [`Backend`](crate::backend::Backend) implementation.
///
/// The query facade never inspects or translates these; they reach the
/// caller exactly as the backend produced them.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// Transport-level failure talking to the vendor endpoint.
    #[error("Network error: {0}")]
    Network(String),

    /// Token acquisition or authorization failed.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// The vendor rejected the request (malformed query, constraint violation).
    #[error("Request rejected: {message}")]
    Rejected {
        /// Vendor status or error code, if available.
        code: Option<String>,
        /// Error message.
        message: String,
    },

    /// The data extension does not exist.
    #[error("Data extension not found: {name}")]
    NotFound { name: String },

    /// Any other backend failure.
    #[error(transparent)]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

impl BackendError {
    /// Creates a new rejection without a vendor code.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            code: None,
            message: message.into(),
        }
    }

    /// Creates a new rejection with a vendor code.
    pub fn rejected_with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Rejected {
            code: Some(code.into()),
            message: message.into(),
        }
    }

    /// Creates a new not-found error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    /// Wraps an arbitrary error.
    pub fn other(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Other(Box::new(err))
    }

    /// Returns the vendor error code if available.
    pub fn error_code(&self) -> Option<&str> {
        match self {
            Self::Rejected { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// Returns `true` if this error is potentially retryable.
    ///
    /// Informational only: nothing in this crate retries.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}
