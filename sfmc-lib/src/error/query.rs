//! Query construction and validation errors

/// Errors raised while building or validating a request, before any
/// backend call is made.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// The comparison operator is not one of the supported tags.
    #[error("Invalid operator '{operator}'")]
    InvalidOperator { operator: String },

    /// An empty or malformed field list, field name or column name.
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// A create request without any primary-key field.
    #[error("Record for '{data_extension}' has no primary key field")]
    MissingPrimaryKey { data_extension: String },

    /// A delete without filters that was not confirmed with `all()`.
    #[error("Unfiltered delete on '{data_extension}' must be confirmed with all()")]
    UnfilteredDelete { data_extension: String },
}

impl QueryError {
    /// Creates a new invalid operator error.
    pub fn invalid_operator(operator: impl Into<String>) -> Self {
        Self::InvalidOperator {
            operator: operator.into(),
        }
    }

    /// Creates a new invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Creates a new missing primary key error.
    pub fn missing_primary_key(data_extension: impl Into<String>) -> Self {
        Self::MissingPrimaryKey {
            data_extension: data_extension.into(),
        }
    }

    /// Creates a new unfiltered delete error.
    pub fn unfiltered_delete(data_extension: impl Into<String>) -> Self {
        Self::UnfilteredDelete {
            data_extension: data_extension.into(),
        }
    }
}
