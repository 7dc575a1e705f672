//! Error types

mod backend;
mod query;

pub use backend::*;
pub use query::*;

/// Top-level error returned by every fallible operation in this crate.
///
/// Query-construction problems are reported as [`QueryError`] and are always
/// raised before the backend is contacted. Whatever the backend raises is
/// passed through untouched as [`BackendError`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The query, record or delete request was rejected locally.
    #[error(transparent)]
    Query(#[from] QueryError),

    /// The backend collaborator failed.
    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl Error {
    /// Returns the local query error, if this is one.
    pub fn as_query(&self) -> Option<&QueryError> {
        match self {
            Self::Query(e) => Some(e),
            Self::Backend(_) => None,
        }
    }

    /// Returns the backend error, if this is one.
    pub fn as_backend(&self) -> Option<&BackendError> {
        match self {
            Self::Backend(e) => Some(e),
            Self::Query(_) => None,
        }
    }
}
