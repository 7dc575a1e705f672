//! Backend collaborator
//!
//! The query facade never talks to the vendor itself. It hands fully built
//! requests to a [`Backend`], which owns authentication, SOAP
//! serialization, escaping and transport. [`MemoryBackend`] is an
//! in-process implementation for tests and demos.

mod eval;
mod memory;

pub use eval::matches;
pub use memory::*;

use async_trait::async_trait;

use crate::api::query::CreateRequest;
use crate::api::query::DeleteRequest;
use crate::api::query::QueryRequest;
use crate::error::BackendError;
use crate::model::DataExtension;
use crate::model::RowSet;
use crate::response::Ack;

/// Trait for the data extension backend.
///
/// Each method is called at most once per facade operation and receives a
/// request built for that call alone. Implementations own:
/// - Authentication and token refresh
/// - Mapping requests to the vendor wire format
/// - Retries, if any (the facade never retries)
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use sfmc_lib::backend::Backend;
///
/// struct SoapBackend { /* transport, token provider */ }
///
/// #[async_trait]
/// impl Backend for SoapBackend {
///     async fn get(&self, de: &DataExtension, request: QueryRequest) -> Result<RowSet, BackendError> {
///         // Build a RetrieveRequest for DataExtensionObject[de] ...
///         todo!()
///     }
///     // ...
/// }
/// ```
#[async_trait]
pub trait Backend: Send + Sync {
    /// Retrieves the rows of `data_extension` matching the request.
    async fn get(
        &self,
        data_extension: &DataExtension,
        request: QueryRequest,
    ) -> Result<RowSet, BackendError>;

    /// Inserts one record.
    async fn create(
        &self,
        data_extension: &DataExtension,
        request: CreateRequest,
    ) -> Result<Ack, BackendError>;

    /// Deletes the rows matching the request.
    async fn delete(
        &self,
        data_extension: &DataExtension,
        request: DeleteRequest,
    ) -> Result<Ack, BackendError>;
}
