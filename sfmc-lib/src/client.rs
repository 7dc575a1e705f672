//! Main SfmcClient

use std::sync::Arc;

use crate::api::query::GetOptions;
use crate::backend::Backend;

/// The main client for querying data extensions.
///
/// This client is cheap to clone (uses `Arc` internally) and can be shared
/// across threads safely. It owns no connection itself: every call is
/// handed to the configured [`Backend`].
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use sfmc_lib::SfmcClient;
/// use sfmc_lib::backend::MemoryBackend;
///
/// let client = SfmcClient::builder()
///     .backend(Arc::new(MemoryBackend::new()))
///     .build();
///
/// let query = client.data_extension("Subscribers").get(["Id", "Email"]);
/// ```
#[derive(Clone)]
pub struct SfmcClient {
    inner: Arc<SfmcClientInner>,
}

struct SfmcClientInner {
    backend: Arc<dyn Backend>,
    default_options: Option<GetOptions>,
}

impl SfmcClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> SfmcClientBuilder<Missing> {
        SfmcClientBuilder::new()
    }

    /// Returns the backend requests are sent to.
    pub fn backend(&self) -> &dyn Backend {
        self.inner.backend.as_ref()
    }

    /// Returns the options applied to retrieves that don't set their own.
    pub fn default_options(&self) -> Option<&GetOptions> {
        self.inner.default_options.as_ref()
    }
}

impl std::fmt::Debug for SfmcClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SfmcClient")
            .field("default_options", &self.inner.default_options)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing a [`SfmcClient`].
///
/// Uses the typestate pattern to ensure the backend is set at compile time.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use sfmc_lib::SfmcClient;
/// use sfmc_lib::api::query::GetOptions;
/// use sfmc_lib::backend::MemoryBackend;
///
/// let client = SfmcClient::builder()
///     .backend(Arc::new(MemoryBackend::new()))
///     .default_options(GetOptions::new().query_all_accounts(true))
///     .build();
///
/// assert!(client.default_options().is_some());
/// ```
pub struct SfmcClientBuilder<B> {
    backend: B,
    default_options: Option<GetOptions>,
}

impl SfmcClientBuilder<Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            backend: Missing,
            default_options: None,
        }
    }

    /// Sets the backend all requests are sent to.
    pub fn backend<T: Backend + 'static>(
        self,
        backend: Arc<T>,
    ) -> SfmcClientBuilder<Set<Arc<dyn Backend>>> {
        SfmcClientBuilder {
            backend: Set(backend as Arc<dyn Backend>),
            default_options: self.default_options,
        }
    }
}

impl Default for SfmcClientBuilder<Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B> SfmcClientBuilder<B> {
    /// Sets options applied to every retrieve started with `get`.
    ///
    /// Retrieves started with `get_with` use their own options instead.
    pub fn default_options(mut self, options: GetOptions) -> Self {
        self.default_options = Some(options);
        self
    }
}

impl SfmcClientBuilder<Set<Arc<dyn Backend>>> {
    /// Builds the [`SfmcClient`].
    ///
    /// This method is only available once a backend has been set.
    pub fn build(self) -> SfmcClient {
        SfmcClient {
            inner: Arc::new(SfmcClientInner {
                backend: self.backend.0,
                default_options: self.default_options,
            }),
        }
    }
}
