//! Delete builder

use std::future::Future;
use std::future::IntoFuture;
use std::pin::Pin;

use log::debug;
use log::warn;

use super::query::DeleteRequest;
use super::query::Filter;
use super::query::Operator;
use crate::SfmcClient;
use crate::error::Error;
use crate::error::QueryError;
use crate::model::DataExtension;
use crate::response::Ack;

/// Builder for deleting rows from a data extension.
///
/// Rows matching every filter are removed. A delete without filters would
/// empty the whole data extension, so it is refused with
/// [`QueryError::UnfilteredDelete`] unless confirmed with [`all`](Self::all).
///
/// # Example
///
/// ```ignore
/// // Remove bounced subscribers
/// let ack = client
///     .data_extension("Subscribers")
///     .delete()
///     .and_where("Status", Operator::Equals, "bounced")
///     .await?;
///
/// // Empty the data extension
/// client.data_extension("Staging").delete().all().await?;
/// ```
#[derive(Clone)]
pub struct DeleteBuilder<'a> {
    client: &'a SfmcClient,
    data_extension: DataExtension,
    filters: Vec<Filter>,
    unfiltered_confirmed: bool,
}

impl<'a> DeleteBuilder<'a> {
    pub(crate) fn new(client: &'a SfmcClient, data_extension: DataExtension) -> Self {
        Self {
            client,
            data_extension,
            filters: Vec::new(),
            unfiltered_confirmed: false,
        }
    }

    /// Appends a filter. Filters are ANDed in the order they were added.
    pub fn and_where(
        mut self,
        column: impl Into<String>,
        operator: Operator,
        value: impl Into<String>,
    ) -> Self {
        self.filters.push(Filter::new(column, operator, value));
        self
    }

    /// Appends a filter given as an operator tag.
    pub fn and_where_str(
        self,
        column: impl Into<String>,
        operator: &str,
        value: impl Into<String>,
    ) -> Result<Self, QueryError> {
        let operator = operator.parse()?;
        Ok(self.and_where(column, operator, value))
    }

    /// Confirms that deleting every row is intended when no filter is set.
    pub fn all(mut self) -> Self {
        self.unfiltered_confirmed = true;
        self
    }

    /// Returns the filters appended so far.
    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// Executes the delete.
    pub async fn execute(&self) -> Result<Ack, Error> {
        if self.filters.is_empty() {
            if !self.unfiltered_confirmed {
                return Err(QueryError::unfiltered_delete(self.data_extension.as_str()).into());
            }
            warn!("deleting every row of {}", self.data_extension);
        }
        if self.filters.iter().any(|f| f.column().is_empty()) {
            return Err(QueryError::invalid_argument("filter column name is empty").into());
        }

        let request = DeleteRequest {
            filters: self.filters.clone(),
        };
        debug!("delete {}: {} filters", self.data_extension, request.filters.len());

        let ack = self
            .client
            .backend()
            .delete(&self.data_extension, request)
            .await
            .inspect_err(|e| debug!("delete {} failed: {}", self.data_extension, e))?;

        Ok(ack)
    }
}

impl std::fmt::Debug for DeleteBuilder<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeleteBuilder")
            .field("data_extension", &self.data_extension)
            .field("filters", &self.filters)
            .field("unfiltered_confirmed", &self.unfiltered_confirmed)
            .finish_non_exhaustive()
    }
}

impl<'a> IntoFuture for DeleteBuilder<'a> {
    type Output = Result<Ack, Error>;
    type IntoFuture = Pin<Box<dyn Future<Output = Self::Output> + Send + 'a>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(async move { self.execute().await })
    }
}

impl<'a, 'b> IntoFuture for &'b DeleteBuilder<'a> {
    type Output = Result<Ack, Error>;
    type IntoFuture = Pin<Box<dyn Future<Output = Self::Output> + Send + 'b>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.execute())
    }
}
