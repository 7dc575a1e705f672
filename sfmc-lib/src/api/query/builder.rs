//! Deferred retrieve builder.

use std::future::Future;
use std::future::IntoFuture;
use std::pin::Pin;

use log::debug;
use log::trace;

use super::Filter;
use super::GetOptions;
use super::Operator;
use super::QueryRequest;
use crate::SfmcClient;
use crate::error::Error;
use crate::error::QueryError;
use crate::model::DataExtension;
use crate::model::Row;
use crate::model::RowSet;

/// Where a [`QueryBuilder`] is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStage {
    /// Fields selected, no filter yet.
    Created,
    /// At least one filter appended.
    Filtered(usize),
}

/// Builder for a retrieve against one data extension.
///
/// Use [`DataExtensionQuery::get`](crate::api::DataExtensionQuery::get) to
/// create one. Chaining never performs I/O; the backend is called only when
/// the builder is awaited or [`execute`](Self::execute) is called.
///
/// Awaiting consumes the builder. Awaiting a reference instead (`(&query).await`)
/// leaves it usable, and every such await issues a new backend call: results
/// are never cached.
///
/// Each builder owns its filter list. Cloning a builder and extending both
/// copies yields two independent queries.
///
/// # Example
///
/// ```ignore
/// let rows = client
///     .data_extension("Subscribers")
///     .get(["Id", "Email"])
///     .and_where("Email", Operator::Equals, "a@x.com")
///     .and_where("Status", Operator::NotEquals, "bounced")
///     .await?;
///
/// for row in rows {
///     println!("{:?}", row.get("Email"));
/// }
/// ```
#[derive(Clone)]
pub struct QueryBuilder<'a> {
    client: &'a SfmcClient,
    data_extension: DataExtension,
    fields: Vec<String>,
    filters: Vec<Filter>,
    options: Option<GetOptions>,
}

impl<'a> QueryBuilder<'a> {
    pub(crate) fn new(
        client: &'a SfmcClient,
        data_extension: DataExtension,
        fields: Vec<String>,
        options: Option<GetOptions>,
    ) -> Self {
        Self {
            client,
            data_extension,
            fields,
            filters: Vec::new(),
            options,
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
    ///
    /// Fails with [`QueryError::InvalidOperator`] if the tag is not supported.
    pub fn and_where_str(
        self,
        column: impl Into<String>,
        operator: &str,
        value: impl Into<String>,
    ) -> Result<Self, QueryError> {
        let operator = operator.parse()?;
        Ok(self.and_where(column, operator, value))
    }

    /// Appends an already built filter.
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Returns the data extension being queried.
    pub fn data_extension(&self) -> &DataExtension {
        &self.data_extension
    }

    /// Returns the selected fields, in result column order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Returns the filters appended so far.
    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// Returns the retrieve options, if any.
    pub fn options(&self) -> Option<&GetOptions> {
        self.options.as_ref()
    }

    /// Returns the lifecycle stage.
    pub fn stage(&self) -> QueryStage {
        match self.filters.len() {
            0 => QueryStage::Created,
            n => QueryStage::Filtered(n),
        }
    }

    /// Builds the request that [`execute`](Self::execute) would send.
    ///
    /// An empty field list, an empty field name or an empty filter column is
    /// rejected with [`QueryError::InvalidArgument`].
    pub fn materialize(&self) -> Result<QueryRequest, Error> {
        if self.fields.is_empty() {
            return Err(QueryError::invalid_argument(format!(
                "no fields selected from '{}'",
                self.data_extension.as_str()
            ))
            .into());
        }
        if self.fields.iter().any(String::is_empty) {
            return Err(QueryError::invalid_argument("field name is empty").into());
        }
        if self.filters.iter().any(|f| f.column().is_empty()) {
            return Err(QueryError::invalid_argument("filter column name is empty").into());
        }

        Ok(QueryRequest {
            fields: self.fields.clone(),
            filters: self.filters.clone(),
            options: self.options.clone(),
        })
    }

    /// Executes the query.
    ///
    /// Every call issues exactly one backend retrieve. Backend errors are
    /// returned unchanged.
    pub async fn execute(&self) -> Result<RowSet, Error> {
        let request = self.materialize()?;

        debug!(
            "retrieve {}: {} fields, {} filters",
            self.data_extension,
            request.fields.len(),
            request.filters.len()
        );
        trace!("retrieve request: {:?}", request);

        let rows = self
            .client
            .backend()
            .get(&self.data_extension, request)
            .await
            .inspect_err(|e| debug!("retrieve {} failed: {}", self.data_extension, e))?;

        debug!("retrieve {}: {} rows", self.data_extension, rows.len());
        Ok(rows)
    }

    /// Executes the query and returns the first row.
    pub async fn first(&self) -> Result<Option<Row>, Error> {
        let rows = self.execute().await?;
        Ok(rows.into_iter().next())
    }
}

impl std::fmt::Debug for QueryBuilder<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryBuilder")
            .field("data_extension", &self.data_extension)
            .field("fields", &self.fields)
            .field("filters", &self.filters)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<'a> IntoFuture for QueryBuilder<'a> {
    type Output = Result<RowSet, Error>;
    type IntoFuture = Pin<Box<dyn Future<Output = Self::Output> + Send + 'a>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(async move { self.execute().await })
    }
}

impl<'a, 'b> IntoFuture for &'b QueryBuilder<'a> {
    type Output = Result<RowSet, Error>;
    type IntoFuture = Pin<Box<dyn Future<Output = Self::Output> + Send + 'b>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.execute())
    }
}
