//! Per-data-extension entry point: get, create, delete
//!
//! # Example
//!
//! ```ignore
//! use sfmc_lib::api::query::Operator;
//! use sfmc_lib::model::Record;
//!
//! let subscribers = client.data_extension("Subscribers");
//!
//! // Deferred retrieve, runs on await
//! let rows = subscribers
//!     .get(["Id", "Email"])
//!     .and_where("Status", Operator::Equals, "active")
//!     .await?;
//!
//! // Insert
//! subscribers
//!     .create(Record::new().key("Id", "42").set("Email", "a@x.com"))
//!     .await?;
//! ```

use log::debug;
use log::trace;

use super::delete::DeleteBuilder;
use super::query::CreateRequest;
use super::query::GetOptions;
use super::query::QueryBuilder;
use crate::SfmcClient;
use crate::error::Error;
use crate::model::DataExtension;
use crate::model::Record;
use crate::response::Ack;

impl SfmcClient {
    /// Returns the query facade for a data extension.
    ///
    /// Plain strings are taken as external keys; use
    /// [`DataExtension::name`] to address one by name.
    pub fn data_extension(&self, data_extension: impl Into<DataExtension>) -> DataExtensionQuery<'_> {
        DataExtensionQuery {
            client: self,
            data_extension: data_extension.into(),
        }
    }
}

/// Query facade for one data extension.
///
/// Created with [`SfmcClient::data_extension`]. The facade holds no query
/// state of its own: every [`get`](Self::get) starts a fresh builder and
/// every [`delete`](Self::delete) starts a fresh delete builder.
#[derive(Debug, Clone)]
pub struct DataExtensionQuery<'a> {
    client: &'a SfmcClient,
    data_extension: DataExtension,
}

impl<'a> DataExtensionQuery<'a> {
    /// Returns the data extension this facade targets.
    pub fn data_extension(&self) -> &DataExtension {
        &self.data_extension
    }

    /// Starts a retrieve of the given fields.
    ///
    /// The field order is the column order of the result rows. Uses the
    /// client's default options, if configured. An empty field list is
    /// rejected when the query runs.
    pub fn get<I, S>(&self, fields: I) -> QueryBuilder<'a>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let options = self.client.default_options().cloned();
        self.build_query(fields, options)
    }

    /// Starts a retrieve of the given fields with explicit options.
    pub fn get_with<I, S>(&self, fields: I, options: GetOptions) -> QueryBuilder<'a>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.build_query(fields, Some(options))
    }

    fn build_query<I, S>(&self, fields: I, options: Option<GetOptions>) -> QueryBuilder<'a>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields = fields.into_iter().map(Into::into).collect();
        QueryBuilder::new(self.client, self.data_extension.clone(), fields, options)
    }

    /// Inserts a record.
    ///
    /// The record must carry at least one primary-key field; otherwise this
    /// fails with [`QueryError::MissingPrimaryKey`](crate::error::QueryError::MissingPrimaryKey)
    /// without contacting the backend.
    pub async fn create(&self, record: Record) -> Result<Ack, Error> {
        record.validate(self.data_extension.as_str())?;

        debug!("create {}: {} fields", self.data_extension, record.len());
        trace!("create record: {:?}", record);

        let ack = self
            .client
            .backend()
            .create(&self.data_extension, CreateRequest { fields: record })
            .await
            .inspect_err(|e| debug!("create {} failed: {}", self.data_extension, e))?;

        Ok(ack)
    }

    /// Starts a delete.
    ///
    /// Add filters with [`DeleteBuilder::and_where`], or confirm a delete of
    /// every row with [`DeleteBuilder::all`], then await it.
    pub fn delete(&self) -> DeleteBuilder<'a> {
        DeleteBuilder::new(self.client, self.data_extension.clone())
    }
}
