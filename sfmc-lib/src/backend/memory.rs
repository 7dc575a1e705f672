//! In-memory backend using DashMap

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::PoisonError;

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use super::Backend;
use super::eval::matches;
use crate::api::query::CreateRequest;
use crate::api::query::DeleteRequest;
use crate::api::query::Filter;
use crate::api::query::QueryRequest;
use crate::error::BackendError;
use crate::model::DataExtension;
use crate::model::Record;
use crate::model::Row;
use crate::model::RowSet;
use crate::response::Ack;

/// A request received by [`MemoryBackend`], kept for inspection.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    Get(DataExtension, QueryRequest),
    Create(DataExtension, CreateRequest),
    Delete(DataExtension, DeleteRequest),
}

#[derive(Debug, Default)]
struct Table {
    primary_keys: Vec<String>,
    rows: Vec<HashMap<String, String>>,
}

impl Table {
    fn row_matches(row: &HashMap<String, String>, filters: &[Filter]) -> bool {
        filters
            .iter()
            .all(|f| matches(f, row.get(f.column()).map(String::as_str)))
    }

    fn key_of(&self, row: &HashMap<String, String>) -> Vec<String> {
        self.primary_keys
            .iter()
            .map(|k| row.get(k).cloned().unwrap_or_default())
            .collect()
    }
}

/// An in-memory data extension store.
///
/// Tables must be registered with [`MemoryBackend::define`] before use;
/// anything else fails with [`BackendError::NotFound`]. Retrieve options
/// are recorded but not interpreted. Every call is recorded, which makes
/// this backend useful for asserting exactly what the facade sent.
///
/// # Example
///
/// ```
/// use sfmc_lib::backend::MemoryBackend;
/// use sfmc_lib::model::{DataExtension, Record};
///
/// let backend = MemoryBackend::new();
/// backend.define(DataExtension::key("Subscribers"), ["Id"]);
/// backend.insert(
///     &DataExtension::key("Subscribers"),
///     Record::new().key("Id", "1").set("Email", "a@x.com"),
/// );
/// assert_eq!(backend.row_count(&DataExtension::key("Subscribers")), 1);
/// ```
#[derive(Debug, Default)]
pub struct MemoryBackend {
    tables: DashMap<DataExtension, Table>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MemoryBackend {
    /// Creates a new backend with no tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an empty table with the given primary-key columns.
    ///
    /// Redefining an existing table clears it.
    pub fn define<I, S>(&self, data_extension: DataExtension, primary_keys: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let table = Table {
            primary_keys: primary_keys.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        };
        self.tables.insert(data_extension, table);
    }

    /// Inserts a row directly, bypassing validation and call recording.
    ///
    /// Returns `false` if the table does not exist.
    pub fn insert(&self, data_extension: &DataExtension, record: Record) -> bool {
        match self.tables.get_mut(data_extension) {
            Some(mut table) => {
                let row = record
                    .fields()
                    .iter()
                    .map(|f| (f.name.clone(), f.value.clone()))
                    .collect();
                table.rows.push(row);
                true
            }
            None => false,
        }
    }

    /// Returns the number of rows in a table (0 if it does not exist).
    pub fn row_count(&self, data_extension: &DataExtension) -> usize {
        self.tables
            .get(data_extension)
            .map(|t| t.rows.len())
            .unwrap_or(0)
    }

    /// Returns every call received so far, oldest first.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the retrieve requests received so far, oldest first.
    pub fn get_calls(&self) -> Vec<QueryRequest> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                RecordedCall::Get(_, request) => Some(request),
                _ => None,
            })
            .collect()
    }

    /// Forgets all recorded calls.
    pub fn clear_calls(&self) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn record(&self, call: RecordedCall) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn get(
        &self,
        data_extension: &DataExtension,
        request: QueryRequest,
    ) -> Result<RowSet, BackendError> {
        self.record(RecordedCall::Get(data_extension.clone(), request.clone()));

        let table = self
            .tables
            .get(data_extension)
            .ok_or_else(|| BackendError::not_found(data_extension.as_str()))?;

        let rows = table
            .rows
            .iter()
            .filter(|row| Table::row_matches(row, &request.filters))
            .map(|row| {
                request
                    .fields
                    .iter()
                    .map(|f| (f.clone(), row.get(f).cloned().unwrap_or_default()))
                    .collect::<Row>()
            })
            .collect();

        Ok(RowSet::new(rows).with_request_id(Uuid::new_v4().to_string()))
    }

    async fn create(
        &self,
        data_extension: &DataExtension,
        request: CreateRequest,
    ) -> Result<Ack, BackendError> {
        self.record(RecordedCall::Create(data_extension.clone(), request.clone()));

        let mut table = self
            .tables
            .get_mut(data_extension)
            .ok_or_else(|| BackendError::not_found(data_extension.as_str()))?;

        let row: HashMap<String, String> = request
            .fields
            .fields()
            .iter()
            .map(|f| (f.name.clone(), f.value.clone()))
            .collect();

        if !table.primary_keys.is_empty() {
            let key = table.key_of(&row);
            if table.rows.iter().any(|existing| table.key_of(existing) == key) {
                return Err(BackendError::rejected_with_code(
                    "2",
                    format!("Violation of PRIMARY KEY constraint: ({})", key.join(", ")),
                ));
            }
        }

        table.rows.push(row);

        Ok(Ack::ok(1)
            .with_message("Created DataExtensionObject")
            .with_request_id(Uuid::new_v4().to_string()))
    }

    async fn delete(
        &self,
        data_extension: &DataExtension,
        request: DeleteRequest,
    ) -> Result<Ack, BackendError> {
        self.record(RecordedCall::Delete(data_extension.clone(), request.clone()));

        let mut table = self
            .tables
            .get_mut(data_extension)
            .ok_or_else(|| BackendError::not_found(data_extension.as_str()))?;

        let before = table.rows.len();
        table
            .rows
            .retain(|row| !Table::row_matches(row, &request.filters));
        let removed = before - table.rows.len();

        Ok(Ack::ok(removed)
            .with_message("Deleted DataExtensionObject")
            .with_request_id(Uuid::new_v4().to_string()))
    }
}
