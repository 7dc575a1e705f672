//! Requests handed to the backend.
//!
//! Each request is built fresh for a single backend call and owned by the
//! backend from then on; builders never hold on to it.

use serde::Deserialize;
use serde::Serialize;

use super::Filter;
use super::GetOptions;
use crate::model::Record;

/// A materialized retrieve.
///
/// `fields` is the column order of the result rows. `filters` are ANDed,
/// in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub fields: Vec<String>,
    pub filters: Vec<Filter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<GetOptions>,
}

/// A validated insert of one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRequest {
    pub fields: Record,
}

/// A delete of the rows matching every filter.
///
/// An empty filter list deletes every row; the facade only builds one after
/// the caller confirmed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteRequest {
    pub filters: Vec<Filter>,
}

impl DeleteRequest {
    /// Returns `true` if this request removes every row.
    pub fn is_unfiltered(&self) -> bool {
        self.filters.is_empty()
    }
}
