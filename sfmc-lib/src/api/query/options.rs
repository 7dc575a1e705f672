//! Retrieve options forwarded to the backend.

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

/// Sort direction for [`GetOptions::order_by`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    #[serde(rename = "ASC")]
    Asc,
    /// Descending order (Z-A, 9-0).
    #[serde(rename = "DESC")]
    Desc,
}

/// Options attached to a retrieve request.
///
/// This is an opaque bag: the query layer never reads it, it only forwards
/// it to the backend unmodified. Which keys mean something is up to the
/// backend. Helpers are provided for the keys the SOAP retrieve call
/// commonly understands; anything else can be set with [`GetOptions::set`].
///
/// # Example
///
/// ```
/// use sfmc_lib::api::query::{Direction, GetOptions};
///
/// let options = GetOptions::new()
///     .page_size(500)
///     .order_by("CreatedDate", Direction::Desc)
///     .set("clientIds", serde_json::json!([1234]));
///
/// assert_eq!(options.get("pageSize"), Some(&serde_json::json!(500)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GetOptions {
    entries: Map<String, Value>,
}

impl GetOptions {
    /// Creates an empty options bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an arbitrary option.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Maximum number of rows per page.
    pub fn page_size(self, size: u32) -> Self {
        self.set("pageSize", size)
    }

    /// Server-side ordering on a single property.
    pub fn order_by(self, property: impl Into<String>, direction: Direction) -> Self {
        let value = serde_json::json!({
            "property": property.into(),
            "direction": direction,
        });
        self.set("orderBy", value)
    }

    /// Continues a previous retrieve that reported more data available.
    pub fn continue_request(self, request_id: impl Into<String>) -> Self {
        self.set("continueRequest", request_id.into())
    }

    /// Queries across all business units the caller has access to.
    pub fn query_all_accounts(self, enabled: bool) -> Self {
        self.set("queryAllAccounts", enabled)
    }

    /// Returns an option value by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Returns `true` if no option is set.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns all options.
    pub fn entries(&self) -> &Map<String, Value> {
        &self.entries
    }
}
