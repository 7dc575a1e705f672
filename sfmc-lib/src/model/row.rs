//! Result rows

use serde::Deserialize;
use serde::Serialize;

/// A single result row.
///
/// Columns appear in the order the query requested them. Values are the
/// strings the vendor returns; an absent value is an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    properties: Vec<(String, String)>,
}

impl Row {
    /// Creates a new empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a column (builder pattern).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.push((name.into(), value.into()));
        self
    }

    /// Returns a column value by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the column names in order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().map(|(n, _)| n.as_str())
    }

    /// Returns all columns with their values, in order.
    pub fn properties(&self) -> &[(String, String)] {
        &self.properties
    }

    /// Returns the number of columns.
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Returns `true` if the row has no columns.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl FromIterator<(String, String)> for Row {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            properties: iter.into_iter().collect(),
        }
    }
}

/// The complete result of a retrieve.
///
/// A retrieve either yields every requested row or fails; there are no
/// partial results. When the vendor caps the page, `more_data_available`
/// is set and `request_id` can be passed to
/// [`GetOptions::continue_request`](crate::api::query::GetOptions::continue_request).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowSet {
    rows: Vec<Row>,
    more_data_available: bool,
    request_id: Option<String>,
}

impl RowSet {
    /// Creates a complete row set.
    pub fn new(rows: Vec<Row>) -> Self {
        Self {
            rows,
            more_data_available: false,
            request_id: None,
        }
    }

    /// Sets the vendor request ID.
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Marks the row set as one page of a larger result.
    pub fn with_more_data(mut self) -> Self {
        self.more_data_available = true;
        self
    }

    /// Returns the rows.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Consumes the row set and returns the rows.
    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    /// Returns `true` if the vendor has more rows for this request.
    pub fn more_data_available(&self) -> bool {
        self.more_data_available
    }

    /// Returns the vendor request ID, if any.
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl IntoIterator for RowSet {
    type Item = Row;
    type IntoIter = std::vec::IntoIter<Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}
