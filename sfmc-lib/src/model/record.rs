//! Record payload for create requests

use std::collections::HashSet;

use serde::Deserialize;
use serde::Serialize;

use crate::error::QueryError;

/// A single field value in a [`Record`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    /// Column name.
    pub name: String,
    /// Value, as sent to the vendor.
    pub value: String,
    /// Whether this column is part of the data extension's primary key.
    pub primary_key: bool,
}

/// A row to insert into a data extension.
///
/// Fields keep the order they were added in. At least one field must be
/// marked as a primary key, which [`Record::validate`] checks before the
/// request leaves the client.
///
/// # Example
///
/// ```
/// use sfmc_lib::model::Record;
///
/// let record = Record::new()
///     .key("SubscriberKey", "0031t00000AbCdE")
///     .set("Email", "a@x.com")
///     .set("Status", "active");
///
/// assert_eq!(record.get("Email"), Some("a@x.com"));
/// assert_eq!(record.primary_keys().count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: Vec<Field>,
}

impl Record {
    /// Creates a new empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a primary-key field (builder pattern).
    pub fn key(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(Field {
            name: name.into(),
            value: value.into(),
            primary_key: true,
        });
        self
    }

    /// Adds a regular field (builder pattern).
    pub fn set(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(Field {
            name: name.into(),
            value: value.into(),
            primary_key: false,
        });
        self
    }

    /// Appends a field.
    pub fn push(&mut self, field: Field) {
        self.fields.push(field);
    }

    /// Returns the value of a field, if present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }

    /// Returns all fields in insertion order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Returns the primary-key fields.
    pub fn primary_keys(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| f.primary_key)
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Checks the record is fit to send.
    ///
    /// Field names must be non-empty and unique, and at least one field must
    /// be a primary key.
    pub fn validate(&self, data_extension: &str) -> Result<(), QueryError> {
        let mut seen = HashSet::new();
        for field in &self.fields {
            if field.name.is_empty() {
                return Err(QueryError::invalid_argument("record field name is empty"));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(QueryError::invalid_argument(format!(
                    "record field '{}' appears more than once",
                    field.name
                )));
            }
        }

        if self.primary_keys().next().is_none() {
            return Err(QueryError::missing_primary_key(data_extension));
        }

        Ok(())
    }
}

impl FromIterator<Field> for Record {
    fn from_iter<T: IntoIterator<Item = Field>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_requires_primary_key() {
        let record = Record::new().set("Email", "a@x.com");
        assert_eq!(
            record.validate("Subscribers"),
            Err(QueryError::missing_primary_key("Subscribers"))
        );
    }

    #[test]
    fn test_validate_empty_record() {
        assert_eq!(
            Record::new().validate("Subscribers"),
            Err(QueryError::missing_primary_key("Subscribers"))
        );
    }

    #[test]
    fn test_validate_duplicate_field() {
        let record = Record::new().key("Id", "1").set("Id", "2");
        assert!(matches!(
            record.validate("Subscribers"),
            Err(QueryError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_validate_ok() {
        let record = Record::new().key("Id", "1").set("Email", "a@x.com");
        assert!(record.validate("Subscribers").is_ok());
        let names: Vec<_> = record.fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["Id", "Email"]);
    }
}
