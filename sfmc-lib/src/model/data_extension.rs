//! DataExtension identifier (Key/Name)

use serde::Deserialize;
use serde::Serialize;

/// Identifies a data extension either by external key or by name.
///
/// The SOAP API addresses data extensions by their external key
/// (`CustomerKey`); the name shown in the UI is accepted as well and left
/// to the backend to resolve.
///
/// # Examples
///
/// ```
/// use sfmc_lib::model::DataExtension;
///
/// // External key, used directly
/// let de = DataExtension::key("SendLog");
///
/// // Display name, resolved by the backend
/// let de = DataExtension::name("Send Log Expansion Pack");
///
/// // Plain strings are external keys
/// let de: DataExtension = "SendLog".into();
/// assert_eq!(de, DataExtension::key("SendLog"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataExtension {
    /// External key (`CustomerKey`).
    Key(String),
    /// Display name.
    Name(String),
}

impl DataExtension {
    /// Creates an identifier from an external key.
    pub fn key(key: impl Into<String>) -> Self {
        Self::Key(key.into())
    }

    /// Creates an identifier from a display name.
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    /// Returns the inner string, regardless of variant.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Key(s) | Self::Name(s) => s,
        }
    }

    /// Returns `true` if this is an external key.
    pub fn is_key(&self) -> bool {
        matches!(self, Self::Key(_))
    }
}

impl From<&str> for DataExtension {
    fn from(key: &str) -> Self {
        Self::key(key)
    }
}

impl From<String> for DataExtension {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl std::fmt::Display for DataExtension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Key(key) => write!(f, "{} (key)", key),
            Self::Name(name) => write!(f, "{} (name)", name),
        }
    }
}
