//! Acknowledgment returned by create and delete

use serde::Deserialize;
use serde::Serialize;

/// Minimal acknowledgment of a create or delete.
///
/// A backend that reaches the vendor and gets an answer returns an `Ack`,
/// even when the vendor reports a per-row failure (`success == false`).
/// Transport and authorization failures are errors instead.
///
/// # Example
///
/// ```
/// use sfmc_lib::Ack;
///
/// let ack = Ack::ok(1).with_message("Created DataExtensionObject");
/// assert!(ack.is_success());
/// assert_eq!(ack.rows_affected(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ack {
    success: bool,
    status_message: Option<String>,
    request_id: Option<String>,
    rows_affected: usize,
}

impl Ack {
    /// Creates a successful acknowledgment.
    pub fn ok(rows_affected: usize) -> Self {
        Self {
            success: true,
            status_message: None,
            request_id: None,
            rows_affected,
        }
    }

    /// Creates a failed acknowledgment with the vendor's status message.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            status_message: Some(message.into()),
            request_id: None,
            rows_affected: 0,
        }
    }

    /// Sets the status message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.status_message = Some(message.into());
        self
    }

    /// Sets the vendor request ID.
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Returns `true` if the vendor reported success.
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Returns the vendor status message, if any.
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    /// Returns the vendor request ID, if any.
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    /// Returns the number of rows created or deleted.
    pub fn rows_affected(&self) -> usize {
        self.rows_affected
    }
}
