//! Marketing Cloud Data Extension query library
//!
//! A fluent, deferred query facade over the Data Extension API. A retrieve
//! is described with chained calls and sent as a single backend request
//! when awaited:
//!
//! ```ignore
//! let rows = client
//!     .data_extension("Subscribers")
//!     .get(["Id", "Email"])
//!     .and_where("Email", Operator::Equals, "a@x.com")
//!     .await?;
//! ```
//!
//! Authentication and the SOAP transport live behind the
//! [`backend::Backend`] trait.

pub mod api;
pub mod backend;
pub mod error;
pub mod model;
pub mod response;

mod client;

pub use client::*;
pub use response::Ack;
