//! Query building for data extensions.
//!
//! # Types
//!
//! - [`Filter`] / [`Operator`] - A single comparison and the supported operators
//! - [`GetOptions`] - Retrieve options forwarded to the backend untouched
//! - [`QueryBuilder`] - Deferred retrieve that runs when awaited
//! - [`QueryRequest`], [`CreateRequest`], [`DeleteRequest`] - What the backend receives

mod builder;
mod filter;
mod options;
mod request;

pub use builder::QueryBuilder;
pub use builder::QueryStage;
pub use filter::Filter;
pub use filter::Operator;
pub use options::Direction;
pub use options::GetOptions;
pub use request::CreateRequest;
pub use request::DeleteRequest;
pub use request::QueryRequest;
