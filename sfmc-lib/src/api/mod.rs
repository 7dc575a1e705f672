//! Data extension operations

mod data_extension;
mod delete;
pub mod query;

pub use data_extension::*;
pub use delete::*;
