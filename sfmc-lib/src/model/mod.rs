//! Typed models

mod data_extension;
mod record;
mod row;

pub use data_extension::*;
pub use record::*;
pub use row::*;
