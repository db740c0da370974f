//! The data model: typed cell values, column descriptors, rows.

pub mod data_type;
pub mod schema;
pub mod value;

pub use data_type::DataType;
pub use schema::Column;
pub use value::{Row, Value};
