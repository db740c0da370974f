//! The table engine: row store, constraint checks, secondary indexes.

mod index;
mod table;

pub use index::Index;
pub use table::Table;
