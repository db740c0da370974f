//! A small in-memory relational database engine.
//!
//! minidb accepts a subset of SQL (CREATE TABLE, INSERT, SELECT with an
//! optional inner join, UPDATE, DELETE), enforces a typed schema with
//! primary-key and uniqueness constraints, answers indexed equality
//! lookups, and rewrites a single human-readable JSON snapshot after every
//! mutating statement.
//!
//! The entry point is [Database]: open one against a snapshot path and
//! feed it SQL text.
//!
//! ```
//! use minidb::Database;
//!
//! let dir = tempfile::tempdir()?;
//! let db = Database::open(dir.path().join("minidb.json"))?;
//! db.execute("CREATE TABLE users (id INT PRIMARY KEY, name STRING NOT NULL)")?;
//! db.execute("INSERT INTO users (id, name) VALUES (1, 'Alice')")?;
//! let result = db.execute("SELECT name FROM users WHERE id = 1")?;
//! assert_eq!(result.rows.len(), 1);
//! # Ok::<(), minidb::Error>(())
//! ```

pub mod engine;
pub mod error;
pub mod parsing;
pub mod persistence;
pub mod result;
pub mod storage;
pub mod types;

pub use engine::Database;
pub use error::{Error, Result};
pub use parsing::{Statement, parse};
pub use result::QueryResult;
pub use storage::Table;
pub use types::{Column, DataType, Row, Value};
