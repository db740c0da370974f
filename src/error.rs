//! Error types for the SQL engine

use thiserror::Error;

use crate::types::{DataType, Value};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // SQL errors
    #[error("parse error: {0}")]
    ParseError(String),

    // Registry errors
    #[error("table {0} does not exist")]
    TableNotFound(String),

    #[error("table {0} already exists")]
    DuplicateTable(String),

    #[error("column not found: {0}")]
    ColumnNotFound(String),

    // Type errors
    #[error("invalid type for {column}: expected {expected}")]
    TypeMismatch { column: String, expected: DataType },

    // Constraint errors
    #[error("column {0} cannot be null")]
    NullConstraintViolation(String),

    #[error("duplicate value for {column}: {value}")]
    UniqueConstraintViolation { column: String, value: Value },

    // Persistence errors
    #[error("I/O error: {0}")]
    Io(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
