//! Column descriptors.

use serde::{Deserialize, Serialize};

use super::DataType;

/// A table column.
///
/// Column names are case-sensitive and unique within a table. The wire
/// field names (`Name`, `Type`, `PrimaryKey`, `Unique`, `NotNull`) are the
/// snapshot document's column format.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Column {
    /// Column name. Can't be empty.
    pub name: String,
    /// Declared column type.
    #[serde(rename = "Type")]
    pub data_type: DataType,
    /// Whether this is the primary key column.
    pub primary_key: bool,
    /// Whether the column only allows unique values (ignoring NULLs).
    pub unique: bool,
    /// Whether the column rejects NULL values.
    pub not_null: bool,
}

impl Column {
    /// Creates a new unconstrained column.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Column {
            name: name.into(),
            data_type,
            primary_key: false,
            unique: false,
            not_null: false,
        }
    }

    /// Sets this column as the primary key.
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Sets this column as unique.
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Sets this column as NOT NULL.
    pub fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    /// Indexed columns are exactly the primary-key and unique ones.
    pub fn is_indexed(&self) -> bool {
        self.primary_key || self.unique
    }

    /// PRIMARY KEY implies NOT NULL.
    pub fn rejects_null(&self) -> bool {
        self.not_null || self.primary_key
    }
}
