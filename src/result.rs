//! Query results and their text rendering.

use std::fmt;

use crate::types::Row;

const COLUMN_WIDTH: usize = 15;

/// The outcome of one statement: a message for DDL and mutations, or a
/// column/row set for SELECT. An empty result set has empty-but-present
/// rows, never a missing field.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
    pub message: String,
}

impl QueryResult {
    /// A message-only result.
    pub fn with_message(message: impl Into<String>) -> QueryResult {
        QueryResult {
            message: message.into(),
            ..QueryResult::default()
        }
    }

    /// A row-set result.
    pub fn with_rows(columns: Vec<String>, rows: Vec<Row>) -> QueryResult {
        QueryResult {
            columns,
            rows,
            message: String::new(),
        }
    }
}

/// Renders the result the way the console shows it: the message verbatim,
/// `No results` for an empty row set, and otherwise a left-aligned
/// fixed-width table with a row-count trailer.
impl fmt::Display for QueryResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.message.is_empty() {
            return write!(f, "{}", self.message);
        }
        if self.rows.is_empty() {
            return write!(f, "No results");
        }

        for (i, column) in self.columns.iter().enumerate() {
            if i > 0 {
                write!(f, " | ")?;
            }
            write!(f, "{column:<COLUMN_WIDTH$}")?;
        }
        writeln!(f)?;
        writeln!(f, "{}", "-".repeat(self.columns.len() * (COLUMN_WIDTH + 3)))?;

        for row in &self.rows {
            for (i, column) in self.columns.iter().enumerate() {
                if i > 0 {
                    write!(f, " | ")?;
                }
                let cell = match row.get(column) {
                    Some(value) => value.to_string(),
                    None => "NULL".to_string(),
                };
                write!(f, "{cell:<COLUMN_WIDTH$}")?;
            }
            writeln!(f)?;
        }
        write!(f, "\n{} row(s)", self.rows.len())
    }
}
