//! The statement AST produced by the parser.
//!
//! The AST only guarantees well-formed syntax. Whether the referenced
//! tables and columns exist is the engine's job.

use std::collections::HashMap;
use std::fmt;

use crate::types::{Column, Row, Value};

/// A parsed SQL statement.
#[derive(Clone, Debug, PartialEq)]
pub enum Statement {
    CreateTable {
        name: String,
        columns: Vec<Column>,
    },
    Insert {
        table: String,
        values: Row,
    },
    Select {
        /// Column names to project, or the single wildcard `*`. Qualified
        /// names stay verbatim.
        columns: Vec<String>,
        table: String,
        where_clause: Option<WhereClause>,
        join: Option<JoinClause>,
    },
    Update {
        table: String,
        assignments: HashMap<String, Value>,
        where_clause: Option<WhereClause>,
    },
    Delete {
        table: String,
        where_clause: Option<WhereClause>,
    },
}

/// A single comparison predicate: `column op value`.
#[derive(Clone, Debug, PartialEq)]
pub struct WhereClause {
    pub column: String,
    pub op: Operator,
    pub value: Value,
}

/// The comparison operators usable in a WHERE clause.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Equal,
    NotEqual,
    GreaterThan,
    LessThan,
    GreaterThanOrEqual,
    LessThanOrEqual,
}

impl Operator {
    /// Parses an operator from its source symbol.
    pub fn from_symbol(symbol: &str) -> Option<Operator> {
        match symbol {
            "=" => Some(Operator::Equal),
            "!=" => Some(Operator::NotEqual),
            ">" => Some(Operator::GreaterThan),
            "<" => Some(Operator::LessThan),
            ">=" => Some(Operator::GreaterThanOrEqual),
            "<=" => Some(Operator::LessThanOrEqual),
            _ => None,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::Equal => write!(f, "="),
            Operator::NotEqual => write!(f, "!="),
            Operator::GreaterThan => write!(f, ">"),
            Operator::LessThan => write!(f, "<"),
            Operator::GreaterThanOrEqual => write!(f, ">="),
            Operator::LessThanOrEqual => write!(f, "<="),
        }
    }
}

/// An inner equi-join: `JOIN table ON left = right`, both sides qualified
/// as `table.column` in the source text.
#[derive(Clone, Debug, PartialEq)]
pub struct JoinClause {
    pub table: String,
    pub left: QualifiedColumn,
    pub right: QualifiedColumn,
}

/// A `table.column` reference.
#[derive(Clone, Debug, PartialEq)]
pub struct QualifiedColumn {
    pub table: String,
    pub column: String,
}

impl fmt::Display for QualifiedColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.table, self.column)
    }
}
