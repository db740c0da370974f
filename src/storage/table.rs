//! The row store: schema validation, constraint checks, query evaluation.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::parsing::ast::{Operator, WhereClause};
use crate::types::{Column, Row, Value};

use super::Index;

/// A single table: ordered columns, insertion-ordered rows, and one
/// equality index per primary-key or unique column.
///
/// Row positions index into `rows`. They are not stable across a delete,
/// which is why delete rebuilds every index from scratch.
#[derive(Clone, Debug)]
pub struct Table {
    pub name: String,
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
    indexes: HashMap<String, Index>,
}

impl Table {
    /// Creates an empty table, with an index per constrained column.
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Table {
        let indexes = columns
            .iter()
            .filter(|c| c.is_indexed())
            .map(|c| (c.name.clone(), Index::new()))
            .collect();
        Table {
            name: name.into(),
            columns,
            rows: Vec::new(),
            indexes,
        }
    }

    /// Rebuilds a table from snapshot state. The rows are trusted, having
    /// passed the constraint checks when first inserted; the indexes are
    /// rebuilt by a full scan.
    pub fn from_snapshot(name: impl Into<String>, columns: Vec<Column>, rows: Vec<Row>) -> Table {
        let mut table = Table::new(name, columns);
        table.rows = rows;
        table.rebuild_indexes();
        table
    }

    /// The declared column with the given name, if any.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// The declared column names, in declaration order.
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// A read-side view of one column's index, if the column is indexed.
    pub fn index(&self, column: &str) -> Option<&Index> {
        self.indexes.get(column)
    }

    /// Validates and appends one row.
    ///
    /// Each declared column is checked in order: a missing or NULL value
    /// must be allowed by the column, a present value must match the
    /// declared type, and an indexed value must not already exist. The row
    /// is only appended after every column passes, so a failed insert
    /// leaves the table untouched. Values for undeclared columns are
    /// dropped.
    pub fn insert(&mut self, values: &Row) -> Result<()> {
        let mut row = Row::new();
        for column in &self.columns {
            let value = match values.get(&column.name) {
                None | Some(Value::Null) => {
                    if column.rejects_null() {
                        return Err(Error::NullConstraintViolation(column.name.clone()));
                    }
                    row.insert(column.name.clone(), Value::Null);
                    continue;
                }
                Some(value) => value,
            };
            if !value.matches_type(column.data_type) {
                return Err(Error::TypeMismatch {
                    column: column.name.clone(),
                    expected: column.data_type,
                });
            }
            if let Some(index) = self.indexes.get(&column.name) {
                if index.contains(value) {
                    return Err(Error::UniqueConstraintViolation {
                        column: column.name.clone(),
                        value: value.clone(),
                    });
                }
            }
            row.insert(column.name.clone(), value.clone());
        }

        let position = self.rows.len();
        for (column, index) in &mut self.indexes {
            if let Some(value) = row.get(column) {
                index.insert(value, position);
            }
        }
        self.rows.push(row);
        Ok(())
    }

    /// Evaluates a SELECT. An equality predicate on an indexed column is
    /// answered from the index; everything else is a full scan in
    /// insertion order.
    pub fn select(&self, columns: &[String], where_clause: Option<&WhereClause>) -> Vec<Row> {
        if let Some(clause) = where_clause {
            if clause.op == Operator::Equal {
                if let Some(index) = self.indexes.get(&clause.column) {
                    if let Some(positions) = index.get(&clause.value) {
                        return positions
                            .iter()
                            .map(|&p| &self.rows[p])
                            .filter(|row| matches_where(row, where_clause))
                            .map(|row| project_row(row, columns))
                            .collect();
                    }
                }
            }
        }

        self.rows
            .iter()
            .filter(|row| matches_where(row, where_clause))
            .map(|row| project_row(row, columns))
            .collect()
    }

    /// Applies the assignments to every matching row, maintaining the
    /// indexes of assigned columns. Returns the number of rows updated.
    ///
    /// Assignments are validated against the schema before any row is
    /// touched; uniqueness on indexed columns is re-checked per row,
    /// ignoring the row's own position. A conflict partway through a
    /// multi-row update aborts the statement with the earlier rows already
    /// updated. There is no rollback.
    pub fn update(
        &mut self,
        assignments: &HashMap<String, Value>,
        where_clause: Option<&WhereClause>,
    ) -> Result<usize> {
        for (name, value) in assignments {
            let column = self
                .column(name)
                .ok_or_else(|| Error::ColumnNotFound(name.clone()))?;
            if !value.matches_type(column.data_type) {
                return Err(Error::TypeMismatch {
                    column: column.name.clone(),
                    expected: column.data_type,
                });
            }
        }

        let mut count = 0;
        for position in 0..self.rows.len() {
            if !matches_where(&self.rows[position], where_clause) {
                continue;
            }
            for (name, value) in assignments {
                if let Some(index) = self.indexes.get(name) {
                    if index.conflicts(value, position) {
                        return Err(Error::UniqueConstraintViolation {
                            column: name.clone(),
                            value: value.clone(),
                        });
                    }
                }
                if let Some(index) = self.indexes.get_mut(name) {
                    if let Some(old) = self.rows[position].get(name) {
                        index.remove(old, position);
                    }
                    index.insert(value, position);
                }
                self.rows[position].insert(name.clone(), value.clone());
            }
            count += 1;
        }
        Ok(count)
    }

    /// Removes matching rows, preserving the order of the survivors, and
    /// returns the number removed. Surviving positions shift, so every
    /// index is rebuilt from scratch afterwards.
    pub fn delete(&mut self, where_clause: Option<&WhereClause>) -> usize {
        let before = self.rows.len();
        self.rows.retain(|row| !matches_where(row, where_clause));
        let count = before - self.rows.len();
        self.rebuild_indexes();
        count
    }

    /// Inner equi-join against `right` by nested loop. Merged rows carry
    /// qualified `table.column` keys, so the post-join predicate and the
    /// projection are expected to use qualified names.
    pub fn join(
        &self,
        right: &Table,
        left_column: &str,
        right_column: &str,
        columns: &[String],
        where_clause: Option<&WhereClause>,
    ) -> Vec<Row> {
        let mut result = Vec::new();
        for left_row in &self.rows {
            for right_row in &right.rows {
                if left_row.get(left_column) != right_row.get(right_column) {
                    continue;
                }
                let mut merged = Row::new();
                for (column, value) in left_row {
                    merged.insert(format!("{}.{}", self.name, column), value.clone());
                }
                for (column, value) in right_row {
                    merged.insert(format!("{}.{}", right.name, column), value.clone());
                }
                if matches_where(&merged, where_clause) {
                    result.push(project_row(&merged, columns));
                }
            }
        }
        result
    }

    fn rebuild_indexes(&mut self) {
        for index in self.indexes.values_mut() {
            index.clear();
        }
        for (position, row) in self.rows.iter().enumerate() {
            for (column, index) in &mut self.indexes {
                if let Some(value) = row.get(column) {
                    index.insert(value, position);
                }
            }
        }
    }
}

/// Evaluates a predicate against one row. A column absent from the row
/// never matches. Equality is typed value equality; the ordering operators
/// only apply to like-typed pairs and never match otherwise.
fn matches_where(row: &Row, where_clause: Option<&WhereClause>) -> bool {
    let Some(clause) = where_clause else {
        return true;
    };
    let Some(value) = row.get(&clause.column) else {
        return false;
    };
    match clause.op {
        Operator::Equal => *value == clause.value,
        Operator::NotEqual => *value != clause.value,
        Operator::GreaterThan => value.compare(&clause.value).is_some_and(Ordering::is_gt),
        Operator::LessThan => value.compare(&clause.value).is_some_and(Ordering::is_lt),
        Operator::GreaterThanOrEqual => value.compare(&clause.value).is_some_and(Ordering::is_ge),
        Operator::LessThanOrEqual => value.compare(&clause.value).is_some_and(Ordering::is_le),
    }
}

/// Projects a row onto the requested columns. The wildcard passes the row
/// through; requested columns the row does not carry are dropped.
fn project_row(row: &Row, columns: &[String]) -> Row {
    if columns.len() == 1 && columns[0] == "*" {
        return row.clone();
    }
    columns
        .iter()
        .filter_map(|column| row.get(column).map(|value| (column.clone(), value.clone())))
        .collect()
}
