//! The database coordinator: table registry, locking, statement dispatch.

use std::collections::HashMap;
use std::path::Path;

use parking_lot::RwLock;

use crate::error::{Error, Result};
use crate::parsing::{self, JoinClause, Statement, WhereClause};
use crate::persistence::Persistence;
use crate::result::QueryResult;
use crate::storage::Table;
use crate::types::{Column, Row, Value};

/// Default snapshot location, relative to the working directory.
pub const DEFAULT_PATH: &str = "minidb.json";

/// A single-process database: a table registry behind one readers-writer
/// lock, with every successful mutation snapshotted to disk before the
/// lock is released.
///
/// `execute` may be called from any number of threads. Reads share the
/// lock; mutating statements hold it exclusively through the snapshot
/// write, so a reader never observes state that is not yet on disk.
pub struct Database {
    tables: RwLock<HashMap<String, Table>>,
    persistence: Persistence,
}

impl Database {
    /// Opens the database at the default snapshot path.
    pub fn new() -> Result<Database> {
        Database::open(DEFAULT_PATH)
    }

    /// Opens a database backed by the given snapshot file, loading it if
    /// it exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Database> {
        let persistence = Persistence::new(path.as_ref());
        let tables = persistence.load()?;
        Ok(Database {
            tables: RwLock::new(tables),
            persistence,
        })
    }

    /// Parses and executes one statement.
    pub fn execute(&self, query: &str) -> Result<QueryResult> {
        match parsing::parse(query)? {
            Statement::CreateTable { name, columns } => self.execute_create(name, columns),
            Statement::Insert { table, values } => self.execute_insert(table, values),
            Statement::Select {
                columns,
                table,
                where_clause,
                join,
            } => self.execute_select(columns, table, where_clause.as_ref(), join),
            Statement::Update {
                table,
                assignments,
                where_clause,
            } => self.execute_update(table, assignments, where_clause.as_ref()),
            Statement::Delete {
                table,
                where_clause,
            } => self.execute_delete(table, where_clause.as_ref()),
        }
    }

    fn execute_create(&self, name: String, columns: Vec<Column>) -> Result<QueryResult> {
        let mut tables = self.tables.write();
        if tables.contains_key(&name) {
            return Err(Error::DuplicateTable(name));
        }
        tables.insert(name.clone(), Table::new(name.clone(), columns));
        self.persistence.save(&tables)?;
        Ok(QueryResult::with_message(format!("Table {name} created")))
    }

    fn execute_insert(&self, table: String, values: Row) -> Result<QueryResult> {
        let mut tables = self.tables.write();
        let target = tables
            .get_mut(&table)
            .ok_or_else(|| Error::TableNotFound(table))?;
        target.insert(&values)?;
        self.persistence.save(&tables)?;
        Ok(QueryResult::with_message("1 row inserted"))
    }

    fn execute_select(
        &self,
        columns: Vec<String>,
        table: String,
        where_clause: Option<&WhereClause>,
        join: Option<JoinClause>,
    ) -> Result<QueryResult> {
        let tables = self.tables.read();
        let left = tables
            .get(&table)
            .ok_or_else(|| Error::TableNotFound(table.clone()))?;

        if let Some(join) = join {
            let right = tables
                .get(&join.table)
                .ok_or_else(|| Error::TableNotFound(join.table.clone()))?;
            return execute_join(left, right, &join, &columns, where_clause);
        }

        let rows = left.select(&columns, where_clause);
        let columns = if is_wildcard(&columns) {
            left.column_names()
        } else {
            columns
        };
        Ok(QueryResult::with_rows(columns, rows))
    }

    fn execute_update(
        &self,
        table: String,
        assignments: HashMap<String, Value>,
        where_clause: Option<&WhereClause>,
    ) -> Result<QueryResult> {
        let mut tables = self.tables.write();
        let target = tables
            .get_mut(&table)
            .ok_or_else(|| Error::TableNotFound(table))?;
        let count = target.update(&assignments, where_clause)?;
        self.persistence.save(&tables)?;
        Ok(QueryResult::with_message(format!("{count} row(s) updated")))
    }

    fn execute_delete(
        &self,
        table: String,
        where_clause: Option<&WhereClause>,
    ) -> Result<QueryResult> {
        let mut tables = self.tables.write();
        let target = tables
            .get_mut(&table)
            .ok_or_else(|| Error::TableNotFound(table))?;
        let count = target.delete(where_clause);
        self.persistence.save(&tables)?;
        Ok(QueryResult::with_message(format!("{count} row(s) deleted")))
    }
}

fn is_wildcard(columns: &[String]) -> bool {
    columns.len() == 1 && columns[0] == "*"
}

/// Resolves the ON qualifiers onto the two tables and runs the nested-loop
/// join. Wildcard projection expands to the qualified columns of both
/// tables, left first, in declaration order.
fn execute_join(
    left: &Table,
    right: &Table,
    join: &JoinClause,
    columns: &[String],
    where_clause: Option<&WhereClause>,
) -> Result<QueryResult> {
    let (left_column, right_column) = resolve_on_columns(left, right, join)?;
    let rows = left.join(right, &left_column, &right_column, columns, where_clause);
    let columns = if is_wildcard(columns) {
        left.columns
            .iter()
            .map(|c| format!("{}.{}", left.name, c.name))
            .chain(
                right
                    .columns
                    .iter()
                    .map(|c| format!("{}.{}", right.name, c.name)),
            )
            .collect()
    } else {
        columns.to_vec()
    };
    Ok(QueryResult::with_rows(columns, rows))
}

/// Maps `ON a.x = b.y` onto (left column, right column), whichever order
/// the statement wrote the two sides in.
fn resolve_on_columns(left: &Table, right: &Table, join: &JoinClause) -> Result<(String, String)> {
    let mut left_column = None;
    let mut right_column = None;
    for side in [&join.left, &join.right] {
        if side.table == left.name {
            left_column = Some(side.column.clone());
        } else if side.table == right.name {
            right_column = Some(side.column.clone());
        } else {
            return Err(Error::TableNotFound(side.table.clone()));
        }
    }
    match (left_column, right_column) {
        (Some(l), Some(r)) => Ok((l, r)),
        _ => Err(Error::ParseError(format!(
            "join condition must reference both {} and {}",
            left.name, right.name
        ))),
    }
}
