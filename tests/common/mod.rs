//! Shared helpers for the integration tests.
#![allow(dead_code)]

use std::path::PathBuf;

use minidb::{Database, Error, QueryResult, Row};
use tempfile::TempDir;

/// A database backed by a throwaway snapshot directory, with helpers for
/// the usual statement/verify cycle.
pub struct TestContext {
    pub db: Database,
    dir: TempDir,
}

impl TestContext {
    pub fn new() -> TestContext {
        let dir = tempfile::tempdir().expect("temp dir");
        let db = Database::open(dir.path().join("minidb.json")).expect("open database");
        TestContext { db, dir }
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.dir.path().join("minidb.json")
    }

    /// Reopens the database from its snapshot file, as a process restart
    /// would.
    pub fn reopen(&mut self) {
        self.db = Database::open(self.snapshot_path()).expect("reopen database");
    }

    /// Executes SQL that must succeed.
    pub fn exec(&self, sql: &str) -> QueryResult {
        self.db
            .execute(sql)
            .unwrap_or_else(|err| panic!("SQL failed: {sql} - {err}"))
    }

    /// Executes SQL that must succeed and returns its message.
    pub fn exec_message(&self, sql: &str) -> String {
        self.exec(sql).message
    }

    /// Executes SQL that must fail and returns the error.
    pub fn exec_error(&self, sql: &str) -> Error {
        match self.db.execute(sql) {
            Err(err) => err,
            Ok(_) => panic!("expected error for SQL: {sql}"),
        }
    }

    /// Runs a SELECT and returns its rows.
    pub fn query(&self, sql: &str) -> Vec<Row> {
        self.exec(sql).rows
    }

    pub fn query_count(&self, sql: &str) -> usize {
        self.query(sql).len()
    }

    pub fn assert_row_count(&self, sql: &str, expected: usize) {
        let count = self.query_count(sql);
        assert_eq!(
            count, expected,
            "query '{sql}' returned {count} rows, expected {expected}"
        );
    }

    pub fn assert_error_contains(&self, sql: &str, expected: &str) {
        let error = self.exec_error(sql).to_string();
        assert!(
            error.contains(expected),
            "error '{error}' does not contain '{expected}'"
        );
    }
}

/// A context pre-seeded with the users/orders pair most tests want.
pub fn setup_with_tables() -> TestContext {
    let ctx = TestContext::new();
    ctx.exec("CREATE TABLE users (id INT PRIMARY KEY, name STRING NOT NULL, age INT)");
    ctx.exec("INSERT INTO users (id, name, age) VALUES (1, 'Alice', 30)");
    ctx.exec("INSERT INTO users (id, name, age) VALUES (2, 'Bob', 25)");
    ctx.exec("INSERT INTO users (id, name, age) VALUES (3, 'Carol', 35)");

    ctx.exec("CREATE TABLE orders (id INT PRIMARY KEY, user_id INT, amount FLOAT)");
    ctx.exec("INSERT INTO orders (id, user_id, amount) VALUES (10, 1, 9.5)");
    ctx.exec("INSERT INTO orders (id, user_id, amount) VALUES (11, 1, 12.0)");
    ctx.exec("INSERT INTO orders (id, user_id, amount) VALUES (12, 2, 3.25)");
    ctx
}

#[macro_export]
macro_rules! assert_rows {
    ($ctx:expr, $sql:expr, $count:expr) => {
        $ctx.assert_row_count($sql, $count);
    };
}

#[macro_export]
macro_rules! assert_error {
    ($ctx:expr, $sql:expr, $contains:expr) => {
        $ctx.assert_error_contains($sql, $contains);
    };
}
