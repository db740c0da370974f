//! DELETE semantics: counts, survivor order, index rebuild.

mod common;

use common::setup_with_tables;
use minidb::{Error, Value};

#[test]
fn delete_reports_row_count() {
    let ctx = setup_with_tables();
    assert_eq!(
        ctx.exec_message("DELETE FROM users WHERE id = 2"),
        "1 row(s) deleted"
    );
    assert_eq!(
        ctx.exec_message("DELETE FROM users WHERE id = 2"),
        "0 row(s) deleted"
    );
    assert_eq!(ctx.exec_message("DELETE FROM users"), "2 row(s) deleted");
    assert_rows!(ctx, "SELECT * FROM users", 0);
}

#[test]
fn delete_preserves_survivor_order() {
    let ctx = setup_with_tables();
    ctx.exec("DELETE FROM users WHERE id = 2");
    let rows = ctx.query("SELECT * FROM users");
    let ids: Vec<_> = rows.iter().map(|r| r["id"].clone()).collect();
    assert_eq!(ids, vec![Value::Int(1), Value::Int(3)]);
}

#[test]
fn delete_rebuilds_indexes_for_shifted_positions() {
    let ctx = setup_with_tables();
    // Deleting the first row shifts every later position; the primary-key
    // index must keep resolving the survivors.
    ctx.exec("DELETE FROM users WHERE id = 1");
    for id in [2, 3] {
        let rows = ctx.query(&format!("SELECT * FROM users WHERE id = {id}"));
        assert_eq!(rows.len(), 1, "id {id}");
        assert_eq!(rows[0]["id"], Value::Int(id));
    }
    assert_rows!(ctx, "SELECT * FROM users WHERE id = 1", 0);
}

#[test]
fn deleted_key_can_be_reinserted() {
    let ctx = setup_with_tables();
    ctx.exec("DELETE FROM users WHERE id = 1");
    ctx.exec("INSERT INTO users (id, name) VALUES (1, 'Alice II')");
    let rows = ctx.query("SELECT name FROM users WHERE id = 1");
    assert_eq!(rows[0]["name"], Value::Str("Alice II".into()));
}

#[test]
fn delete_with_comparison_predicate() {
    let ctx = setup_with_tables();
    assert_eq!(
        ctx.exec_message("DELETE FROM users WHERE age >= 30"),
        "2 row(s) deleted"
    );
    let rows = ctx.query("SELECT * FROM users");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], Value::Str("Bob".into()));
}

#[test]
fn delete_missing_table() {
    let ctx = setup_with_tables();
    let err = ctx.exec_error("DELETE FROM ghosts");
    assert_eq!(err, Error::TableNotFound("ghosts".into()));
}
