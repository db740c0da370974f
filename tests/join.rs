//! Inner equi-join execution through the coordinator.

mod common;

use common::setup_with_tables;
use minidb::Value;

#[test]
fn join_matches_on_equal_keys() {
    let ctx = setup_with_tables();
    let result = ctx.exec("SELECT * FROM users JOIN orders ON users.id = orders.user_id");
    // Alice has two orders, Bob one, Carol none.
    assert_eq!(result.rows.len(), 3);
    for row in &result.rows {
        assert_eq!(row["users.id"], row["orders.user_id"]);
    }
}

#[test]
fn join_wildcard_expands_qualified_columns() {
    let ctx = setup_with_tables();
    let result = ctx.exec("SELECT * FROM users JOIN orders ON users.id = orders.user_id");
    assert_eq!(
        result.columns,
        vec![
            "users.id",
            "users.name",
            "users.age",
            "orders.id",
            "orders.user_id",
            "orders.amount",
        ]
    );
}

#[test]
fn join_projects_qualified_columns() {
    let ctx = setup_with_tables();
    let result = ctx.exec(
        "SELECT users.name, orders.amount FROM users JOIN orders ON users.id = orders.user_id",
    );
    assert_eq!(result.columns, vec!["users.name", "orders.amount"]);
    for row in &result.rows {
        assert_eq!(row.len(), 2);
    }
}

#[test]
fn join_applies_post_join_where() {
    let ctx = setup_with_tables();
    let result = ctx.exec(
        "SELECT * FROM users JOIN orders ON users.id = orders.user_id WHERE users.name = 'Alice'",
    );
    assert_eq!(result.rows.len(), 2);
    for row in &result.rows {
        assert_eq!(row["users.name"], Value::Str("Alice".into()));
    }
}

#[test]
fn join_accepts_reversed_on_order() {
    let ctx = setup_with_tables();
    let flipped = ctx.exec("SELECT * FROM users JOIN orders ON orders.user_id = users.id");
    let straight = ctx.exec("SELECT * FROM users JOIN orders ON users.id = orders.user_id");
    assert_eq!(flipped.rows.len(), straight.rows.len());
}

#[test]
fn join_with_no_matches_is_empty() {
    let ctx = setup_with_tables();
    ctx.exec("DELETE FROM orders");
    let result = ctx.exec("SELECT * FROM users JOIN orders ON users.id = orders.user_id");
    assert!(result.rows.is_empty());
}

#[test]
fn join_missing_right_table() {
    let ctx = setup_with_tables();
    assert_error!(
        ctx,
        "SELECT * FROM users JOIN ghosts ON users.id = ghosts.user_id",
        "does not exist"
    );
}

#[test]
fn join_rejects_unknown_qualifier() {
    let ctx = setup_with_tables();
    assert_error!(
        ctx,
        "SELECT * FROM users JOIN orders ON invoices.id = orders.user_id",
        "does not exist"
    );
}
