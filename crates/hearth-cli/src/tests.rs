//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use hearth_core::db::Database;
use hearth_core::models::PlanId;

use crate::commands::{self, truncate};

fn setup_test_db() -> Database {
    Database::in_memory().unwrap()
}

// ========== Shared Utilities ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("a very long description", 10), "a very lo…");
}

#[test]
fn test_resolve_db_path_prefers_flag() {
    let path = commands::resolve_db_path(Some(std::path::Path::new("/tmp/custom.db"))).unwrap();
    assert_eq!(path, std::path::PathBuf::from("/tmp/custom.db"));
}

// ========== Record Command Tests ==========

#[test]
fn test_cmd_transactions_add_and_list() {
    let db = setup_test_db();

    commands::cmd_transactions_add(
        &db,
        "alice",
        Some("2025-03-08"),
        "Pizza night",
        45.0,
        Some("dining out"),
        false,
    )
    .unwrap();

    let transactions = db.list_transactions("alice", 10).unwrap();
    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0].description, "Pizza night");

    assert!(commands::cmd_transactions_list(&db, "alice", 10).is_ok());
}

#[test]
fn test_cmd_transactions_add_rejects_bad_date() {
    let db = setup_test_db();
    let result = commands::cmd_transactions_add(
        &db,
        "alice",
        Some("03/08/2025"),
        "Pizza night",
        45.0,
        None,
        false,
    );
    assert!(result.is_err());
}

#[test]
fn test_cmd_transactions_delete_missing_fails() {
    let db = setup_test_db();
    assert!(commands::cmd_transactions_delete(&db, 999).is_err());
}

#[test]
fn test_cmd_bills_add_validates() {
    let db = setup_test_db();

    assert!(commands::cmd_bills_add(&db, "alice", "Internet", -1.0, 15, None).is_err());
    assert!(commands::cmd_bills_add(&db, "alice", "Internet", 60.0, 32, None).is_err());
    assert!(commands::cmd_bills_add(&db, "alice", "Internet", 60.0, 15, Some("utilities")).is_ok());

    let bills = db.list_bills("alice").unwrap();
    assert_eq!(bills.len(), 1);
    assert_eq!(bills[0].due_day, 15);
}

#[test]
fn test_cmd_loans_add_and_close() {
    let db = setup_test_db();

    commands::cmd_loans_add(&db, "alice", "Car loan", 20000.0, 450.0, 5, None).unwrap();
    let loans = db.list_loans("alice").unwrap();
    assert_eq!(loans.len(), 1);

    commands::cmd_loans_close(&db, loans[0].id).unwrap();
    assert!(db.active_loans("alice").unwrap().is_empty());
}

// ========== Budget Command Tests ==========

#[test]
fn test_cmd_budget_plans() {
    assert!(commands::cmd_budget_plans().is_ok());
}

#[test]
fn test_cmd_budget_select_and_show() {
    let db = setup_test_db();

    commands::cmd_budget_select(&db, "alice", "most_popular", 4000.0).unwrap();

    let plan = db.get_budget_plan("alice").unwrap().unwrap();
    assert_eq!(plan.plan_id, PlanId::MostPopular);

    assert!(commands::cmd_budget_show(&db, "alice").is_ok());
}

#[test]
fn test_cmd_budget_select_rejects_bad_input() {
    let db = setup_test_db();

    assert!(commands::cmd_budget_select(&db, "alice", "super_saver", 4000.0).is_err());
    assert!(commands::cmd_budget_select(&db, "alice", "most_popular", 0.0).is_err());
}

#[test]
fn test_cmd_budget_delete_without_plan_fails() {
    let db = setup_test_db();
    assert!(commands::cmd_budget_delete(&db, "alice").is_err());
}

#[test]
fn test_cmd_budget_analyze() {
    let db = setup_test_db();

    commands::cmd_budget_select(&db, "alice", "most_popular", 4000.0).unwrap();
    commands::cmd_transactions_add(
        &db,
        "alice",
        None, // today, so it lands in the analysis month
        "Groceries",
        120.0,
        Some("groceries"),
        false,
    )
    .unwrap();

    assert!(commands::cmd_budget_analyze(&db, "alice", false).is_ok());
    assert!(commands::cmd_budget_analyze(&db, "alice", true).is_ok());
}

#[test]
fn test_cmd_budget_analyze_without_plan_fails() {
    let db = setup_test_db();
    assert!(commands::cmd_budget_analyze(&db, "alice", false).is_err());
}

// ========== Import Command Tests ==========

#[test]
fn test_cmd_import() {
    use std::io::Write;

    let db = setup_test_db();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "date,description,category,expense_type,kind,amount").unwrap();
    writeln!(file, "2025-03-05,March rent,rent,Fixed,expense,1800.00").unwrap();
    writeln!(file, "bad-row,Broken,,,expense,1.00").unwrap();
    file.flush().unwrap();

    commands::cmd_import(&db, "alice", file.path()).unwrap();

    assert_eq!(db.count_transactions("alice").unwrap(), 1);
}
