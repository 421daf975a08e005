//! Database tests

use super::*;
use crate::models::*;
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_in_memory_db() {
    let db = Database::in_memory().unwrap();
    let transactions = db.list_transactions("alice", 10).unwrap();
    assert!(transactions.is_empty());
}

#[test]
fn test_transaction_crud() {
    let db = Database::in_memory().unwrap();

    let id = db
        .insert_transaction(
            "alice",
            &NewTransaction {
                date: date(2025, 3, 14),
                description: "Monthly rent".to_string(),
                category: Some("rent".to_string()),
                expense_type: Some("Fixed".to_string()),
                kind: TransactionKind::Expense,
                amount: 1800.0,
            },
        )
        .unwrap();
    assert!(id > 0);

    let tx = db.get_transaction(id).unwrap().unwrap();
    assert_eq!(tx.description, "Monthly rent");
    assert_eq!(tx.kind, TransactionKind::Expense);
    assert_eq!(tx.date, date(2025, 3, 14));

    assert_eq!(db.count_transactions("alice").unwrap(), 1);
    assert_eq!(db.count_transactions("bob").unwrap(), 0);

    assert!(db.delete_transaction(id).unwrap());
    assert!(!db.delete_transaction(id).unwrap());
    assert!(db.get_transaction(id).unwrap().is_none());
}

#[test]
fn test_expenses_between_filters_kind_and_range() {
    let db = Database::in_memory().unwrap();

    let rows = [
        (date(2025, 3, 1), TransactionKind::Expense, 100.0),
        (date(2025, 3, 31), TransactionKind::Expense, 50.0),
        (date(2025, 3, 15), TransactionKind::Income, 5000.0),
        (date(2025, 4, 1), TransactionKind::Expense, 75.0),
    ];
    for (d, kind, amount) in rows {
        db.insert_transaction(
            "alice",
            &NewTransaction {
                date: d,
                description: "row".to_string(),
                category: None,
                expense_type: None,
                kind,
                amount,
            },
        )
        .unwrap();
    }

    let expenses = db
        .expenses_between("alice", date(2025, 3, 1), date(2025, 3, 31))
        .unwrap();
    assert_eq!(expenses.len(), 2);
    assert!(expenses.iter().all(|t| t.kind == TransactionKind::Expense));

    let total = db
        .expense_total_between("alice", date(2025, 3, 1), date(2025, 3, 31))
        .unwrap();
    assert!((total - 150.0).abs() < f64::EPSILON);
}

#[test]
fn test_bill_crud_and_due_dates() {
    let db = Database::in_memory().unwrap();

    let id = db
        .insert_bill(
            "alice",
            &NewScheduledBill {
                name: "Internet".to_string(),
                category: Some("utilities".to_string()),
                amount: 60.0,
                due_day: 31,
            },
        )
        .unwrap();

    let bill = db.get_bill(id).unwrap().unwrap();
    assert!(bill.active);

    // due_day 31 clamps to the last day of February
    assert_eq!(bill.due_date_in_month(date(2025, 2, 10)), date(2025, 2, 28));

    let due = db
        .bills_due_between("alice", date(2025, 2, 1), date(2025, 2, 28))
        .unwrap();
    assert_eq!(due.len(), 1);

    // Deactivated bills drop out of due queries
    assert!(db.set_bill_active(id, false).unwrap());
    let due = db
        .bills_due_between("alice", date(2025, 2, 1), date(2025, 2, 28))
        .unwrap();
    assert!(due.is_empty());

    assert!(db.delete_bill(id).unwrap());
    assert!(db.get_bill(id).unwrap().is_none());
}

#[test]
fn test_loan_crud_and_status() {
    let db = Database::in_memory().unwrap();

    let id = db
        .insert_loan(
            "alice",
            &NewLoan {
                name: "Car loan".to_string(),
                lender: Some("Credit Union".to_string()),
                principal: 20000.0,
                emi_amount: 450.0,
                due_day: 5,
            },
        )
        .unwrap();

    let loan = db.get_loan(id).unwrap().unwrap();
    assert_eq!(loan.status, LoanStatus::Active);

    let active = db.active_loans("alice").unwrap();
    assert_eq!(active.len(), 1);

    assert!(db.close_loan(id).unwrap());
    let active = db.active_loans("alice").unwrap();
    assert!(active.is_empty());

    let loan = db.get_loan(id).unwrap().unwrap();
    assert_eq!(loan.status, LoanStatus::Closed);
}

#[test]
fn test_budget_plan_upsert_is_one_row_per_user() {
    let db = Database::in_memory().unwrap();

    let registry = crate::budget::AllocationPlan::get(PlanId::MostPopular);
    let mut plan = UserBudgetPlan {
        user_id: "alice".to_string(),
        plan_id: PlanId::MostPopular,
        plan_name: registry.name.to_string(),
        monthly_income: 4000.0,
        allocations: registry.allocations,
        categories: registry.categories.clone(),
        selected_at: chrono::Utc::now(),
    };
    db.upsert_budget_plan(&plan).unwrap();

    // Second selection overwrites rather than adding a row
    plan.plan_id = PlanId::Good;
    plan.plan_name = "60-20-10-10 Budget".to_string();
    plan.monthly_income = 5000.0;
    db.upsert_budget_plan(&plan).unwrap();

    let conn = db.conn().unwrap();
    let rows: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM budget_plans WHERE user_id = 'alice'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(rows, 1);

    let stored = db.get_budget_plan("alice").unwrap().unwrap();
    assert_eq!(stored.plan_id, PlanId::Good);
    assert!((stored.monthly_income - 5000.0).abs() < f64::EPSILON);

    assert!(db.delete_budget_plan("alice").unwrap());
    assert!(!db.delete_budget_plan("alice").unwrap());
    assert!(db.get_budget_plan("alice").unwrap().is_none());
}

#[test]
fn test_budget_plan_snapshot_round_trip() {
    let db = Database::in_memory().unwrap();

    let registry = crate::budget::AllocationPlan::get(PlanId::BareMinimum);
    let plan = UserBudgetPlan {
        user_id: "bob".to_string(),
        plan_id: PlanId::BareMinimum,
        plan_name: registry.name.to_string(),
        monthly_income: 2500.0,
        allocations: registry.allocations,
        categories: registry.categories.clone(),
        selected_at: chrono::Utc::now(),
    };
    db.upsert_budget_plan(&plan).unwrap();

    let stored = db.get_budget_plan("bob").unwrap().unwrap();
    assert_eq!(stored.allocations, registry.allocations);
    assert_eq!(stored.categories, registry.categories);
}
