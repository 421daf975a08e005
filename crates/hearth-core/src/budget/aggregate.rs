//! Monthly expense aggregation
//!
//! Pulls one calendar month of spending inputs for a user: expense
//! transactions dated in the month, active bills due in the month, and all
//! active loan EMIs (flat recurring cost, selected by status only).

use chrono::{Days, Months, NaiveDate};
use tracing::warn;

use crate::db::Database;
use crate::error::Result;
use crate::models::{Loan, ScheduledBill, Transaction};

/// First day of the month containing `today`
pub fn first_day_of_month(today: NaiveDate) -> NaiveDate {
    use chrono::Datelike;
    today.with_day(1).unwrap_or(today)
}

/// Last day of the month containing `today`
pub fn last_day_of_month(today: NaiveDate) -> NaiveDate {
    let first = first_day_of_month(today);
    first
        .checked_add_months(Months::new(1))
        .and_then(|d| d.checked_sub_days(Days::new(1)))
        .unwrap_or(today)
}

/// Source of scheduled bills for aggregation
///
/// The bill store is an optional collaborator: an aggregator constructed
/// without one degrades to an empty bill list instead of failing.
pub trait BillSource {
    fn bills_due_between(
        &self,
        user_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<ScheduledBill>>;
}

impl BillSource for Database {
    fn bills_due_between(
        &self,
        user_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<ScheduledBill>> {
        Database::bills_due_between(self, user_id, from, to)
    }
}

/// One month of aggregated spending inputs
#[derive(Debug, Clone)]
pub struct MonthlyExpenses {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub transactions: Vec<Transaction>,
    pub bills: Vec<ScheduledBill>,
    pub loans: Vec<Loan>,
}

/// Gathers a user's monthly spending inputs from the record stores
pub struct Aggregator<'a> {
    db: &'a Database,
    bills: Option<&'a dyn BillSource>,
}

impl<'a> Aggregator<'a> {
    /// Aggregator reading bills from the main database
    pub fn new(db: &'a Database) -> Self {
        Self {
            db,
            bills: Some(db),
        }
    }

    /// Aggregator with an explicit (possibly absent) bill source
    pub fn with_bill_source(db: &'a Database, bills: Option<&'a dyn BillSource>) -> Self {
        Self { db, bills }
    }

    /// Gather the calendar month containing `today` for one user
    ///
    /// The month boundaries come from the caller's clock; no timezone is
    /// pinned here.
    pub fn gather(&self, user_id: &str, today: NaiveDate) -> Result<MonthlyExpenses> {
        let from = first_day_of_month(today);
        let to = last_day_of_month(today);

        let transactions = self.db.expenses_between(user_id, from, to)?;

        let bills = match self.bills {
            Some(source) => source.bills_due_between(user_id, from, to)?,
            None => {
                warn!(
                    user = user_id,
                    "Bill store unavailable, continuing with no scheduled bills"
                );
                Vec::new()
            }
        };

        let loans = self.db.active_loans(user_id)?;

        Ok(MonthlyExpenses {
            from,
            to,
            transactions,
            bills,
            loans,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewLoan, NewScheduledBill, NewTransaction, TransactionKind};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_window() {
        assert_eq!(first_day_of_month(date(2025, 3, 14)), date(2025, 3, 1));
        assert_eq!(last_day_of_month(date(2025, 3, 14)), date(2025, 3, 31));
        assert_eq!(last_day_of_month(date(2025, 4, 1)), date(2025, 4, 30));
        // Leap year February
        assert_eq!(last_day_of_month(date(2024, 2, 29)), date(2024, 2, 29));
        assert_eq!(last_day_of_month(date(2025, 2, 1)), date(2025, 2, 28));
        assert_eq!(last_day_of_month(date(2025, 12, 31)), date(2025, 12, 31));
    }

    #[test]
    fn test_gather_collects_all_three_sources() {
        let db = Database::in_memory().unwrap();

        db.insert_transaction(
            "alice",
            &NewTransaction {
                date: date(2025, 3, 10),
                description: "Groceries".to_string(),
                category: Some("groceries".to_string()),
                expense_type: None,
                kind: TransactionKind::Expense,
                amount: 120.0,
            },
        )
        .unwrap();
        db.insert_bill(
            "alice",
            &NewScheduledBill {
                name: "Internet".to_string(),
                category: None,
                amount: 60.0,
                due_day: 15,
            },
        )
        .unwrap();
        db.insert_loan(
            "alice",
            &NewLoan {
                name: "Car loan".to_string(),
                lender: None,
                principal: 20000.0,
                emi_amount: 450.0,
                due_day: 5,
            },
        )
        .unwrap();

        let month = Aggregator::new(&db).gather("alice", date(2025, 3, 14)).unwrap();
        assert_eq!(month.from, date(2025, 3, 1));
        assert_eq!(month.to, date(2025, 3, 31));
        assert_eq!(month.transactions.len(), 1);
        assert_eq!(month.bills.len(), 1);
        assert_eq!(month.loans.len(), 1);
    }

    #[test]
    fn test_gather_without_bill_source_degrades_to_empty() {
        let db = Database::in_memory().unwrap();

        db.insert_bill(
            "alice",
            &NewScheduledBill {
                name: "Internet".to_string(),
                category: None,
                amount: 60.0,
                due_day: 15,
            },
        )
        .unwrap();

        let month = Aggregator::with_bill_source(&db, None)
            .gather("alice", date(2025, 3, 14))
            .unwrap();
        assert!(month.bills.is_empty());
    }

    #[test]
    fn test_gather_includes_active_loans_outside_window_dates() {
        let db = Database::in_memory().unwrap();

        // Loans are picked up by status alone; due_day never filters them
        db.insert_loan(
            "alice",
            &NewLoan {
                name: "Home loan".to_string(),
                lender: None,
                principal: 250000.0,
                emi_amount: 1500.0,
                due_day: 1,
            },
        )
        .unwrap();
        let closed = db
            .insert_loan(
                "alice",
                &NewLoan {
                    name: "Old loan".to_string(),
                    lender: None,
                    principal: 5000.0,
                    emi_amount: 100.0,
                    due_day: 1,
                },
            )
            .unwrap();
        db.close_loan(closed).unwrap();

        let month = Aggregator::new(&db).gather("alice", date(2025, 6, 20)).unwrap();
        assert_eq!(month.loans.len(), 1);
        assert_eq!(month.loans[0].name, "Home loan");
    }
}
