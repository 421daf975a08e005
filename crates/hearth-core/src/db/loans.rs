//! Loan operations

use rusqlite::{params, OptionalExtension, Row};

use super::{parse_datetime, Database};
use crate::error::Result;
use crate::models::{Loan, LoanStatus, NewLoan};

fn row_to_loan(row: &Row<'_>) -> rusqlite::Result<Loan> {
    let due_day: i64 = row.get(6)?;
    let status_str: String = row.get(7)?;
    let created_at_str: String = row.get(8)?;

    Ok(Loan {
        id: row.get(0)?,
        user_id: row.get(1)?,
        name: row.get(2)?,
        lender: row.get(3)?,
        principal: row.get(4)?,
        emi_amount: row.get(5)?,
        due_day: due_day.clamp(1, 31) as u32,
        status: status_str.parse().unwrap_or(LoanStatus::Active),
        created_at: parse_datetime(&created_at_str),
    })
}

const LOAN_COLUMNS: &str =
    "id, user_id, name, lender, principal, emi_amount, due_day, status, created_at";

impl Database {
    /// Insert a loan, returning its new ID
    pub fn insert_loan(&self, user_id: &str, loan: &NewLoan) -> Result<i64> {
        let conn = self.conn()?;

        conn.execute(
            r#"
            INSERT INTO loans (user_id, name, lender, principal, emi_amount, due_day, status)
            VALUES (?, ?, ?, ?, ?, ?, 'active')
            "#,
            params![
                user_id,
                loan.name,
                loan.lender,
                loan.principal,
                loan.emi_amount,
                loan.due_day,
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// Get a loan by ID
    pub fn get_loan(&self, id: i64) -> Result<Option<Loan>> {
        let conn = self.conn()?;

        let loan = conn
            .query_row(
                &format!("SELECT {} FROM loans WHERE id = ?", LOAN_COLUMNS),
                params![id],
                row_to_loan,
            )
            .optional()?;

        Ok(loan)
    }

    /// List a user's loans
    pub fn list_loans(&self, user_id: &str) -> Result<Vec<Loan>> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM loans WHERE user_id = ? ORDER BY id ASC",
            LOAN_COLUMNS
        ))?;

        let loans = stmt
            .query_map(params![user_id], row_to_loan)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(loans)
    }

    /// All of a user's active loans, regardless of due date
    ///
    /// EMIs are treated as a flat recurring monthly cost; selection is by
    /// status only.
    pub fn active_loans(&self, user_id: &str) -> Result<Vec<Loan>> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM loans WHERE user_id = ? AND status = 'active' ORDER BY id ASC",
            LOAN_COLUMNS
        ))?;

        let loans = stmt
            .query_map(params![user_id], row_to_loan)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(loans)
    }

    /// Mark a loan closed; true if a row was updated
    pub fn close_loan(&self, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let affected = conn.execute(
            "UPDATE loans SET status = 'closed' WHERE id = ?",
            params![id],
        )?;
        Ok(affected > 0)
    }

    /// Delete a loan; true if a row was removed
    pub fn delete_loan(&self, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let affected = conn.execute("DELETE FROM loans WHERE id = ?", params![id])?;
        Ok(affected > 0)
    }

    /// Count a user's loans
    pub fn count_loans(&self, user_id: &str) -> Result<i64> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM loans WHERE user_id = ?",
            params![user_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}
