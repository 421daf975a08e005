//! Transaction operations

use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension, Row};

use super::{parse_date, parse_datetime, Database};
use crate::error::Result;
use crate::models::{NewTransaction, Transaction, TransactionKind};

fn row_to_transaction(row: &Row<'_>) -> rusqlite::Result<Transaction> {
    let date_str: String = row.get(2)?;
    let kind_str: String = row.get(6)?;
    let created_at_str: String = row.get(8)?;

    Ok(Transaction {
        id: row.get(0)?,
        user_id: row.get(1)?,
        date: parse_date(&date_str),
        description: row.get(3)?,
        category: row.get(4)?,
        expense_type: row.get(5)?,
        kind: kind_str.parse().unwrap_or(TransactionKind::Expense),
        amount: row.get(7)?,
        created_at: parse_datetime(&created_at_str),
    })
}

const TRANSACTION_COLUMNS: &str =
    "id, user_id, date, description, category, expense_type, kind, amount, created_at";

impl Database {
    /// Insert a transaction, returning its new ID
    pub fn insert_transaction(&self, user_id: &str, tx: &NewTransaction) -> Result<i64> {
        let conn = self.conn()?;

        conn.execute(
            r#"
            INSERT INTO transactions (user_id, date, description, category, expense_type, kind, amount)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                user_id,
                tx.date.to_string(),
                tx.description,
                tx.category,
                tx.expense_type,
                tx.kind.as_str(),
                tx.amount,
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// Get a transaction by ID
    pub fn get_transaction(&self, id: i64) -> Result<Option<Transaction>> {
        let conn = self.conn()?;

        let tx = conn
            .query_row(
                &format!(
                    "SELECT {} FROM transactions WHERE id = ?",
                    TRANSACTION_COLUMNS
                ),
                params![id],
                row_to_transaction,
            )
            .optional()?;

        Ok(tx)
    }

    /// List a user's transactions, most recent first
    pub fn list_transactions(&self, user_id: &str, limit: i64) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM transactions WHERE user_id = ? ORDER BY date DESC, id DESC LIMIT ?",
            TRANSACTION_COLUMNS
        ))?;

        let transactions = stmt
            .query_map(params![user_id, limit], row_to_transaction)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(transactions)
    }

    /// Expense transactions for a user dated within [from, to] inclusive
    pub fn expenses_between(
        &self,
        user_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare(&format!(
            r#"
            SELECT {}
            FROM transactions
            WHERE user_id = ? AND kind = 'expense' AND date BETWEEN ? AND ?
            ORDER BY date ASC, id ASC
            "#,
            TRANSACTION_COLUMNS
        ))?;

        let transactions = stmt
            .query_map(
                params![user_id, from.to_string(), to.to_string()],
                row_to_transaction,
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(transactions)
    }

    /// Total expense spend for a user within [from, to] inclusive
    ///
    /// Signed amounts are folded with ABS, matching categorization.
    pub fn expense_total_between(
        &self,
        user_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<f64> {
        let conn = self.conn()?;

        let total: f64 = conn.query_row(
            "SELECT COALESCE(SUM(ABS(amount)), 0) FROM transactions
             WHERE user_id = ? AND kind = 'expense' AND date BETWEEN ? AND ?",
            params![user_id, from.to_string(), to.to_string()],
            |row| row.get(0),
        )?;

        Ok(total)
    }

    /// Delete a transaction; true if a row was removed
    pub fn delete_transaction(&self, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let affected = conn.execute("DELETE FROM transactions WHERE id = ?", params![id])?;
        Ok(affected > 0)
    }

    /// Count a user's transactions
    pub fn count_transactions(&self, user_id: &str) -> Result<i64> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM transactions WHERE user_id = ?",
            params![user_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}
