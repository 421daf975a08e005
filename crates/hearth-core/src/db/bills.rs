//! Scheduled bill operations

use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension, Row};

use super::{parse_datetime, Database};
use crate::error::Result;
use crate::models::{NewScheduledBill, ScheduledBill};

fn row_to_bill(row: &Row<'_>) -> rusqlite::Result<ScheduledBill> {
    let due_day: i64 = row.get(5)?;
    let created_at_str: String = row.get(7)?;

    Ok(ScheduledBill {
        id: row.get(0)?,
        user_id: row.get(1)?,
        name: row.get(2)?,
        category: row.get(3)?,
        amount: row.get(4)?,
        due_day: due_day.clamp(1, 31) as u32,
        active: row.get(6)?,
        created_at: parse_datetime(&created_at_str),
    })
}

const BILL_COLUMNS: &str = "id, user_id, name, category, amount, due_day, active, created_at";

impl Database {
    /// Insert a scheduled bill, returning its new ID
    pub fn insert_bill(&self, user_id: &str, bill: &NewScheduledBill) -> Result<i64> {
        let conn = self.conn()?;

        conn.execute(
            r#"
            INSERT INTO scheduled_bills (user_id, name, category, amount, due_day, active)
            VALUES (?, ?, ?, ?, ?, 1)
            "#,
            params![user_id, bill.name, bill.category, bill.amount, bill.due_day],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// Get a scheduled bill by ID
    pub fn get_bill(&self, id: i64) -> Result<Option<ScheduledBill>> {
        let conn = self.conn()?;

        let bill = conn
            .query_row(
                &format!("SELECT {} FROM scheduled_bills WHERE id = ?", BILL_COLUMNS),
                params![id],
                row_to_bill,
            )
            .optional()?;

        Ok(bill)
    }

    /// List a user's scheduled bills
    pub fn list_bills(&self, user_id: &str) -> Result<Vec<ScheduledBill>> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM scheduled_bills WHERE user_id = ? ORDER BY due_day ASC, id ASC",
            BILL_COLUMNS
        ))?;

        let bills = stmt
            .query_map(params![user_id], row_to_bill)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(bills)
    }

    /// Active bills for a user whose due date falls within [from, to] inclusive
    ///
    /// Due dates are materialized against the month containing `from`; a
    /// due_day past the end of that month lands on its last day.
    pub fn bills_due_between(
        &self,
        user_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<ScheduledBill>> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM scheduled_bills WHERE user_id = ? AND active = 1 ORDER BY due_day ASC, id ASC",
            BILL_COLUMNS
        ))?;

        let bills = stmt
            .query_map(params![user_id], row_to_bill)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(bills
            .into_iter()
            .filter(|bill| {
                let due = bill.due_date_in_month(from);
                from <= due && due <= to
            })
            .collect())
    }

    /// Set a bill's active flag; true if a row was updated
    pub fn set_bill_active(&self, id: i64, active: bool) -> Result<bool> {
        let conn = self.conn()?;
        let affected = conn.execute(
            "UPDATE scheduled_bills SET active = ? WHERE id = ?",
            params![active, id],
        )?;
        Ok(affected > 0)
    }

    /// Delete a scheduled bill; true if a row was removed
    pub fn delete_bill(&self, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let affected = conn.execute("DELETE FROM scheduled_bills WHERE id = ?", params![id])?;
        Ok(affected > 0)
    }

    /// Count a user's scheduled bills
    pub fn count_bills(&self, user_id: &str) -> Result<i64> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM scheduled_bills WHERE user_id = ?",
            params![user_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}
