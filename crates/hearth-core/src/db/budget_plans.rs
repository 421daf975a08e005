//! Budget plan storage (one row per user)

use rusqlite::{params, OptionalExtension};

use super::{parse_datetime, Database};
use crate::error::Result;
use crate::models::{PlanId, UserBudgetPlan};

impl Database {
    /// Insert or replace the user's budget plan
    ///
    /// The unique index on user_id makes this a single atomic upsert, so
    /// concurrent selections from the same user resolve to last-write-wins
    /// without a find-then-write race.
    pub fn upsert_budget_plan(&self, plan: &UserBudgetPlan) -> Result<()> {
        let conn = self.conn()?;

        let allocations = serde_json::to_string(&plan.allocations)?;
        let categories = serde_json::to_string(&plan.categories)?;

        conn.execute(
            r#"
            INSERT INTO budget_plans (user_id, plan_id, plan_name, monthly_income, allocations, categories, selected_at)
            VALUES (?, ?, ?, ?, ?, ?, CURRENT_TIMESTAMP)
            ON CONFLICT(user_id) DO UPDATE SET
                plan_id = excluded.plan_id,
                plan_name = excluded.plan_name,
                monthly_income = excluded.monthly_income,
                allocations = excluded.allocations,
                categories = excluded.categories,
                selected_at = CURRENT_TIMESTAMP
            "#,
            params![
                plan.user_id,
                plan.plan_id.as_str(),
                plan.plan_name,
                plan.monthly_income,
                allocations,
                categories,
            ],
        )?;

        Ok(())
    }

    /// Get the user's budget plan, if one has been selected
    pub fn get_budget_plan(&self, user_id: &str) -> Result<Option<UserBudgetPlan>> {
        let conn = self.conn()?;

        let row: Option<(String, String, f64, String, String, String)> = conn
            .query_row(
                r#"
                SELECT plan_id, plan_name, monthly_income, allocations, categories, selected_at
                FROM budget_plans
                WHERE user_id = ?
                "#,
                params![user_id],
                |row| {
                    Ok((
                        row.get(0)?,
                        row.get(1)?,
                        row.get(2)?,
                        row.get(3)?,
                        row.get(4)?,
                        row.get(5)?,
                    ))
                },
            )
            .optional()?;

        let Some((plan_id_str, plan_name, monthly_income, allocations, categories, selected_at)) =
            row
        else {
            return Ok(None);
        };

        let plan_id: PlanId = plan_id_str
            .parse()
            .map_err(crate::error::Error::InvalidData)?;

        Ok(Some(UserBudgetPlan {
            user_id: user_id.to_string(),
            plan_id,
            plan_name,
            monthly_income,
            allocations: serde_json::from_str(&allocations)?,
            categories: serde_json::from_str(&categories)?,
            selected_at: parse_datetime(&selected_at),
        }))
    }

    /// Delete the user's budget plan; true if a row was removed
    pub fn delete_budget_plan(&self, user_id: &str) -> Result<bool> {
        let conn = self.conn()?;
        let affected = conn.execute(
            "DELETE FROM budget_plans WHERE user_id = ?",
            params![user_id],
        )?;
        Ok(affected > 0)
    }
}
