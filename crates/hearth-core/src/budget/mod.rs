//! Budget allocation analysis
//!
//! This module is organized as a pipeline over one calendar month:
//! - `plans` - Fixture registry of the five allocation strategies
//! - `aggregate` - Pulls transactions, bills, and loan EMIs for the month
//! - `categorize` - Classifies every item into a budget bucket
//! - `variance` - Compares bucket totals against the plan's targets
//! - `suggest` - Turns variance results into human-readable advisories
//!
//! `BudgetService` ties the stages together and owns the plan CRUD.

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::debug;

use crate::db::Database;
use crate::error::{Error, Result};
use crate::models::{Allocations, PlanId, UserBudgetPlan};

mod aggregate;
mod categorize;
mod plans;
mod suggest;
mod variance;

pub use aggregate::{
    first_day_of_month, last_day_of_month, Aggregator, BillSource, MonthlyExpenses,
};
pub use categorize::{
    BucketExpenses, CategorizedExpenses, Categorizer, ExpenseItem, ExpenseSource, KeywordTaxonomy,
    NeedsExpenses, DISCRETIONARY_LIFESTYLE, FIXED_CONTRACTUAL, VARIABLE_LIVING,
};
pub use plans::AllocationPlan;
pub use suggest::{generate_suggestions, Suggestion, SuggestionKind};
pub use variance::{analyze_variance, BucketStatus, BucketVariance, BudgetAnalysis};

/// The plan portion of an analysis report
#[derive(Debug, Clone, Serialize)]
pub struct PlanSnapshot {
    pub selected_plan: PlanId,
    pub plan_name: String,
    pub monthly_income: f64,
    pub allocations: Allocations,
}

/// Aggregate counters for an analysis report
#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    pub total_transactions: usize,
    pub total_bills: usize,
    pub total_emis: usize,
    /// Sum across all buckets after categorization
    pub total_expenses: f64,
    /// total_actual / total_budget as a percentage (0 when nothing budgeted)
    pub budget_utilization: f64,
}

/// The combined analysis report returned to callers
#[derive(Debug, Clone, Serialize)]
pub struct BudgetReport {
    pub budget_plan: PlanSnapshot,
    pub categorized_expenses: CategorizedExpenses,
    pub analysis: BudgetAnalysis,
    pub suggestions: Vec<Suggestion>,
    pub summary: ReportSummary,
}

/// Plan selection and monthly budget analysis over the record stores
pub struct BudgetService<'a> {
    db: &'a Database,
    bills: Option<&'a dyn BillSource>,
    categorizer: Categorizer,
}

impl<'a> BudgetService<'a> {
    /// Service reading bills from the main database
    pub fn new(db: &'a Database) -> Self {
        Self {
            db,
            bills: Some(db),
            categorizer: Categorizer::default(),
        }
    }

    /// Service with an explicit (possibly absent) bill source
    pub fn with_bill_source(db: &'a Database, bills: Option<&'a dyn BillSource>) -> Self {
        Self {
            db,
            bills,
            categorizer: Categorizer::default(),
        }
    }

    /// Replace the keyword taxonomy used for categorization
    pub fn with_taxonomy(mut self, taxonomy: KeywordTaxonomy) -> Self {
        self.categorizer = Categorizer::new(taxonomy);
        self
    }

    /// All five fixture plans
    pub fn list_plans() -> Vec<AllocationPlan> {
        AllocationPlan::all()
    }

    /// Select (or replace) the user's budget plan
    ///
    /// Validation happens before anything is written: the plan identifier
    /// must name a fixture plan and the income must be positive.
    pub fn select_plan(
        &self,
        user_id: &str,
        plan_id: &str,
        monthly_income: f64,
    ) -> Result<UserBudgetPlan> {
        let plan = AllocationPlan::lookup(plan_id)
            .ok_or_else(|| Error::InvalidData(format!("Invalid plan: {}", plan_id)))?;

        if !monthly_income.is_finite() || monthly_income <= 0.0 {
            return Err(Error::InvalidData(
                "Monthly income must be greater than zero".to_string(),
            ));
        }

        let record = UserBudgetPlan {
            user_id: user_id.to_string(),
            plan_id: plan.id,
            plan_name: plan.name.to_string(),
            monthly_income,
            allocations: plan.allocations,
            categories: plan.categories,
            selected_at: Utc::now(),
        };
        self.db.upsert_budget_plan(&record)?;

        debug!(user = user_id, plan = %record.plan_id, "Budget plan selected");
        Ok(record)
    }

    /// The user's selected plan
    pub fn plan(&self, user_id: &str) -> Result<UserBudgetPlan> {
        self.db
            .get_budget_plan(user_id)?
            .ok_or_else(|| Error::NotFound(format!("No budget plan for user {}", user_id)))
    }

    /// Delete the user's plan; not-found is an error, not a silent success
    pub fn delete_plan(&self, user_id: &str) -> Result<()> {
        if self.db.delete_budget_plan(user_id)? {
            Ok(())
        } else {
            Err(Error::NotFound(format!(
                "No budget plan for user {}",
                user_id
            )))
        }
    }

    /// Run the full analysis for the calendar month containing `today`
    ///
    /// Stateless single pass: aggregate, categorize, compare, advise.
    pub fn analyze(&self, user_id: &str, today: NaiveDate) -> Result<BudgetReport> {
        let plan = self.plan(user_id)?;

        let month = Aggregator::with_bill_source(self.db, self.bills).gather(user_id, today)?;
        let categorized = self.categorizer.categorize(&month);
        let analysis = analyze_variance(&plan, &categorized);
        let suggestions = generate_suggestions(&analysis);

        let budget_utilization = if analysis.total_budget > 0.0 {
            analysis.total_actual / analysis.total_budget * 100.0
        } else {
            0.0
        };

        debug!(
            user = user_id,
            buckets = analysis.buckets.len(),
            suggestions = suggestions.len(),
            "Budget analysis complete"
        );

        Ok(BudgetReport {
            budget_plan: PlanSnapshot {
                selected_plan: plan.plan_id,
                plan_name: plan.plan_name,
                monthly_income: plan.monthly_income,
                allocations: plan.allocations,
            },
            summary: ReportSummary {
                total_transactions: month.transactions.len(),
                total_bills: month.bills.len(),
                total_emis: month.loans.len(),
                total_expenses: categorized.total(),
                budget_utilization,
            },
            categorized_expenses: categorized,
            analysis,
            suggestions,
        })
    }
}
