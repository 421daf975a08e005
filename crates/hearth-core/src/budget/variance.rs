//! Budget variance analysis

use serde::Serialize;

use super::categorize::CategorizedExpenses;
use crate::models::{Bucket, UserBudgetPlan};

/// Health of one bucket relative to its budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BucketStatus {
    Good,
    Warning,
    Over,
}

impl BucketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Warning => "warning",
            Self::Over => "over",
        }
    }
}

impl std::fmt::Display for BucketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Budgeted vs. actual for one bucket
#[derive(Debug, Clone, Serialize)]
pub struct BucketVariance {
    pub bucket: Bucket,
    pub budgeted: f64,
    pub actual: f64,
    /// budgeted minus actual; negative when over budget
    pub difference: f64,
    pub percentage_used: f64,
    pub status: BucketStatus,
}

/// Variance across all budgeted buckets
#[derive(Debug, Clone, Serialize)]
pub struct BudgetAnalysis {
    pub buckets: Vec<BucketVariance>,
    pub total_budget: f64,
    pub total_actual: f64,
    pub total_remaining: f64,
}

/// Compare categorized spend against the plan's targets
///
/// Buckets with a 0% allocation are omitted entirely, not zero-filled.
pub fn analyze_variance(plan: &UserBudgetPlan, expenses: &CategorizedExpenses) -> BudgetAnalysis {
    let mut buckets = Vec::new();
    let mut total_budget = 0.0;
    let mut total_actual = 0.0;

    for bucket in Bucket::ALL {
        let pct = plan.allocations.get(bucket);
        if pct <= 0.0 {
            continue;
        }

        let budgeted = plan.monthly_income * pct / 100.0;
        let actual = expenses.total_for(bucket);
        let percentage_used = if budgeted > 0.0 {
            actual / budgeted * 100.0
        } else {
            0.0
        };

        // Both thresholds are strict: exactly 90% is still good,
        // exactly 100% is still warning.
        let status = if percentage_used > 100.0 {
            BucketStatus::Over
        } else if percentage_used > 90.0 {
            BucketStatus::Warning
        } else {
            BucketStatus::Good
        };

        total_budget += budgeted;
        total_actual += actual;
        buckets.push(BucketVariance {
            bucket,
            budgeted,
            actual,
            difference: budgeted - actual,
            percentage_used,
            status,
        });
    }

    BudgetAnalysis {
        buckets,
        total_budget,
        total_actual,
        total_remaining: total_budget - total_actual,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::categorize::{BucketExpenses, ExpenseItem, ExpenseSource};
    use crate::models::{Allocations, CategoryLabels, PlanId};
    use chrono::Utc;

    fn plan(income: f64, allocations: Allocations) -> UserBudgetPlan {
        UserBudgetPlan {
            user_id: "alice".to_string(),
            plan_id: PlanId::MostPopular,
            plan_name: "50-30-20 Budget".to_string(),
            monthly_income: income,
            allocations,
            categories: CategoryLabels::default(),
            selected_at: Utc::now(),
        }
    }

    fn spend(amount: f64) -> BucketExpenses {
        BucketExpenses {
            items: vec![ExpenseItem {
                source: ExpenseSource::Transaction,
                description: "spend".to_string(),
                category: None,
                amount,
                date: None,
                subcategory: None,
            }],
            total: amount,
        }
    }

    fn wants_only(income: f64, actual: f64) -> BudgetAnalysis {
        let plan = plan(
            income,
            Allocations {
                needs: 0.0,
                wants: 100.0,
                savings: 0.0,
                investment: 0.0,
                survival_buffer: 0.0,
            },
        );
        let expenses = CategorizedExpenses {
            wants: spend(actual),
            ..Default::default()
        };
        analyze_variance(&plan, &expenses)
    }

    #[test]
    fn test_zero_percent_buckets_are_omitted() {
        let analysis = wants_only(1000.0, 100.0);
        assert_eq!(analysis.buckets.len(), 1);
        assert_eq!(analysis.buckets[0].bucket, crate::models::Bucket::Wants);
    }

    #[test]
    fn test_exactly_90_percent_is_good() {
        let analysis = wants_only(1000.0, 900.0);
        assert_eq!(analysis.buckets[0].percentage_used, 90.0);
        assert_eq!(analysis.buckets[0].status, BucketStatus::Good);
    }

    #[test]
    fn test_just_over_90_percent_is_warning() {
        let analysis = wants_only(1000.0, 900.1);
        assert!(analysis.buckets[0].percentage_used > 90.0);
        assert_eq!(analysis.buckets[0].status, BucketStatus::Warning);
    }

    #[test]
    fn test_exactly_100_percent_is_warning_not_over() {
        let analysis = wants_only(1000.0, 1000.0);
        assert_eq!(analysis.buckets[0].percentage_used, 100.0);
        assert_eq!(analysis.buckets[0].status, BucketStatus::Warning);
    }

    #[test]
    fn test_over_100_percent_is_over() {
        let analysis = wants_only(1000.0, 1000.1);
        assert_eq!(analysis.buckets[0].status, BucketStatus::Over);
        assert!(analysis.buckets[0].difference < 0.0);
    }

    #[test]
    fn test_totals_accumulate_across_buckets() {
        let plan = plan(
            100000.0,
            Allocations {
                needs: 50.0,
                wants: 30.0,
                savings: 20.0,
                investment: 0.0,
                survival_buffer: 0.0,
            },
        );
        let expenses = CategorizedExpenses {
            wants: spend(3000.0),
            ..Default::default()
        };
        let analysis = analyze_variance(&plan, &expenses);

        assert_eq!(analysis.buckets.len(), 3);
        assert_eq!(analysis.total_budget, 100000.0);
        assert_eq!(analysis.total_actual, 3000.0);
        assert_eq!(analysis.total_remaining, 97000.0);
    }
}
