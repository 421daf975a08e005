//! Allocation plan registry
//!
//! Fixture data for the five named budgeting strategies. Each plan fixes a
//! percentage split across the five buckets and the category labels shown
//! for each bucket. This is constant data, never persisted per user.

use serde::Serialize;

use crate::models::{Allocations, CategoryLabels, PlanId};

const NEEDS_LABELS: &[&str] = &[
    "Groceries",
    "Rent",
    "Utilities",
    "Transportation",
    "Insurance",
    "Healthcare",
    "EMI Payments",
];

const WANTS_LABELS: &[&str] = &[
    "Dining Out",
    "Entertainment",
    "Shopping",
    "Subscriptions",
    "Travel",
];

const SAVINGS_LABELS: &[&str] = &["Savings Account", "Emergency Fund", "Fixed Deposits"];

const INVESTMENT_LABELS: &[&str] = &["Mutual Funds", "Stocks", "Gold", "Real Estate"];

const SURVIVAL_BUFFER_LABELS: &[&str] = &["Emergency Reserve", "Contingency Fund"];

fn labels(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

/// A named fixed-percentage budgeting strategy
#[derive(Debug, Clone, Serialize)]
pub struct AllocationPlan {
    pub id: PlanId,
    pub name: &'static str,
    pub allocations: Allocations,
    pub categories: CategoryLabels,
}

impl AllocationPlan {
    /// The fixture plan for a known identifier
    pub fn get(id: PlanId) -> Self {
        match id {
            PlanId::BareMinimum => Self {
                id,
                name: "Bare Minimum Budget",
                allocations: Allocations {
                    needs: 80.0,
                    wants: 0.0,
                    savings: 0.0,
                    investment: 0.0,
                    survival_buffer: 20.0,
                },
                categories: CategoryLabels {
                    needs: labels(NEEDS_LABELS),
                    survival_buffer: labels(SURVIVAL_BUFFER_LABELS),
                    ..Default::default()
                },
            },
            PlanId::MostPopular => Self {
                id,
                name: "50-30-20 Budget",
                allocations: Allocations {
                    needs: 50.0,
                    wants: 30.0,
                    savings: 20.0,
                    investment: 0.0,
                    survival_buffer: 0.0,
                },
                categories: CategoryLabels {
                    needs: labels(NEEDS_LABELS),
                    wants: labels(WANTS_LABELS),
                    savings: labels(SAVINGS_LABELS),
                    ..Default::default()
                },
            },
            PlanId::Standard => Self {
                id,
                name: "40-30-30 Budget",
                allocations: Allocations {
                    needs: 40.0,
                    wants: 30.0,
                    savings: 30.0,
                    investment: 0.0,
                    survival_buffer: 0.0,
                },
                categories: CategoryLabels {
                    needs: labels(NEEDS_LABELS),
                    wants: labels(WANTS_LABELS),
                    savings: labels(SAVINGS_LABELS),
                    ..Default::default()
                },
            },
            PlanId::Stable => Self {
                id,
                name: "60-30-10 Budget",
                allocations: Allocations {
                    needs: 60.0,
                    wants: 30.0,
                    savings: 10.0,
                    investment: 0.0,
                    survival_buffer: 0.0,
                },
                categories: CategoryLabels {
                    needs: labels(NEEDS_LABELS),
                    wants: labels(WANTS_LABELS),
                    savings: labels(SAVINGS_LABELS),
                    ..Default::default()
                },
            },
            PlanId::Good => Self {
                id,
                name: "60-20-10-10 Budget",
                allocations: Allocations {
                    needs: 60.0,
                    wants: 20.0,
                    savings: 10.0,
                    investment: 10.0,
                    survival_buffer: 0.0,
                },
                categories: CategoryLabels {
                    needs: labels(NEEDS_LABELS),
                    wants: labels(WANTS_LABELS),
                    savings: labels(SAVINGS_LABELS),
                    investment: labels(INVESTMENT_LABELS),
                    ..Default::default()
                },
            },
        }
    }

    /// Look up a plan by its string identifier
    ///
    /// Returns None for unrecognized identifiers.
    pub fn lookup(id: &str) -> Option<Self> {
        id.parse::<PlanId>().ok().map(Self::get)
    }

    /// All five fixture plans
    pub fn all() -> Vec<Self> {
        [
            PlanId::BareMinimum,
            PlanId::MostPopular,
            PlanId::Standard,
            PlanId::Stable,
            PlanId::Good,
        ]
        .into_iter()
        .map(Self::get)
        .collect()
    }
}
