//! Keyword categorization of monthly expenses into budget buckets
//!
//! Classification is case-insensitive substring matching over a transaction's
//! category, expense-type hint, and description, in strict priority order:
//! needs, then savings, then investment, then wants as the default. Bills and
//! loan EMIs skip classification entirely; both are contractual needs.

use chrono::NaiveDate;
use serde::Serialize;

use super::aggregate::MonthlyExpenses;
use crate::models::{Bucket, Transaction};

/// Sub-bucket display names
pub const FIXED_CONTRACTUAL: &str = "Fixed & Contractual Costs";
pub const VARIABLE_LIVING: &str = "Variable Living Expenses";
pub const DISCRETIONARY_LIFESTYLE: &str = "Discretionary & Lifestyle";

const NEEDS_KEYWORDS: &[&str] = &[
    "groceries",
    "food",
    "utilities",
    "rent",
    "mortgage",
    "transportation",
    "fuel",
    "insurance",
    "healthcare",
    "education",
    "childcare",
    "loan payment",
    "emi",
];

const FIXED_COST_KEYWORDS: &[&str] = &[
    "rent",
    "mortgage",
    "insurance",
    "loan payment",
    "emi",
    "subscription",
    "internet",
    "phone",
];

const SAVINGS_KEYWORDS: &[&str] = &["savings", "emergency fund", "deposit"];

const INVESTMENT_KEYWORDS: &[&str] = &[
    "investment",
    "stock",
    "mutual fund",
    "gold",
    "sgb",
    "shares",
    "crypto",
    "real estate",
];

/// Where an aggregated expense item came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseSource {
    Transaction,
    Bill,
    Emi,
}

/// One classified expense
#[derive(Debug, Clone, Serialize)]
pub struct ExpenseItem {
    pub source: ExpenseSource,
    pub description: String,
    pub category: Option<String>,
    /// Absolute amount; source sign is discarded
    pub amount: f64,
    pub date: Option<NaiveDate>,
    /// Sub-bucket label, where the bucket defines one
    pub subcategory: Option<&'static str>,
}

/// Keyword lists driving classification
///
/// Injected at construction so tests can substitute the taxonomy.
/// Keywords are expected lowercase; matching lowercases the haystack only.
#[derive(Debug, Clone)]
pub struct KeywordTaxonomy {
    pub needs: Vec<String>,
    pub fixed_costs: Vec<String>,
    pub savings: Vec<String>,
    pub investment: Vec<String>,
}

impl Default for KeywordTaxonomy {
    fn default() -> Self {
        let own = |list: &[&str]| list.iter().map(|s| s.to_string()).collect();
        Self {
            needs: own(NEEDS_KEYWORDS),
            fixed_costs: own(FIXED_COST_KEYWORDS),
            savings: own(SAVINGS_KEYWORDS),
            investment: own(INVESTMENT_KEYWORDS),
        }
    }
}

/// Expenses accumulated into one bucket
#[derive(Debug, Clone, Default, Serialize)]
pub struct BucketExpenses {
    pub items: Vec<ExpenseItem>,
    pub total: f64,
}

impl BucketExpenses {
    fn push(&mut self, item: ExpenseItem) {
        self.total += item.amount;
        self.items.push(item);
    }
}

/// Needs split into its two sub-buckets
///
/// The sub-bucket totals always sum to `total`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NeedsExpenses {
    pub total: f64,
    pub fixed_contractual: BucketExpenses,
    pub variable_living: BucketExpenses,
}

impl NeedsExpenses {
    fn push_fixed(&mut self, item: ExpenseItem) {
        self.total += item.amount;
        self.fixed_contractual.push(item);
    }

    fn push_variable(&mut self, item: ExpenseItem) {
        self.total += item.amount;
        self.variable_living.push(item);
    }
}

/// The five buckets with their classified items and totals
#[derive(Debug, Clone, Default, Serialize)]
pub struct CategorizedExpenses {
    pub needs: NeedsExpenses,
    pub wants: BucketExpenses,
    pub savings: BucketExpenses,
    pub investment: BucketExpenses,
    pub survival_buffer: BucketExpenses,
}

impl CategorizedExpenses {
    pub fn total_for(&self, bucket: Bucket) -> f64 {
        match bucket {
            Bucket::Needs => self.needs.total,
            Bucket::Wants => self.wants.total,
            Bucket::Savings => self.savings.total,
            Bucket::Investment => self.investment.total,
            Bucket::SurvivalBuffer => self.survival_buffer.total,
        }
    }

    /// Sum across all five buckets
    pub fn total(&self) -> f64 {
        Bucket::ALL.iter().map(|b| self.total_for(*b)).sum()
    }
}

/// Classifies aggregated expenses into buckets
pub struct Categorizer {
    taxonomy: KeywordTaxonomy,
}

impl Default for Categorizer {
    fn default() -> Self {
        Self::new(KeywordTaxonomy::default())
    }
}

impl Categorizer {
    pub fn new(taxonomy: KeywordTaxonomy) -> Self {
        Self { taxonomy }
    }

    /// Categorize one month of aggregated expenses
    pub fn categorize(&self, month: &MonthlyExpenses) -> CategorizedExpenses {
        let mut out = CategorizedExpenses::default();

        for tx in &month.transactions {
            let (bucket, subcategory) = self.classify(tx);
            let item = ExpenseItem {
                source: ExpenseSource::Transaction,
                description: tx.description.clone(),
                category: tx.category.clone(),
                amount: tx.amount.abs(),
                date: Some(tx.date),
                subcategory,
            };
            match bucket {
                Bucket::Needs => {
                    if subcategory == Some(FIXED_CONTRACTUAL) {
                        out.needs.push_fixed(item);
                    } else {
                        out.needs.push_variable(item);
                    }
                }
                Bucket::Wants => out.wants.push(item),
                Bucket::Savings => out.savings.push(item),
                Bucket::Investment => out.investment.push(item),
                Bucket::SurvivalBuffer => out.survival_buffer.push(item),
            }
        }

        // Bills bypass classification: a scheduled bill is contractual by
        // definition, whatever its category says.
        for bill in &month.bills {
            out.needs.push_fixed(ExpenseItem {
                source: ExpenseSource::Bill,
                description: bill.name.clone(),
                category: bill.category.clone(),
                amount: bill.amount,
                date: Some(bill.due_date_in_month(month.from)),
                subcategory: Some(FIXED_CONTRACTUAL),
            });
        }

        // One synthetic item per active loan, full EMI, not prorated
        for loan in &month.loans {
            out.needs.push_fixed(ExpenseItem {
                source: ExpenseSource::Emi,
                description: format!("{} EMI", loan.name),
                category: Some("loan payment".to_string()),
                amount: loan.emi_amount,
                date: None,
                subcategory: Some(FIXED_CONTRACTUAL),
            });
        }

        out
    }

    fn matches_any(haystack: &str, keywords: &[String]) -> bool {
        keywords.iter().any(|k| haystack.contains(k.as_str()))
    }

    /// Classify a single transaction, first match wins
    fn classify(&self, tx: &Transaction) -> (Bucket, Option<&'static str>) {
        let haystack = format!(
            "{} {} {}",
            tx.category.as_deref().unwrap_or(""),
            tx.expense_type.as_deref().unwrap_or(""),
            tx.description
        )
        .to_lowercase();

        if Self::matches_any(&haystack, &self.taxonomy.needs) {
            let sub = if Self::matches_any(&haystack, &self.taxonomy.fixed_costs) {
                FIXED_CONTRACTUAL
            } else {
                VARIABLE_LIVING
            };
            return (Bucket::Needs, Some(sub));
        }

        if Self::matches_any(&haystack, &self.taxonomy.savings) {
            return (Bucket::Savings, Some(DISCRETIONARY_LIFESTYLE));
        }

        if Self::matches_any(&haystack, &self.taxonomy.investment) {
            return (Bucket::Investment, None);
        }

        (Bucket::Wants, None)
    }
}
