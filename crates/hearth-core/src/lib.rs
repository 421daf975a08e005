//! Hearth Core Library
//!
//! Shared functionality for the Hearth family finance tool:
//! - Database access and migrations
//! - Record stores for transactions, scheduled bills, and loans
//! - CSV import for transaction statements
//! - Budget allocation plan registry (50-30-20 and friends)
//! - Monthly expense aggregation and keyword categorization
//! - Budget variance analysis and suggestion generation

pub mod budget;
pub mod db;
pub mod error;
pub mod import;
pub mod models;

pub use budget::{
    AllocationPlan, Aggregator, BillSource, BucketStatus, BucketVariance, BudgetAnalysis,
    BudgetReport, BudgetService, CategorizedExpenses, Categorizer, KeywordTaxonomy,
    MonthlyExpenses, Suggestion, SuggestionKind,
};
pub use db::Database;
pub use error::{Error, Result};
pub use import::ImportSummary;
