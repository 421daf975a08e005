//! Domain models for Hearth

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A recorded income or expense transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    /// The family member this record belongs to
    pub user_id: String,
    pub date: NaiveDate,
    pub description: String,
    /// Free-text category (e.g. "rent", "dining out")
    pub category: Option<String>,
    /// Free-text expense type hint (e.g. "Fixed", "Recurring")
    pub expense_type: Option<String>,
    pub kind: TransactionKind,
    /// Signed amount; expenses may be recorded negative by some sources
    pub amount: f64,
    pub created_at: DateTime<Utc>,
}

/// Transaction direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl std::str::FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(format!("Unknown transaction kind: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A transaction to be inserted
#[derive(Debug, Clone, Deserialize)]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub description: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub expense_type: Option<String>,
    pub kind: TransactionKind,
    pub amount: f64,
}

/// A recurring bill with a fixed day-of-month due date
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledBill {
    pub id: i64,
    pub user_id: String,
    pub name: String,
    pub category: Option<String>,
    pub amount: f64,
    /// Day of month the bill is due (1-31, clamped to month length)
    pub due_day: u32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl ScheduledBill {
    /// Concrete due date within the month containing `anchor`
    ///
    /// A due_day past the end of the month falls on the month's last day
    /// (e.g. due_day 31 in February).
    pub fn due_date_in_month(&self, anchor: NaiveDate) -> NaiveDate {
        use chrono::Datelike;
        let last = crate::budget::last_day_of_month(anchor);
        let day = self.due_day.min(last.day());
        NaiveDate::from_ymd_opt(anchor.year(), anchor.month(), day).unwrap_or(last)
    }
}

/// A scheduled bill to be inserted
#[derive(Debug, Clone, Deserialize)]
pub struct NewScheduledBill {
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    pub amount: f64,
    pub due_day: u32,
}

/// A loan with a fixed monthly installment (EMI)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Loan {
    pub id: i64,
    pub user_id: String,
    pub name: String,
    pub lender: Option<String>,
    pub principal: f64,
    /// Equated monthly installment
    pub emi_amount: f64,
    pub due_day: u32,
    pub status: LoanStatus,
    pub created_at: DateTime<Utc>,
}

/// Loan repayment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanStatus {
    Active,
    Closed,
}

impl LoanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Closed => "closed",
        }
    }
}

impl std::str::FromStr for LoanStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "closed" => Ok(Self::Closed),
            _ => Err(format!("Unknown loan status: {}", s)),
        }
    }
}

impl std::fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A loan to be inserted
#[derive(Debug, Clone, Deserialize)]
pub struct NewLoan {
    pub name: String,
    #[serde(default)]
    pub lender: Option<String>,
    pub principal: f64,
    pub emi_amount: f64,
    pub due_day: u32,
}

/// The five budget buckets every allocation plan distributes across
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    Needs,
    Wants,
    Savings,
    Investment,
    SurvivalBuffer,
}

impl Bucket {
    /// Fixed iteration order so analysis output is deterministic
    pub const ALL: [Bucket; 5] = [
        Bucket::Needs,
        Bucket::Wants,
        Bucket::Savings,
        Bucket::Investment,
        Bucket::SurvivalBuffer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Needs => "needs",
            Self::Wants => "wants",
            Self::Savings => "savings",
            Self::Investment => "investment",
            Self::SurvivalBuffer => "survival_buffer",
        }
    }
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Bucket {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "needs" => Ok(Self::Needs),
            "wants" => Ok(Self::Wants),
            "savings" => Ok(Self::Savings),
            "investment" => Ok(Self::Investment),
            "survival_buffer" => Ok(Self::SurvivalBuffer),
            _ => Err(format!("Unknown bucket: {}", s)),
        }
    }
}

/// Identifier of a fixture allocation plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanId {
    BareMinimum,
    MostPopular,
    Standard,
    Stable,
    Good,
}

impl PlanId {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BareMinimum => "bare_minimum",
            Self::MostPopular => "most_popular",
            Self::Standard => "standard",
            Self::Stable => "stable",
            Self::Good => "good",
        }
    }
}

impl std::fmt::Display for PlanId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PlanId {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "bare_minimum" => Ok(Self::BareMinimum),
            "most_popular" => Ok(Self::MostPopular),
            "standard" => Ok(Self::Standard),
            "stable" => Ok(Self::Stable),
            "good" => Ok(Self::Good),
            _ => Err(format!("Unknown plan: {}", s)),
        }
    }
}

/// Percentage allocation across the five buckets
///
/// Unused buckets carry 0; used buckets sum to 100 by convention.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Allocations {
    pub needs: f64,
    pub wants: f64,
    pub savings: f64,
    pub investment: f64,
    pub survival_buffer: f64,
}

impl Allocations {
    pub fn get(&self, bucket: Bucket) -> f64 {
        match bucket {
            Bucket::Needs => self.needs,
            Bucket::Wants => self.wants,
            Bucket::Savings => self.savings,
            Bucket::Investment => self.investment,
            Bucket::SurvivalBuffer => self.survival_buffer,
        }
    }
}

/// Category labels assigned to each bucket by an allocation plan
///
/// Display labels shown to the user when explaining what belongs where;
/// classification itself uses the keyword taxonomy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryLabels {
    #[serde(default)]
    pub needs: Vec<String>,
    #[serde(default)]
    pub wants: Vec<String>,
    #[serde(default)]
    pub savings: Vec<String>,
    #[serde(default)]
    pub investment: Vec<String>,
    #[serde(default)]
    pub survival_buffer: Vec<String>,
}

/// A user's selected budget plan
///
/// At most one per user (unique index on user_id). The allocations and
/// category labels are a snapshot captured at selection time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserBudgetPlan {
    pub user_id: String,
    pub plan_id: PlanId,
    pub plan_name: String,
    pub monthly_income: f64,
    pub allocations: Allocations,
    pub categories: CategoryLabels,
    pub selected_at: DateTime<Utc>,
}
