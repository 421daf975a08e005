//! Advisory suggestions derived from variance results

use serde::Serialize;

use super::variance::{BucketStatus, BudgetAnalysis};

/// Tone of a suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Warning,
    Caution,
    Success,
    Alert,
}

impl SuggestionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Caution => "caution",
            Self::Success => "success",
            Self::Alert => "alert",
        }
    }
}

impl std::fmt::Display for SuggestionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One human-readable advisory
#[derive(Debug, Clone, Serialize)]
pub struct Suggestion {
    pub kind: SuggestionKind,
    /// Bucket name, or "overall" for the aggregate suggestion
    pub bucket: String,
    pub message: String,
    pub recommendation: String,
}

/// Generate advisories for each analyzed bucket plus one overall
///
/// A bucket in good standing with half or more of its budget spent
/// produces nothing.
pub fn generate_suggestions(analysis: &BudgetAnalysis) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();

    for variance in &analysis.buckets {
        match variance.status {
            BucketStatus::Over => {
                let overage = variance.actual - variance.budgeted;
                suggestions.push(Suggestion {
                    kind: SuggestionKind::Warning,
                    bucket: variance.bucket.to_string(),
                    message: format!(
                        "You are {:.2} over your {} budget ({:.1}% over)",
                        overage,
                        variance.bucket,
                        variance.percentage_used - 100.0
                    ),
                    recommendation: format!(
                        "Cut back on {} spending for the rest of the month",
                        variance.bucket
                    ),
                });
            }
            BucketStatus::Warning => {
                suggestions.push(Suggestion {
                    kind: SuggestionKind::Caution,
                    bucket: variance.bucket.to_string(),
                    message: format!(
                        "Only {:.2} is left in your {} budget ({:.1}% used)",
                        variance.difference, variance.bucket, variance.percentage_used
                    ),
                    recommendation: format!(
                        "Watch {} spending closely until the month ends",
                        variance.bucket
                    ),
                });
            }
            BucketStatus::Good => {
                if variance.difference > variance.budgeted * 0.5 {
                    suggestions.push(Suggestion {
                        kind: SuggestionKind::Success,
                        bucket: variance.bucket.to_string(),
                        message: format!(
                            "{:.2} of your {} budget is still unspent",
                            variance.difference, variance.bucket
                        ),
                        recommendation:
                            "Consider moving the surplus into your emergency fund or investments"
                                .to_string(),
                    });
                }
            }
        }
    }

    if analysis.total_actual > analysis.total_budget {
        suggestions.push(Suggestion {
            kind: SuggestionKind::Alert,
            bucket: "overall".to_string(),
            message: format!(
                "Total spending exceeds your overall budget by {:.2}",
                analysis.total_actual - analysis.total_budget
            ),
            recommendation: "Review every category and reduce spending to get back under budget"
                .to_string(),
        });
    } else if analysis.total_remaining > 0.0 {
        suggestions.push(Suggestion {
            kind: SuggestionKind::Success,
            bucket: "overall".to_string(),
            message: format!(
                "You have {:.2} left across your overall budget",
                analysis.total_remaining
            ),
            recommendation: "Allocate the surplus toward savings or investments".to_string(),
        });
    }

    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::variance::BucketVariance;
    use crate::models::Bucket;

    fn variance(
        bucket: Bucket,
        budgeted: f64,
        actual: f64,
        status: BucketStatus,
    ) -> BucketVariance {
        BucketVariance {
            bucket,
            budgeted,
            actual,
            difference: budgeted - actual,
            percentage_used: if budgeted > 0.0 {
                actual / budgeted * 100.0
            } else {
                0.0
            },
            status,
        }
    }

    #[test]
    fn test_over_bucket_gets_warning_suggestion() {
        let analysis = BudgetAnalysis {
            buckets: vec![variance(Bucket::Wants, 300.0, 450.0, BucketStatus::Over)],
            total_budget: 300.0,
            total_actual: 450.0,
            total_remaining: -150.0,
        };
        let suggestions = generate_suggestions(&analysis);

        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].kind, SuggestionKind::Warning);
        assert_eq!(suggestions[0].bucket, "wants");
        assert!(suggestions[0].message.contains("150.00"));
        // Overall alert names the aggregate overage
        assert_eq!(suggestions[1].kind, SuggestionKind::Alert);
        assert_eq!(suggestions[1].bucket, "overall");
        assert!(suggestions[1].message.contains("150.00"));
    }

    #[test]
    fn test_warning_bucket_gets_caution_suggestion() {
        let analysis = BudgetAnalysis {
            buckets: vec![variance(Bucket::Needs, 1000.0, 950.0, BucketStatus::Warning)],
            total_budget: 1000.0,
            total_actual: 950.0,
            total_remaining: 50.0,
        };
        let suggestions = generate_suggestions(&analysis);

        assert_eq!(suggestions[0].kind, SuggestionKind::Caution);
        assert!(suggestions[0].message.contains("50.00"));
    }

    #[test]
    fn test_good_bucket_with_large_headroom_gets_success() {
        let analysis = BudgetAnalysis {
            buckets: vec![variance(Bucket::Savings, 1000.0, 200.0, BucketStatus::Good)],
            total_budget: 1000.0,
            total_actual: 200.0,
            total_remaining: 800.0,
        };
        let suggestions = generate_suggestions(&analysis);

        assert_eq!(suggestions[0].kind, SuggestionKind::Success);
        assert_eq!(suggestions[0].bucket, "savings");
    }

    #[test]
    fn test_good_bucket_with_small_headroom_is_silent() {
        // 60% used, 40% headroom: below the 50% reallocation threshold
        let analysis = BudgetAnalysis {
            buckets: vec![variance(Bucket::Needs, 1000.0, 600.0, BucketStatus::Good)],
            total_budget: 1000.0,
            total_actual: 600.0,
            total_remaining: 400.0,
        };
        let suggestions = generate_suggestions(&analysis);

        // Only the overall surplus suggestion remains
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].bucket, "overall");
        assert_eq!(suggestions[0].kind, SuggestionKind::Success);
    }

    #[test]
    fn test_exactly_balanced_budget_gets_no_overall_suggestion() {
        let analysis = BudgetAnalysis {
            buckets: vec![variance(
                Bucket::Needs,
                1000.0,
                1000.0,
                BucketStatus::Warning,
            )],
            total_budget: 1000.0,
            total_actual: 1000.0,
            total_remaining: 0.0,
        };
        let suggestions = generate_suggestions(&analysis);

        assert!(suggestions.iter().all(|s| s.bucket != "overall"));
    }
}
