// Insights: deterministic analyses of a financial snapshot
//
// None of these talk to the completion provider. They are exposed over HTTP
// only when `features.insights_enabled` is set.

pub mod income;
pub mod literacy;
pub mod savings;
pub mod spending;

pub use income::{analyze_income, IncomeAnalysis};
pub use literacy::{recommend_lessons, LiteracyRecommendation};
pub use savings::{monitor_goal, SavingsStatus, SavingsUpdate};
pub use spending::{review_spending, SpendingReview};

/// Added to divisors so empty totals never divide by zero
pub(crate) const EPSILON: f64 = 1e-6;

/// Round to `decimals` places, ties to even (`round(0.125, 2)` is 0.12).
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(33.333, 1), 33.3);
        assert_eq!(round_to(0.846, 2), 0.85);
        assert_eq!(round_to(2.0, 2), 2.0);
    }

    #[test]
    fn test_round_to_ties_go_to_even() {
        assert_eq!(round_to(0.125, 2), 0.12);
        assert_eq!(round_to(0.375, 2), 0.38);
        assert_eq!(round_to(6.25, 1), 6.2);
        assert_eq!(round_to(2.5, 0), 2.0);
    }
}
