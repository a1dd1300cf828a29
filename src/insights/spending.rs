// Spending against income

use serde::{Deserialize, Serialize};

use super::{round_to, EPSILON};
use crate::coach::context::{total_income, total_spent};
use crate::coach::types::UserBehavior;

const OVERSPEND_RATIO: f64 = 1.0;
const CAUTION_RATIO: f64 = 0.8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingReview {
    pub spending_to_income_ratio: f64,
    pub warnings: Vec<String>,
    pub suggestions: Vec<String>,
}

pub fn review_spending(user: &UserBehavior) -> SpendingReview {
    let spend = total_spent(&user.recent_transactions);
    let income = total_income(&user.recent_income);
    let ratio = spend / (income + EPSILON);

    let (warning, suggestion) = if ratio > OVERSPEND_RATIO {
        (
            Some("You've spent more than you earned last period."),
            "Review variable expenses and cut non-essentials by 10%.",
        )
    } else if ratio > CAUTION_RATIO {
        (
            Some("Spending is approaching your income limit."),
            "Try setting a stricter category budget for discretionary spend.",
        )
    } else {
        (None, "Your spending is in a healthy range - nice work.")
    };

    SpendingReview {
        spending_to_income_ratio: round_to(ratio, 2),
        warnings: warning.into_iter().map(str::to_string).collect(),
        suggestions: vec![suggestion.to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coach::types::{IncomeItem, Transaction};

    fn snapshot(income: f64, expenses: &[f64]) -> UserBehavior {
        let mut user = UserBehavior::empty("u1");
        user.recent_income = vec![IncomeItem {
            id: "i1".to_string(),
            user_id: "u1".to_string(),
            amount: income,
            source: "Job".to_string(),
            date: "2025-01-01".to_string(),
        }];
        user.recent_transactions = expenses
            .iter()
            .enumerate()
            .map(|(i, amount)| Transaction {
                id: format!("t{}", i),
                user_id: "u1".to_string(),
                amount: *amount,
                category: "Misc".to_string(),
                description: None,
                date: "2025-01-02".to_string(),
            })
            .collect();
        user
    }

    #[test]
    fn test_healthy_spending() {
        let review = review_spending(&snapshot(1000.0, &[-200.0, -100.0]));
        assert_eq!(review.spending_to_income_ratio, 0.3);
        assert!(review.warnings.is_empty());
        assert_eq!(
            review.suggestions,
            vec!["Your spending is in a healthy range - nice work.".to_string()]
        );
    }

    #[test]
    fn test_approaching_limit() {
        let review = review_spending(&snapshot(1000.0, &[-900.0]));
        assert_eq!(review.spending_to_income_ratio, 0.9);
        assert_eq!(review.warnings, vec!["Spending is approaching your income limit.".to_string()]);
    }

    #[test]
    fn test_overspending() {
        let review = review_spending(&snapshot(1000.0, &[-1500.0]));
        assert_eq!(review.spending_to_income_ratio, 1.5);
        assert_eq!(
            review.warnings,
            vec!["You've spent more than you earned last period.".to_string()]
        );
    }

    #[test]
    fn test_refunds_do_not_offset_spending() {
        let review = review_spending(&snapshot(100.0, &[-50.0, 500.0]));
        assert_eq!(review.spending_to_income_ratio, 0.5);
    }

    #[test]
    fn test_nothing_recorded() {
        let review = review_spending(&UserBehavior::empty("u1"));
        assert_eq!(review.spending_to_income_ratio, 0.0);
        assert!(review.warnings.is_empty());
    }
}
