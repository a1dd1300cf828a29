// Savings goal progress

use serde::{Deserialize, Serialize};

use super::round_to;
use crate::coach::types::SavingGoal;
use crate::errors::CoachError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SavingsStatus {
    #[serde(rename = "below_30")]
    Below30,
    OnTrack,
    Achieved,
}

impl SavingsStatus {
    fn from_fraction(pct: f64) -> Self {
        if pct < 0.3 {
            SavingsStatus::Below30
        } else if pct >= 1.0 {
            SavingsStatus::Achieved
        } else {
            SavingsStatus::OnTrack
        }
    }

    fn message(self) -> &'static str {
        match self {
            SavingsStatus::Below30 => {
                "You're below 30% of your goal - try automating small weekly transfers."
            }
            SavingsStatus::OnTrack => "Great job - you're on track! Keep up the momentum.",
            SavingsStatus::Achieved => "Congratulations! You've reached your savings target!",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsUpdate {
    pub progress_pct: f64,
    pub status: SavingsStatus,
    pub messages: Vec<String>,
}

pub fn monitor_goal(goal: &SavingGoal) -> Result<SavingsUpdate, CoachError> {
    if !goal.target.is_finite() || goal.target <= 0.0 {
        return Err(CoachError::validation(format!(
            "savings goal {} must have a positive target",
            goal.id
        )));
    }
    if !goal.saved.is_finite() {
        return Err(CoachError::validation(format!(
            "savings goal {} has a non-finite amount",
            goal.id
        )));
    }

    let pct = goal.saved / goal.target;
    let status = SavingsStatus::from_fraction(pct);

    Ok(SavingsUpdate {
        progress_pct: round_to(pct * 100.0, 1),
        status,
        messages: vec![status.message().to_string()],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goal(saved: f64, target: f64) -> SavingGoal {
        SavingGoal {
            id: "g1".to_string(),
            user_id: "u1".to_string(),
            goal_name: "Car".to_string(),
            target,
            saved,
            created_at: "2025-01-01".to_string(),
        }
    }

    #[test]
    fn test_status_thresholds() {
        assert_eq!(monitor_goal(&goal(0.0, 100.0)).unwrap().status, SavingsStatus::Below30);
        assert_eq!(monitor_goal(&goal(30.0, 100.0)).unwrap().status, SavingsStatus::OnTrack);
        assert_eq!(monitor_goal(&goal(99.9, 100.0)).unwrap().status, SavingsStatus::OnTrack);
        assert_eq!(monitor_goal(&goal(100.0, 100.0)).unwrap().status, SavingsStatus::Achieved);
        assert_eq!(monitor_goal(&goal(150.0, 100.0)).unwrap().status, SavingsStatus::Achieved);
    }

    #[test]
    fn test_progress_is_rounded_to_one_decimal() {
        let update = monitor_goal(&goal(1.0, 3.0)).unwrap();
        assert_eq!(update.progress_pct, 33.3);
        assert_eq!(
            update.messages,
            vec!["Great job - you're on track! Keep up the momentum.".to_string()]
        );
    }

    #[test]
    fn test_progress_tie_rounds_to_even() {
        // 1/16 is 6.25%, exactly halfway between 6.2 and 6.3
        assert_eq!(monitor_goal(&goal(1.0, 16.0)).unwrap().progress_pct, 6.2);
    }

    #[test]
    fn test_non_positive_target_is_rejected() {
        assert!(matches!(
            monitor_goal(&goal(10.0, 0.0)),
            Err(CoachError::Validation(_))
        ));
        assert!(matches!(
            monitor_goal(&goal(10.0, -5.0)),
            Err(CoachError::Validation(_))
        ));
    }

    #[test]
    fn test_status_wire_names() {
        let json = serde_json::to_value(monitor_goal(&goal(10.0, 100.0)).unwrap()).unwrap();
        assert_eq!(json["status"], "below_30");
        assert_eq!(json["progress_pct"], 10.0);
        assert_eq!(serde_json::to_value(SavingsStatus::OnTrack).unwrap(), "on_track");
    }
}
