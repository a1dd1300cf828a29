// Income anomaly detection

use serde::{Deserialize, Serialize};

use super::EPSILON;
use crate::coach::context::money;
use crate::coach::types::{IncomeItem, UserBehavior};

/// Entries further than this many standard deviations from the mean are flagged
const ANOMALY_Z: f64 = 2.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeAnalysis {
    pub anomalies: Vec<IncomeItem>,
    /// Population standard deviation over mean; lower is steadier
    pub stability_index: f64,
    pub suggestions: Vec<String>,
}

pub fn analyze_income(user: &UserBehavior) -> IncomeAnalysis {
    let amounts: Vec<f64> = user.recent_income.iter().map(|i| i.amount).collect();
    if amounts.is_empty() {
        return IncomeAnalysis {
            anomalies: Vec::new(),
            stability_index: 0.0,
            suggestions: Vec::new(),
        };
    }

    let n = amounts.len() as f64;
    let mean = amounts.iter().fold(0.0, |acc, a| acc + a) / n;
    let variance = amounts.iter().fold(0.0, |acc, a| acc + (a - mean).powi(2)) / n;
    let std = variance.sqrt();

    let flagged: Vec<&IncomeItem> = if std > 0.0 {
        user.recent_income
            .iter()
            .filter(|item| ((item.amount - mean) / std).abs() > ANOMALY_Z)
            .collect()
    } else {
        Vec::new()
    };

    let suggestions = flagged
        .iter()
        .map(|item| {
            format!(
                "Income entry from {}: unexpected income of {}. Consider saving 20-30% of it.",
                item.date,
                money(item.amount)
            )
        })
        .collect();

    let anomalies = flagged
        .iter()
        .enumerate()
        .map(|(i, item)| IncomeItem {
            id: format!("anomaly_{}", i),
            user_id: user.user_id.clone(),
            amount: item.amount,
            source: "Unknown".to_string(),
            date: item.date.clone(),
        })
        .collect();

    IncomeAnalysis {
        anomalies,
        stability_index: std / (mean + EPSILON),
        suggestions,
    }
}
