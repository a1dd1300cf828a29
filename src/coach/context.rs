// Financial context: the structured summary of a snapshot and its one
// text rendering.
//
// Everything the model learns about the user goes through `render`. Tests
// pin its output, so wording changes show up as test failures.

use super::types::{IncomeItem, Transaction, UserBehavior};

/// Display name used when the snapshot carries no profile
pub const FALLBACK_DISPLAY_NAME: &str = "User";

/// Rendered in place of a transaction description the client left out
pub const MISSING_DESCRIPTION: &str = "None";

/// Format an amount as dollars with two decimals
pub fn money(amount: f64) -> String {
    format!("${:.2}", amount)
}

/// Sum of all income amounts (0 when empty)
pub fn total_income(income: &[IncomeItem]) -> f64 {
    income.iter().fold(0.0, |acc, item| acc + item.amount)
}

/// Mean income amount (0 when empty)
pub fn average_income(income: &[IncomeItem]) -> f64 {
    if income.is_empty() {
        0.0
    } else {
        total_income(income) / income.len() as f64
    }
}

/// Magnitude of all strictly-negative transaction amounts.
///
/// Non-negative transactions are ignored, not counted as income.
pub fn total_spent(transactions: &[Transaction]) -> f64 {
    transactions
        .iter()
        .filter(|t| t.is_expense())
        .fold(0.0, |acc, t| acc - t.amount)
}

#[derive(Debug, Clone, PartialEq)]
pub struct IncomeLine {
    pub amount: f64,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseLine {
    /// Positive magnitude of the expense
    pub amount: f64,
    pub category: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiteracyProgress {
    /// Completed lesson names, in input order
    pub completed: Vec<String>,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GoalLine {
    pub name: String,
    pub saved: f64,
    pub target: f64,
}

/// Structured summary of one snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct FinancialContext {
    pub display_name: String,
    pub total_income: f64,
    pub average_income: f64,
    pub income: Vec<IncomeLine>,
    pub total_spent: f64,
    /// Whether any transactions (of either sign) were supplied
    pub has_transactions: bool,
    pub expenses: Vec<ExpenseLine>,
    /// None when the snapshot has no lesson data at all
    pub literacy: Option<LiteracyProgress>,
    pub goals: Vec<GoalLine>,
}

impl FinancialContext {
    pub fn from_behavior(user: &UserBehavior) -> Self {
        let display_name = user
            .user_profile
            .as_ref()
            .map(|p| p.first_name.clone())
            .unwrap_or_else(|| FALLBACK_DISPLAY_NAME.to_string());

        let income = user
            .recent_income
            .iter()
            .map(|i| IncomeLine {
                amount: i.amount,
                source: i.source.clone(),
            })
            .collect();

        let expenses = user
            .recent_transactions
            .iter()
            .filter(|t| t.is_expense())
            .map(|t| ExpenseLine {
                amount: -t.amount,
                category: t.category.clone(),
                description: t.description.clone(),
            })
            .collect();

        let literacy = user.lesson_completions.as_ref().map(|lc| LiteracyProgress {
            completed: lc
                .lessons
                .completed()
                .into_iter()
                .map(str::to_string)
                .collect(),
            total: lc.lessons.len(),
        });

        let goals = user
            .goals()
            .iter()
            .map(|g| GoalLine {
                name: g.goal_name.clone(),
                saved: g.saved,
                target: g.target,
            })
            .collect();

        Self {
            display_name,
            total_income: total_income(&user.recent_income),
            average_income: average_income(&user.recent_income),
            income,
            total_spent: total_spent(&user.recent_transactions),
            has_transactions: !user.recent_transactions.is_empty(),
            expenses,
            literacy,
            goals,
        }
    }

    pub fn income_narrative(&self) -> String {
        if self.income.is_empty() {
            return "No recent income recorded.".to_string();
        }
        let details = self
            .income
            .iter()
            .map(|i| format!("{} from {}", money(i.amount), i.source))
            .collect::<Vec<_>>()
            .join("; ");
        format!("Income details: {}.", details)
    }

    pub fn spending_narrative(&self) -> String {
        if !self.has_transactions {
            return format!(
                "Recently, they spent a total of {}.",
                money(self.total_spent)
            );
        }
        let details = self
            .expenses
            .iter()
            .map(|e| {
                format!(
                    "{} on {} ({})",
                    money(e.amount),
                    e.category,
                    e.description.as_deref().unwrap_or(MISSING_DESCRIPTION)
                )
            })
            .collect::<Vec<_>>()
            .join("; ");
        format!(
            "Recently, they spent a total of {}, including: {}.",
            money(self.total_spent),
            details
        )
    }

    pub fn literacy_narrative(&self) -> String {
        match &self.literacy {
            None => "No literacy lessons completed.".to_string(),
            Some(progress) => {
                let head = format!(
                    "They completed {}/{} literacy lessons",
                    progress.completed.len(),
                    progress.total
                );
                if progress.completed.is_empty() {
                    format!("{}.", head)
                } else {
                    format!("{}: {}", head, progress.completed.join(", "))
                }
            }
        }
    }

    pub fn goals_narrative(&self) -> String {
        if self.goals.is_empty() {
            return "No savings goals set currently.".to_string();
        }
        let summary = self
            .goals
            .iter()
            .map(|g| format!("{} ({}/{})", g.name, money(g.saved), money(g.target)))
            .collect::<Vec<_>>()
            .join(", ");
        format!("Their current savings goals are: {}.", summary)
    }

    /// The context paragraph embedded in the prompt.
    ///
    /// The literacy narrative is always followed by a period, so a narrative
    /// that already ends in one yields "..".
    pub fn render(&self) -> String {
        format!(
            "{} has an average income of {}, recent total income of {}. {} {} {}. {} \
             They may also have financial aspirations.",
            self.display_name,
            money(self.average_income),
            money(self.total_income),
            self.income_narrative(),
            self.spending_narrative(),
            self.literacy_narrative(),
            self.goals_narrative(),
        )
    }
}
