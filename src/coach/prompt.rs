// Prompt templates

use super::context::{money, total_income, total_spent, FinancialContext};
use super::types::UserBehavior;

const ADVICE_INSTRUCTION: &str =
    "Provide a personalized, simple, and practical financial advice in 3-4 sentences.";

/// Prompt for `/financial-coach`: the rendered context, the verbatim
/// question, then the fixed instruction, separated by blank lines.
pub fn advice_prompt(context: &FinancialContext, question: &str) -> String {
    format!(
        "Context: {}\n\nUser's question: {}\n\n{}",
        context.render(),
        question,
        ADVICE_INSTRUCTION
    )
}

/// Prompt for `/tips`.
pub fn tips_prompt(user: &UserBehavior) -> String {
    let name = user
        .user_profile
        .as_ref()
        .map(|p| p.first_name.as_str())
        .unwrap_or("there");

    let goals = user.goals();
    let goals_summary = if goals.is_empty() {
        String::new()
    } else {
        let names = goals
            .iter()
            .map(|g| g.goal_name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        format!(" They are saving for {}.", names)
    };

    format!(
        "A user named {} had {} income and spent {} in the last period.{} \
         Suggest 2-3 bite-size tips (one sentence each) on how to manage their money \
         given this behavior.",
        name,
        money(total_income(&user.recent_income)),
        money(total_spent(&user.recent_transactions)),
        goals_summary
    )
}
