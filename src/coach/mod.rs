// Financial coach
//
// Turns a user's financial snapshot and a question into a prompt and asks the
// completion provider for advice. All assembly is local and synchronous; the
// provider call is the only step that can fail at runtime.

pub mod context;
pub mod prompt;
pub mod types;

pub use context::FinancialContext;
pub use types::{
    AdviceResponse, CoachRequest, IncomeItem, LessonCompletion, LessonRecord, Lessons,
    SavingGoal, Transaction, UserBehavior, UserProfile,
};

use std::sync::Arc;

use crate::config::constants::{ADVICE_MAX_TOKENS, TIPS_MAX_TOKENS};
use crate::errors::CoachError;
use crate::providers::{self, LlmProvider};

/// Advice service shared by all requests.
///
/// Holds no per-request state, so one instance serves concurrent requests
/// without locking.
#[derive(Clone)]
pub struct FinancialCoach {
    provider: Arc<dyn LlmProvider>,
}

impl FinancialCoach {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &Arc<dyn LlmProvider> {
        &self.provider
    }

    /// Answer `question` using the context assembled from `user`.
    ///
    /// The question is passed through verbatim, even when blank.
    pub async fn advise(
        &self,
        user: &UserBehavior,
        question: &str,
    ) -> Result<AdviceResponse, CoachError> {
        validate_snapshot(user)?;

        let context = FinancialContext::from_behavior(user);
        let prompt = prompt::advice_prompt(&context, question);

        tracing::debug!(
            user_id = %user.user_id,
            provider = self.provider.name(),
            prompt_chars = prompt.len(),
            "Requesting advice"
        );

        let advice = providers::complete(self.provider.as_ref(), &prompt, ADVICE_MAX_TOKENS).await?;
        Ok(AdviceResponse { advice })
    }

    /// Short money-management tips for the snapshot.
    pub async fn tips(&self, user: &UserBehavior) -> Result<AdviceResponse, CoachError> {
        validate_snapshot(user)?;

        let prompt = prompt::tips_prompt(user);
        tracing::debug!(user_id = %user.user_id, "Requesting tips");

        let advice = providers::complete(self.provider.as_ref(), &prompt, TIPS_MAX_TOKENS).await?;
        Ok(AdviceResponse { advice })
    }
}

/// Reject snapshots whose numbers cannot be rendered meaningfully.
///
/// JSON input can never carry NaN or infinity, but snapshots built in code can.
pub fn validate_snapshot(user: &UserBehavior) -> Result<(), CoachError> {
    if let Some(t) = user.recent_transactions.iter().find(|t| !t.amount.is_finite()) {
        return Err(CoachError::validation(format!(
            "transaction {} has a non-finite amount",
            t.id
        )));
    }
    if let Some(i) = user.recent_income.iter().find(|i| !i.amount.is_finite()) {
        return Err(CoachError::validation(format!(
            "income item {} has a non-finite amount",
            i.id
        )));
    }
    if let Some(g) = user
        .goals()
        .iter()
        .find(|g| !g.saved.is_finite() || !g.target.is_finite())
    {
        return Err(CoachError::validation(format!(
            "savings goal {} has a non-finite amount",
            g.id
        )));
    }
    Ok(())
}
