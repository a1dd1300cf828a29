// Completion provider support
//
// The coach treats the language model as an opaque text-completion service.
// This module is that dependency boundary: a trait, unified request/response
// types, an OpenAI-compatible implementation and a factory.

use async_trait::async_trait;

use crate::errors::ProviderError;

pub mod factory;
pub mod openai;
pub mod types;

pub use factory::create_provider;
pub use openai::OpenAIProvider;
pub use types::{Message, ProviderRequest, ProviderResponse};

/// System instruction framing every coaching request.
pub const COACH_SYSTEM_PROMPT: &str = "You are a friendly financial coach.";

/// Sampling temperature used for coaching requests.
pub const COACH_TEMPERATURE: f32 = 0.7;

/// Trait for completion providers
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send a request and wait for the complete response
    async fn send_message(&self, request: &ProviderRequest)
        -> Result<ProviderResponse, ProviderError>;

    /// Provider name (e.g., "openai", "azure")
    fn name(&self) -> &str;

    /// Model used when a request does not name one
    fn default_model(&self) -> &str;
}

/// Complete a single prompt with the coach's fixed system instruction.
///
/// Returns the trimmed text of the single completion. A whitespace-only
/// completion is an error, not empty advice.
pub async fn complete(
    provider: &dyn LlmProvider,
    prompt: &str,
    max_tokens: u32,
) -> Result<String, ProviderError> {
    let request = ProviderRequest::from_prompt(prompt)
        .with_system(COACH_SYSTEM_PROMPT)
        .with_max_tokens(max_tokens)
        .with_temperature(COACH_TEMPERATURE);

    let response = provider.send_message(&request).await?;
    let text = response.text().trim();
    if text.is_empty() {
        return Err(ProviderError::EmptyResponse);
    }

    Ok(text.to_string())
}
