// Unified request/response types for the completion provider
//
// These types abstract over provider-specific wire formats so the coach
// only ever deals with a prompt in and a string out.

use serde::{Deserialize, Serialize};

/// A single chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Unified request format for all providers
#[derive(Debug, Clone, Serialize)]
pub struct ProviderRequest {
    /// Conversation messages
    pub messages: Vec<Message>,

    /// Model name (empty = provider default)
    pub model: String,

    /// Maximum tokens to generate
    pub max_tokens: u32,

    /// System prompt, sent as a leading `{"role":"system"}` message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Number of completions to request
    pub n: u32,
}

impl ProviderRequest {
    /// Create a new request from messages
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            model: String::new(),
            max_tokens: 150,
            system: None,
            temperature: None,
            n: 1,
        }
    }

    /// Single-turn request holding one user prompt
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self::new(vec![Message::user(prompt)])
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Text of the last user message, if any
    pub fn prompt(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == "user")
            .map(|m| m.content.as_str())
    }
}

/// Unified response format
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderResponse {
    pub id: String,
    pub model: String,
    /// Text of the first choice
    pub content: String,
    pub stop_reason: Option<String>,
    /// Name of the provider that produced the response
    pub provider: String,
}

impl ProviderResponse {
    pub fn text(&self) -> &str {
        &self.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let request = ProviderRequest::from_prompt("hello")
            .with_system("be nice")
            .with_max_tokens(200)
            .with_temperature(0.7);

        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, "user");
        assert_eq!(request.system.as_deref(), Some("be nice"));
        assert_eq!(request.max_tokens, 200);
        assert_eq!(request.temperature, Some(0.7));
        assert_eq!(request.n, 1);
        assert!(request.model.is_empty());
    }

    #[test]
    fn test_prompt_returns_last_user_message() {
        let request = ProviderRequest::new(vec![
            Message::user("first"),
            Message {
                role: "assistant".to_string(),
                content: "reply".to_string(),
            },
            Message::user("second"),
        ]);
        assert_eq!(request.prompt(), Some("second"));
    }
}
