// OpenAI-compatible chat-completions provider
//
// Works against the public OpenAI API and against Azure OpenAI deployments,
// which share the request/response format but differ in URL layout and
// authentication header.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::types::{ProviderRequest, ProviderResponse};
use super::LlmProvider;
use crate::errors::ProviderError;

const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Azure OpenAI API version used for chat completions
pub const AZURE_API_VERSION: &str = "2025-01-01-preview";

/// How requests are addressed and authenticated
#[derive(Debug, Clone, PartialEq)]
enum ApiFlavor {
    /// `{base_url}/v1/chat/completions` with a bearer token
    OpenAI,
    /// `{endpoint}/openai/deployments/{deployment}/chat/completions` with an `api-key` header
    Azure {
        deployment: String,
        api_version: String,
    },
}

/// OpenAI-compatible provider
#[derive(Clone)]
pub struct OpenAIProvider {
    client: Client,
    api_key: String,
    base_url: String,
    default_model: String,
    provider_name: String,
    flavor: ApiFlavor,
}

impl OpenAIProvider {
    /// Provider for the public OpenAI API
    pub fn new_openai(api_key: String) -> Result<Self, ProviderError> {
        Self::new(
            api_key,
            "https://api.openai.com".to_string(),
            "gpt-4o-mini".to_string(),
            "openai".to_string(),
            ApiFlavor::OpenAI,
        )
    }

    /// Provider for an Azure OpenAI deployment.
    ///
    /// The deployment name doubles as the model name reported in logs.
    pub fn new_azure(
        api_key: String,
        endpoint: String,
        deployment: String,
    ) -> Result<Self, ProviderError> {
        Self::new(
            api_key,
            endpoint,
            deployment.clone(),
            "azure".to_string(),
            ApiFlavor::Azure {
                deployment,
                api_version: AZURE_API_VERSION.to_string(),
            },
        )
    }

    /// Point the provider at a different base URL (self-hosted gateways, tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set custom model for this provider
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    fn new(
        api_key: String,
        base_url: String,
        default_model: String,
        provider_name: String,
        flavor: ApiFlavor,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| {
                ProviderError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            api_key,
            base_url,
            default_model,
            provider_name,
            flavor,
        })
    }

    fn completions_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        match &self.flavor {
            ApiFlavor::OpenAI => format!("{}/v1/chat/completions", base),
            ApiFlavor::Azure {
                deployment,
                api_version,
            } => format!(
                "{}/openai/deployments/{}/chat/completions?api-version={}",
                base, deployment, api_version
            ),
        }
    }

    /// Convert ProviderRequest to the chat-completions format
    fn to_openai_request(&self, request: &ProviderRequest) -> OpenAIRequest {
        let model = if request.model.is_empty() {
            self.default_model.clone()
        } else {
            request.model.clone()
        };

        let mut messages = Vec::with_capacity(request.messages.len() + 1);
        if let Some(system) = &request.system {
            messages.push(OpenAIMessage {
                role: "system".to_string(),
                content: system.clone(),
            });
        }
        messages.extend(request.messages.iter().map(|m| OpenAIMessage {
            role: m.role.clone(),
            content: m.content.clone(),
        }));

        OpenAIRequest {
            // Azure routes by deployment in the URL and ignores the body model
            model: match self.flavor {
                ApiFlavor::OpenAI => Some(model),
                ApiFlavor::Azure { .. } => None,
            },
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            n: request.n,
        }
    }

    /// Convert the chat-completions response to ProviderResponse
    fn from_openai_response(
        &self,
        response: OpenAIResponse,
    ) -> Result<ProviderResponse, ProviderError> {
        let choice = response.choices.into_iter().next().ok_or_else(|| {
            ProviderError::MalformedResponse("response contained no choices".to_string())
        })?;

        Ok(ProviderResponse {
            id: response.id,
            model: response.model.unwrap_or_else(|| self.default_model.clone()),
            content: choice.message.content.unwrap_or_default(),
            stop_reason: choice.finish_reason,
            provider: self.provider_name.clone(),
        })
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.flavor {
            ApiFlavor::OpenAI => builder.bearer_auth(&self.api_key),
            ApiFlavor::Azure { .. } => builder.header("api-key", &self.api_key),
        }
    }
}

#[async_trait]
impl LlmProvider for OpenAIProvider {
    async fn send_message(
        &self,
        request: &ProviderRequest,
    ) -> Result<ProviderResponse, ProviderError> {
        let openai_request = self.to_openai_request(request);
        let url = self.completions_url();

        tracing::debug!(
            provider = %self.provider_name,
            max_tokens = openai_request.max_tokens,
            "Sending chat completion request"
        );

        let response = self
            .authorize(self.client.post(&url))
            .header("content-type", "application/json")
            .json(&openai_request)
            .send()
            .await
            .map_err(|e| ProviderError::Unreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let openai_response: OpenAIResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

        tracing::debug!(id = %openai_response.id, "Received chat completion");

        self.from_openai_response(openai_response)
    }

    fn name(&self) -> &str {
        &self.provider_name
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }
}

// Chat-completions wire types

#[derive(Debug, Clone, Serialize)]
struct OpenAIRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<String>,
    messages: Vec<OpenAIMessage>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    n: u32,
}

#[derive(Debug, Clone, Serialize)]
struct OpenAIMessage {
    role: String,
    content: String,
}

#[derive(Debug, Clone, Deserialize)]
struct OpenAIResponse {
    #[serde(default)]
    id: String,
    #[serde(default)]
    model: Option<String>,
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Clone, Deserialize)]
struct OpenAIChoice {
    message: OpenAIResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct OpenAIResponseMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::types::ProviderRequest;

    #[test]
    fn test_openai_provider_creation() {
        let provider = OpenAIProvider::new_openai("test-key".to_string());
        assert!(provider.is_ok());
    }

    #[test]
    fn test_provider_names() {
        let openai = OpenAIProvider::new_openai("test-key".to_string()).unwrap();
        assert_eq!(openai.name(), "openai");

        let azure = OpenAIProvider::new_azure(
            "test-key".to_string(),
            "https://example.openai.azure.com".to_string(),
            "coach-deploy".to_string(),
        )
        .unwrap();
        assert_eq!(azure.name(), "azure");
        assert_eq!(azure.default_model(), "coach-deploy");
    }

    #[test]
    fn test_completions_url() {
        let openai = OpenAIProvider::new_openai("k".to_string())
            .unwrap()
            .with_base_url("http://localhost:9999/");
        assert_eq!(
            openai.completions_url(),
            "http://localhost:9999/v1/chat/completions"
        );

        let azure = OpenAIProvider::new_azure(
            "k".to_string(),
            "https://res.openai.azure.com/".to_string(),
            "gpt".to_string(),
        )
        .unwrap();
        assert_eq!(
            azure.completions_url(),
            "https://res.openai.azure.com/openai/deployments/gpt/chat/completions?api-version=2025-01-01-preview"
        );
    }

    #[test]
    fn test_request_prepends_system_message() {
        let provider = OpenAIProvider::new_openai("k".to_string()).unwrap();
        let request = ProviderRequest::from_prompt("question")
            .with_system("You are a friendly financial coach.")
            .with_max_tokens(200)
            .with_temperature(0.7);

        let wire = provider.to_openai_request(&request);
        assert_eq!(wire.messages.len(), 2);
        assert_eq!(wire.messages[0].role, "system");
        assert_eq!(wire.messages[1].content, "question");
        assert_eq!(wire.model.as_deref(), Some("gpt-4o-mini"));

        let json = serde_json::to_value(&wire).unwrap();
        assert_eq!(json["max_tokens"], 200);
        assert_eq!(json["n"], 1);
    }

    #[test]
    fn test_azure_request_omits_model() {
        let provider = OpenAIProvider::new_azure(
            "k".to_string(),
            "https://res.openai.azure.com".to_string(),
            "gpt".to_string(),
        )
        .unwrap();
        let wire = provider.to_openai_request(&ProviderRequest::from_prompt("q"));
        let json = serde_json::to_value(&wire).unwrap();
        assert!(json.get("model").is_none());
    }

    #[test]
    fn test_response_without_choices_is_malformed() {
        let provider = OpenAIProvider::new_openai("k".to_string()).unwrap();
        let response: OpenAIResponse =
            serde_json::from_str(r#"{"id":"x","model":"m","choices":[]}"#).unwrap();
        let err = provider.from_openai_response(response).unwrap_err();
        assert!(matches!(err, ProviderError::MalformedResponse(_)));
    }
}
