// Error taxonomy shared by the provider layer, the coach and the HTTP server

use thiserror::Error;

/// Failures of the text-completion provider.
///
/// None of these are retried: the first failure is surfaced to the caller.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Transport-level failure (DNS, connect, TLS, timeout)
    #[error("completion provider unreachable: {0}")]
    Unreachable(String),

    /// The provider answered with a non-success status (auth, rate limit, bad parameters)
    #[error("completion provider rejected the request (status {status}): {body}")]
    Rejected { status: u16, body: String },

    /// The response body could not be decoded or carried no choices
    #[error("malformed response from completion provider: {0}")]
    MalformedResponse(String),

    /// The provider returned a completion with no usable text
    #[error("completion provider returned an empty completion")]
    EmptyResponse,

    /// The provider could not be constructed from its configuration
    #[error("provider configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ProviderError::MalformedResponse(err.to_string())
        } else if let Some(status) = err.status() {
            ProviderError::Rejected {
                status: status.as_u16(),
                body: err.to_string(),
            }
        } else {
            ProviderError::Unreachable(err.to_string())
        }
    }
}

/// Errors raised while serving a coaching request.
#[derive(Debug, Error)]
pub enum CoachError {
    /// Input failed validation; nothing was sent to the provider
    #[error("validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl CoachError {
    pub fn validation(msg: impl Into<String>) -> Self {
        CoachError::Validation(msg.into())
    }
}

/// Error message shown when no provider configuration can be found.
pub fn missing_config_error(searched: &[String]) -> String {
    let mut msg = String::from("No provider configuration found.\n\nLooked for:\n");
    for path in searched {
        msg.push_str(&format!("  • {}\n", path));
    }
    msg.push_str(
        "\nEither create a config file with a [provider] section, or set:\n\
         export AZURE_OPENAI_ENDPOINT=\"https://<resource>.openai.azure.com\"\n\
         export AZURE_OPENAI_API_KEY=\"...\"\n\
         export AZURE_OPENAI_DEPLOYMENT=\"...\"\n\
         (or OPENAI_API_KEY for the public OpenAI API)",
    );
    msg
}

/// Error message for a config file that failed to parse.
pub fn config_parse_error(path: &str, details: &str) -> String {
    format!("Failed to parse configuration file {}:\n{}", path, details)
}
