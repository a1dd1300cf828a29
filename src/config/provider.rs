// Provider entry: which completion service to talk to and how.

use serde::{Deserialize, Serialize};

/// A single provider entry.
///
/// Serializes with a `type` tag, e.g.:
/// ```toml
/// [provider]
/// type = "azure"
/// endpoint = "https://my-resource.openai.azure.com"
/// api_key = "..."
/// deployment = "gpt-4o-mini"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProviderEntry {
    Azure {
        api_key: String,
        endpoint: String,
        deployment: String,
    },
    Openai {
        api_key: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        model: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        base_url: Option<String>,
    },
}

impl ProviderEntry {
    /// Human-readable name for logs.
    pub fn display_name(&self) -> &str {
        match self {
            Self::Azure { .. } => "Azure OpenAI",
            Self::Openai { .. } => "OpenAI",
        }
    }

    pub fn api_key(&self) -> &str {
        match self {
            Self::Azure { api_key, .. } | Self::Openai { api_key, .. } => api_key,
        }
    }

    /// Build an entry from environment variables.
    ///
    /// Azure variables win when all three are set; otherwise `OPENAI_API_KEY`
    /// selects the public OpenAI API.
    pub fn from_env() -> Option<Self> {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());

        if let (Some(endpoint), Some(api_key), Some(deployment)) = (
            var("AZURE_OPENAI_ENDPOINT"),
            var("AZURE_OPENAI_API_KEY"),
            var("AZURE_OPENAI_DEPLOYMENT"),
        ) {
            return Some(Self::Azure {
                api_key,
                endpoint,
                deployment,
            });
        }

        var("OPENAI_API_KEY").map(|api_key| Self::Openai {
            api_key,
            model: var("OPENAI_MODEL"),
            base_url: None,
        })
    }

    /// Reject entries that cannot possibly authenticate.
    pub fn validate(&self) -> Result<(), String> {
        if self.api_key().trim().is_empty() {
            return Err(format!("{}: api_key must not be empty", self.display_name()));
        }
        if let Self::Azure {
            endpoint,
            deployment,
            ..
        } = self
        {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err(format!(
                    "Azure OpenAI: endpoint must be an http(s) URL, got '{}'",
                    endpoint
                ));
            }
            if deployment.trim().is_empty() {
                return Err("Azure OpenAI: deployment must not be empty".to_string());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_azure_entry_parses_from_toml() {
        let entry: ProviderEntry = toml::from_str(
            r#"
            type = "azure"
            api_key = "secret"
            endpoint = "https://res.openai.azure.com"
            deployment = "gpt-4o-mini"
            "#,
        )
        .unwrap();
        assert_eq!(entry.display_name(), "Azure OpenAI");
        assert!(entry.validate().is_ok());
    }

    #[test]
    fn test_openai_entry_optional_fields() {
        let entry: ProviderEntry = toml::from_str(
            r#"
            type = "openai"
            api_key = "sk-test"
            "#,
        )
        .unwrap();
        assert_eq!(
            entry,
            ProviderEntry::Openai {
                api_key: "sk-test".to_string(),
                model: None,
                base_url: None,
            }
        );
    }

    #[test]
    fn test_validate_rejects_empty_key_and_bad_endpoint() {
        let empty_key = ProviderEntry::Openai {
            api_key: "  ".to_string(),
            model: None,
            base_url: None,
        };
        assert!(empty_key.validate().is_err());

        let bad_endpoint = ProviderEntry::Azure {
            api_key: "k".to_string(),
            endpoint: "res.openai.azure.com".to_string(),
            deployment: "d".to_string(),
        };
        assert!(bad_endpoint.validate().is_err());
    }
}
