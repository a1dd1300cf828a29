// Provider factory - builds the configured completion provider

use crate::config::ProviderEntry;
use crate::errors::ProviderError;

use super::openai::OpenAIProvider;
use super::LlmProvider;

/// Create a provider from a config entry
pub fn create_provider(entry: &ProviderEntry) -> Result<Box<dyn LlmProvider>, ProviderError> {
    entry.validate().map_err(ProviderError::Configuration)?;

    match entry {
        ProviderEntry::Azure {
            api_key,
            endpoint,
            deployment,
        } => {
            let provider =
                OpenAIProvider::new_azure(api_key.clone(), endpoint.clone(), deployment.clone())?;
            Ok(Box::new(provider))
        }
        ProviderEntry::Openai {
            api_key,
            model,
            base_url,
        } => {
            let mut provider = OpenAIProvider::new_openai(api_key.clone())?;
            if let Some(model) = model {
                provider = provider.with_model(model);
            }
            if let Some(base_url) = base_url {
                provider = provider.with_base_url(base_url);
            }
            Ok(Box::new(provider))
        }
    }
}
