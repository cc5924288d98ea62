use crate::config::{Provider, ProviderConfig};
use crate::core::error::ChatError;
use crate::providers::{LLMProvider, gemini::GeminiProvider, openai::OpenAIProvider};
use std::collections::HashMap;
use std::time::Duration;

type ProviderCreator = Box<
    dyn Fn(&ProviderConfig, String, Duration) -> Result<Box<dyn LLMProvider>, ChatError>
        + Send
        + Sync,
>;

pub struct ProviderFactory {
    creators: HashMap<Provider, ProviderCreator>,
}

impl ProviderFactory {
    pub fn new() -> Self {
        let mut creators = HashMap::new();

        creators.insert(
            Provider::Gemini,
            Box::new(
                |config: &ProviderConfig,
                 api_key: String,
                 timeout: Duration|
                 -> Result<Box<dyn LLMProvider>, ChatError> {
                let model = config
                    .model
                    .clone()
                    .unwrap_or_else(|| Provider::Gemini.default_model().to_string());
                let provider = match &config.base_url {
                    Some(base_url) => {
                        GeminiProvider::with_endpoint(base_url.clone(), api_key, model, timeout)?
                    }
                    None => GeminiProvider::new(api_key, model, timeout)?,
                };
                Ok(Box::new(provider) as Box<dyn LLMProvider>)
            }) as ProviderCreator,
        );

        creators.insert(
            Provider::OpenAI,
            Box::new(
                |config: &ProviderConfig,
                 api_key: String,
                 timeout: Duration|
                 -> Result<Box<dyn LLMProvider>, ChatError> {
                let model = config
                    .model
                    .clone()
                    .unwrap_or_else(|| Provider::OpenAI.default_model().to_string());
                let provider = match &config.base_url {
                    Some(base_url) => {
                        OpenAIProvider::with_endpoint(base_url.clone(), api_key, model, timeout)?
                    }
                    None => OpenAIProvider::new(api_key, model, timeout)?,
                };
                Ok(Box::new(provider) as Box<dyn LLMProvider>)
            }) as ProviderCreator,
        );

        Self { creators }
    }

    /// Builds a provider. Fails with [`ChatError::Config`] when no API key is
    /// available from the config or the environment.
    pub fn create(
        &self,
        provider: Provider,
        config: &ProviderConfig,
        timeout: Duration,
    ) -> Result<Box<dyn LLMProvider>, ChatError> {
        let api_key = config
            .resolve_api_key(provider, |var| std::env::var(var).ok())
            .ok_or_else(|| {
                ChatError::Config(format!(
                    "{} API key is not configured",
                    provider.display_name()
                ))
            })?;

        self.creators
            .get(&provider)
            .ok_or_else(|| ChatError::Config(format!("Provider not found: {:?}", provider)))
            .and_then(|creator| creator(config, api_key, timeout))
    }
}

impl Default for ProviderFactory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_provider_with_configured_model() {
        let config = ProviderConfig {
            api_key: Some("test-key".to_string()),
            base_url: Some("http://localhost:1".to_string()),
            model: Some("gemini-test".to_string()),
        };

        let provider = ProviderFactory::new()
            .create(Provider::Gemini, &config, Duration::from_secs(1))
            .unwrap();

        assert_eq!(provider.name(), "Gemini");
        assert_eq!(provider.model(), "gemini-test");
    }

    #[test]
    fn falls_back_to_default_model() {
        let config = ProviderConfig {
            api_key: Some("test-key".to_string()),
            ..Default::default()
        };

        let provider = ProviderFactory::new()
            .create(Provider::OpenAI, &config, Duration::from_secs(1))
            .unwrap();

        assert_eq!(provider.model(), "gpt-4.1-mini");
    }
}
