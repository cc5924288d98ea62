use crate::core::error::ChatError;
use crate::providers::{LLMProvider, Message};
use async_trait::async_trait;
use std::time::Duration;

mod client;
pub mod types;

pub use client::GeminiClient;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

#[derive(Clone)]
pub struct GeminiProvider {
    client: GeminiClient,
}

impl GeminiProvider {
    pub fn new(api_key: String, model: String, timeout: Duration) -> Result<Self, ChatError> {
        Self::with_endpoint(DEFAULT_BASE_URL.to_string(), api_key, model, timeout)
    }

    pub fn with_endpoint(
        endpoint: String,
        api_key: String,
        model: String,
        timeout: Duration,
    ) -> Result<Self, ChatError> {
        Ok(Self {
            client: GeminiClient::new(endpoint, api_key, model, timeout)?,
        })
    }
}

#[async_trait]
impl LLMProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "Gemini"
    }

    fn model(&self) -> &str {
        &self.client.model
    }

    fn set_model(&mut self, model: &str) {
        self.client.model = model.to_string();
    }

    async fn get_response(&self, messages: &[Message]) -> Result<String, ChatError> {
        self.client.generate_content(messages).await
    }
}
