use super::{LLMProvider, Message, Role};
use crate::core::error::ChatError;
use crate::providers::base_client::HttpClient;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4.1-mini";

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatCompletionMessage<'a>>,
}

#[derive(Serialize)]
struct ChatCompletionMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: MessageContent,
}

#[derive(Deserialize)]
struct MessageContent {
    content: Option<String>,
}

#[derive(Clone)]
pub struct OpenAIProvider {
    client: HttpClient,
    model: String,
}

impl OpenAIProvider {
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
            client: HttpClient::new(endpoint, Some(api_key), timeout)?,
            model,
        })
    }
}

fn role_name(role: Role) -> &'static str {
    match role {
        Role::System => "system",
        Role::User => "user",
        Role::Assistant => "assistant",
    }
}

fn first_choice(body: &str) -> Result<String, ChatError> {
    let parsed: ChatCompletionResponse = serde_json::from_str(body)?;

    let content = parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .unwrap_or_default();

    if content.is_empty() {
        return Err(ChatError::Api("Empty response received from API".to_string()));
    }

    Ok(content)
}

#[async_trait::async_trait]
impl LLMProvider for OpenAIProvider {
    fn name(&self) -> &'static str {
        "OpenAI"
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn set_model(&mut self, model: &str) {
        self.model = model.to_string();
    }

    async fn get_response(&self, messages: &[Message]) -> Result<String, ChatError> {
        let payload = ChatCompletionRequest {
            model: &self.model,
            messages: messages
                .iter()
                .map(|m| ChatCompletionMessage {
                    role: role_name(m.role),
                    content: &m.content,
                })
                .collect(),
        };

        let response = self.client.post("chat/completions", &payload).await?;
        let response_body: String = response.text().await?;

        first_choice(&response_body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_choice_trims_content() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"  Hello Sam!\n"}}]}"#;
        assert_eq!(first_choice(body).unwrap(), "Hello Sam!");
    }

    #[test]
    fn first_choice_rejects_missing_content() {
        assert!(first_choice(r#"{"choices":[]}"#).is_err());
        assert!(first_choice(r#"{"choices":[{"message":{"content":null}}]}"#).is_err());
        assert!(matches!(
            first_choice("not json"),
            Err(ChatError::Serialization(_))
        ));
    }
}
