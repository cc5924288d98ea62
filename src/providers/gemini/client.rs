use crate::core::error::ChatError;
use crate::providers::base_client::HttpClient;
use crate::providers::gemini::types::*;
use crate::providers::{Message, Role};
use std::time::Duration;

#[derive(Clone)]
pub struct GeminiClient {
    pub model: String,
    client: HttpClient,
}

impl GeminiClient {
    pub fn new(
        base_url: String,
        api_key: String,
        model: String,
        timeout: Duration,
    ) -> Result<Self, ChatError> {
        let mut client = HttpClient::new(base_url, None, timeout)?;

        // Gemini takes the key as a query parameter rather than a bearer token
        client.add_query_param("key", api_key);

        Ok(Self { client, model })
    }

    pub async fn generate_content(&self, messages: &[Message]) -> Result<String, ChatError> {
        let payload = build_payload(messages);
        let response = self
            .client
            .post(
                &format!("v1beta/models/{}:generateContent", self.model),
                &payload,
            )
            .await?;

        let response_body: String = response.text().await?;
        let parsed: GenerateContentResponse = serde_json::from_str(&response_body).map_err(|e| {
            ChatError::Serialization(format!("Failed to parse Gemini response: {}", e))
        })?;

        extract_text(parsed)
    }
}

/// Splits the first system message into `system_instruction` and maps the
/// remaining turns onto Gemini's `user`/`model` roles.
pub fn build_payload(messages: &[Message]) -> GenerateContentRequest {
    let mut contents = Vec::new();
    let mut system_instruction = None;

    for message in messages {
        let role = match message.role {
            Role::System => {
                if system_instruction.is_none() {
                    system_instruction = Some(Content::text(None, &message.content));
                }
                continue;
            }
            Role::User => "user",
            Role::Assistant => "model",
        };

        contents.push(Content::text(Some(role), &message.content));
    }

    GenerateContentRequest {
        contents,
        system_instruction,
    }
}

/// Joined text parts of the first candidate.
pub fn extract_text(response: GenerateContentResponse) -> Result<String, ChatError> {
    if let Some(reason) = response
        .prompt_feedback
        .and_then(|feedback| feedback.block_reason)
    {
        return Err(ChatError::Api(format!("Gemini blocked the prompt: {}", reason)));
    }

    let candidate = response.candidates.into_iter().next();
    let finish_reason = candidate
        .as_ref()
        .and_then(|c| c.finish_reason.clone())
        .unwrap_or_else(|| "no candidates".to_string());

    let text: String = candidate
        .and_then(|c| c.content)
        .map(|content| content.parts.into_iter().map(|part| part.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(ChatError::Api(format!(
            "No valid response from Gemini ({})",
            finish_reason
        )));
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_moves_system_prompt_and_renames_assistant() {
        let messages = vec![
            Message::system("be kind"),
            Message::assistant("Hello!"),
            Message::user("I'm Sam"),
        ];

        let payload = serde_json::to_value(build_payload(&messages)).unwrap();

        assert_eq!(
            payload["system_instruction"]["parts"][0]["text"],
            "be kind"
        );
        assert_eq!(payload["contents"].as_array().unwrap().len(), 2);
        assert_eq!(payload["contents"][0]["role"], "model");
        assert_eq!(payload["contents"][1]["role"], "user");
        assert_eq!(payload["contents"][1]["parts"][0]["text"], "I'm Sam");
    }

    #[test]
    fn payload_without_system_prompt_omits_field() {
        let payload = serde_json::to_value(build_payload(&[Message::user("hi")])).unwrap();
        assert!(payload.get("system_instruction").is_none());
    }

    #[test]
    fn extract_text_joins_parts_of_first_candidate() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"Hi "},{"text":"Sam"}]}},
                {"content":{"parts":[{"text":"ignored"}]}}]}"#,
        )
        .unwrap();

        assert_eq!(extract_text(response).unwrap(), "Hi Sam");
    }

    #[test]
    fn extract_text_rejects_empty_candidates() {
        let response: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        assert!(matches!(extract_text(response), Err(ChatError::Api(_))));

        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(extract_text(response).is_err());
    }

    #[test]
    fn extract_text_reports_blocked_prompts() {
        let response: GenerateContentResponse =
            serde_json::from_str(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#).unwrap();

        match extract_text(response) {
            Err(ChatError::Api(msg)) => assert!(msg.contains("SAFETY")),
            other => panic!("expected api error, got {:?}", other),
        }
    }
}
