use super::transcript::{ChatMessage, GREETING, Transcript};
use crate::providers::{LLMProvider, Message};

pub const SYSTEM_INSTRUCTION: &str =
    "You are a friendly and empathetic chatbot. Keep your responses concise and conversational.";

/// The "I Get It Bot" lane: a hosted model plus the chat history sent to it.
///
/// Without a provider (no API key) every turn answers with a configuration
/// notice instead of making a request.
pub struct LlmBot {
    provider: Option<Box<dyn LLMProvider>>,
    service_name: &'static str,
    history: Vec<Message>,
    transcript: Transcript,
}

impl LlmBot {
    pub fn new(provider: Box<dyn LLMProvider>) -> Self {
        let service_name = provider.name();
        Self {
            provider: Some(provider),
            service_name,
            history: initial_history(),
            transcript: Transcript::new("gm"),
        }
    }

    pub fn unconfigured(service_name: &'static str) -> Self {
        Self {
            provider: None,
            service_name,
            history: initial_history(),
            transcript: Transcript::new("gm"),
        }
    }

    pub fn service_name(&self) -> &'static str {
        self.service_name
    }

    pub fn model(&self) -> Option<&str> {
        self.provider.as_ref().map(|p| p.model())
    }

    /// Returns false when there is no provider to switch.
    pub fn set_model(&mut self, model: &str) -> bool {
        match self.provider.as_mut() {
            Some(provider) => {
                provider.set_model(model);
                true
            }
            None => false,
        }
    }

    /// One request per turn. A failed request is never retried; it becomes
    /// an apology message and leaves the history as it was before the turn.
    pub async fn reply(&mut self, text: &str) -> ChatMessage {
        let previous = self.transcript.render();
        self.transcript.push_user(text);

        let name = self.service_name;
        let message = match &self.provider {
            None => ChatMessage::bot(format!(
                "{} API key is not configured. Please check the environment variables.",
                name
            ))
            .with_explanation(
                "Configuration Error",
                format!(
                    "No API key was found for {}. Set one in the config file or in the environment.",
                    name
                ),
            ),
            Some(provider) => {
                self.history.push(Message::user(text));
                tracing::debug!(
                    "Sending {} messages to {} ({})",
                    self.history.len(),
                    name,
                    provider.model()
                );

                match provider.get_response(&self.history).await {
                    Ok(reply) => {
                        self.history.push(Message::assistant(reply.clone()));
                        ChatMessage::bot(reply).with_explanation(
                            format!("Context Sent to {}", name),
                            context_explanation(&previous, text),
                        )
                    }
                    Err(e) => {
                        self.history.pop();
                        tracing::warn!("{} request failed: {}", name, e);
                        ChatMessage::bot(format!(
                            "Sorry, I ran into an issue connecting to the {} API.",
                            name
                        ))
                        .with_explanation(
                            "API Error",
                            format!(
                                "There was an error fetching the response from the {} API ({}). \
                                 Run with -v for details and make sure the API key is configured correctly.",
                                name, e
                            ),
                        )
                    }
                }
            }
        };

        self.transcript.push_bot(message).clone()
    }

    pub fn reset(&mut self) {
        self.history = initial_history();
        self.transcript.reset();
    }

    pub fn history(&self) -> &[Message] {
        &self.history
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }
}

fn initial_history() -> Vec<Message> {
    vec![
        Message::system(SYSTEM_INSTRUCTION),
        Message::assistant(GREETING),
    ]
}

fn context_explanation(previous: &str, current: &str) -> String {
    let previous = if previous.trim().is_empty() {
        "(No previous history)"
    } else {
        previous
    };

    format!(
        "SYSTEM INSTRUCTION:\n{}\n\nPREVIOUS CHAT HISTORY:\n{}\n\nCURRENT USER MESSAGE:\n\"{}\"",
        SYSTEM_INSTRUCTION, previous, current
    )
}
