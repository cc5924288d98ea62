use crate::core::error::ChatError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// A hosted model reachable through one request/response call.
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Human-readable service name, used in user-facing notes.
    fn name(&self) -> &'static str;

    fn model(&self) -> &str;

    fn set_model(&mut self, model: &str);

    async fn get_response(&self, messages: &[Message]) -> Result<String, ChatError>;
}

pub mod base_client;
pub mod factory;
pub mod gemini;
pub mod openai;
