//! Side-by-side conversation: every user turn goes to both bots.

pub mod llm_bot;
pub mod rule_bot;
pub mod transcript;

pub use llm_bot::LlmBot;
pub use rule_bot::RuleBot;
pub use transcript::{ChatMessage, GREETING, Sender, Transcript};

use std::time::Duration;

/// Bot replies for one user turn.
#[derive(Debug, Clone)]
pub struct TurnReplies {
    pub rule: ChatMessage,
    pub llm: Option<ChatMessage>,
}

pub struct Conversation {
    rules: RuleBot,
    llm: Option<LlmBot>,
    thinking_delay: Duration,
}

impl Conversation {
    /// `llm` is `None` for a rules-only session.
    pub fn new(llm: Option<LlmBot>, thinking_delay: Duration) -> Self {
        Self {
            rules: RuleBot::new(),
            llm,
            thinking_delay,
        }
    }

    /// Runs one turn. Blank input is ignored. The two bots answer
    /// concurrently; neither waits on the other.
    pub async fn send(&mut self, text: &str) -> Option<TurnReplies> {
        if text.trim().is_empty() {
            return None;
        }

        let delay = self.thinking_delay;
        let rules = &mut self.rules;
        let llm = self.llm.as_mut();

        let rule_turn = async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            rules.reply(text)
        };
        let llm_turn = async move {
            match llm {
                Some(bot) => Some(bot.reply(text).await),
                None => None,
            }
        };

        let (rule, llm) = tokio::join!(rule_turn, llm_turn);
        Some(TurnReplies { rule, llm })
    }

    /// Start over: both transcripts back to the greeting, name forgotten,
    /// model history re-initialized.
    pub fn reset(&mut self) {
        self.rules.reset();
        if let Some(llm) = self.llm.as_mut() {
            llm.reset();
        }
        tracing::info!("Conversation reset");
    }

    pub fn rules(&self) -> &RuleBot {
        &self.rules
    }

    pub fn llm(&self) -> Option<&LlmBot> {
        self.llm.as_ref()
    }

    pub fn llm_mut(&mut self) -> Option<&mut LlmBot> {
        self.llm.as_mut()
    }
}
