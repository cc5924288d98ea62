use super::transcript::{ChatMessage, Transcript};
use crate::responder::{self, ResponderState, RuleKind, Utterance};

/// The "If/Then Bot" lane: responder state plus its transcript.
#[derive(Debug, Clone)]
pub struct RuleBot {
    state: ResponderState,
    transcript: Transcript,
    last_rule: Option<RuleKind>,
}

impl RuleBot {
    pub fn new() -> Self {
        Self {
            state: responder::reset_state(),
            transcript: Transcript::new("rb"),
            last_rule: None,
        }
    }

    pub fn reply(&mut self, text: &str) -> ChatMessage {
        self.transcript.push_user(text);

        let state = std::mem::take(&mut self.state);
        let (outcome, state) = responder::respond(state, &Utterance::from(text));
        self.state = state;

        tracing::debug!(
            "Rule fired: {:?} (captured: {:?})",
            outcome.rule,
            outcome.captured
        );
        self.last_rule = Some(outcome.rule);

        let message = ChatMessage::bot(outcome.reply)
            .with_explanation(outcome.rule.title(), outcome.explanation)
            .with_code_snippet(outcome.rule.snippet());
        self.transcript.push_bot(message).clone()
    }

    pub fn reset(&mut self) {
        self.state = responder::reset_state();
        self.transcript.reset();
        self.last_rule = None;
    }

    pub fn state(&self) -> &ResponderState {
        &self.state
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn last_rule(&self) -> Option<RuleKind> {
        self.last_rule
    }
}

impl Default for RuleBot {
    fn default() -> Self {
        Self::new()
    }
}
