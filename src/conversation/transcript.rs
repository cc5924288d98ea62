use serde::{Deserialize, Serialize};

/// Opening line of both bots.
pub const GREETING: &str = "Hello! I'm a chatbot. Please tell me your name to get started.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub sender: Sender,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_snippet: Option<String>,
}

impl ChatMessage {
    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            sender: Sender::Bot,
            text: text.into(),
            explanation_title: None,
            explanation: None,
            code_snippet: None,
        }
    }

    pub fn with_explanation(mut self, title: impl Into<String>, body: impl Into<String>) -> Self {
        self.explanation_title = Some(title.into());
        self.explanation = Some(body.into());
        self
    }

    pub fn with_code_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.code_snippet = Some(snippet.into());
        self
    }
}

/// One bot's message list. Ids are `<prefix>-<seq>`, unique within the
/// transcript until it is reset.
#[derive(Debug, Clone)]
pub struct Transcript {
    prefix: &'static str,
    next_seq: u64,
    messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn new(prefix: &'static str) -> Self {
        let mut transcript = Self {
            prefix,
            next_seq: 0,
            messages: Vec::new(),
        };
        transcript.reset();
        transcript
    }

    pub fn reset(&mut self) {
        self.messages.clear();
        self.next_seq = 0;
        let mut greeting = ChatMessage::bot(GREETING);
        greeting.id = format!("{}-initial", self.prefix);
        self.messages.push(greeting);
    }

    pub fn push_user(&mut self, text: &str) -> &ChatMessage {
        let message = ChatMessage {
            id: String::new(),
            sender: Sender::User,
            text: text.to_string(),
            explanation_title: None,
            explanation: None,
            code_snippet: None,
        };
        self.push(message, "user")
    }

    pub fn push_bot(&mut self, message: ChatMessage) -> &ChatMessage {
        self.push(message, "bot")
    }

    fn push(&mut self, mut message: ChatMessage, kind: &str) -> &ChatMessage {
        self.next_seq += 1;
        message.id = format!("{}-{}-{}", self.prefix, self.next_seq, kind);
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    /// `BOT: ...` / `USER: ...` lines, one per message.
    pub fn render(&self) -> String {
        render_lines(&self.messages)
    }
}

pub fn render_lines(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .map(|msg| {
            let who = match msg.sender {
                Sender::Bot => "BOT",
                Sender::User => "USER",
            };
            format!("{}: {}", who, msg.text)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
