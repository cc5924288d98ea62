//! Rule-based responder behind the "If/Then Bot".
//!
//! [`respond`] is a pure function of the current [`ResponderState`] and one
//! [`Utterance`]. Exactly one of four rules fires per call, checked in a fixed
//! order: name recognition, positive keyword, negative keyword, fallback. The
//! only state change is storing the user's name, which happens at most once.

use once_cell::sync::Lazy;
use regex::Regex;

/// Positive keywords, in the order they are scanned.
pub const POSITIVE_KEYWORDS: [&str; 7] = [
    "happy",
    "good",
    "great",
    "fantastic",
    "wonderful",
    "excellent",
    "amazing",
];

/// Negative keywords, in the order they are scanned.
pub const NEGATIVE_KEYWORDS: [&str; 6] = [
    "sad",
    "bad",
    "terrible",
    "awful",
    "not so good",
    "not great",
];

static MY_NAME_IS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)my name is (.*)").expect("name pattern is valid"));
static I_AM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)i'm (.*)").expect("name pattern is valid"));

/// Raw text of one user turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utterance(String);

impl Utterance {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Utterance {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Utterance {
    fn from(text: String) -> Self {
        Self(text)
    }
}

/// What the responder remembers between turns of one conversation.
///
/// The name slot is private so it can only be filled by [`respond`], and only
/// while it is still empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponderState {
    stored_name: Option<String>,
}

impl ResponderState {
    /// State for a conversation that already knows the user's name.
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            stored_name: Some(name.into()),
        }
    }

    pub fn stored_name(&self) -> Option<&str> {
        self.stored_name.as_deref()
    }
}

/// Empty state, used when a conversation starts or is restarted.
pub fn reset_state() -> ResponderState {
    ResponderState::default()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    NameRecognition,
    PositiveKeyword,
    NegativeKeyword,
    DefaultFallback,
}

impl RuleKind {
    pub fn title(&self) -> &'static str {
        match self {
            RuleKind::NameRecognition => "Rule: Name Recognition",
            RuleKind::PositiveKeyword => "Rule: Positive Keyword Match",
            RuleKind::NegativeKeyword => "Rule: Negative Keyword Match",
            RuleKind::DefaultFallback => "Rule: Default Fallback",
        }
    }

    /// Condensed source of the rule, shown by `/code`.
    pub fn snippet(&self) -> &'static str {
        match self {
            RuleKind::NameRecognition => NAME_SNIPPET,
            RuleKind::PositiveKeyword => POSITIVE_SNIPPET,
            RuleKind::NegativeKeyword => NEGATIVE_SNIPPET,
            RuleKind::DefaultFallback => FALLBACK_SNIPPET,
        }
    }
}

/// Result of evaluating one utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    pub reply: String,
    pub rule: RuleKind,
    /// Why the rule matched. Display only.
    pub explanation: String,
    /// The extracted name or the matched keyword, if the rule captured one.
    pub captured: Option<String>,
}

/// Evaluates `utterance` against the rules and returns the reply together
/// with the (possibly updated) state.
pub fn respond(state: ResponderState, utterance: &Utterance) -> (RuleOutcome, ResponderState) {
    let text = utterance.as_str();
    let lowered = text.to_lowercase();

    let name = match state.stored_name() {
        Some(name) => name.to_string(),
        None => {
            return match extract_name(text, &lowered) {
                Some(candidate) => {
                    let name = capitalize(&candidate);
                    let outcome = name_outcome(&name);
                    (outcome, ResponderState::with_name(name))
                }
                None => (fallback_outcome(None), state),
            };
        }
    };

    let outcome = if let Some(keyword) = first_keyword(&lowered, &POSITIVE_KEYWORDS) {
        RuleOutcome {
            reply: format!(
                "That's wonderful to hear, {}! I'm glad you're feeling {}. What's making you feel that way?",
                name, keyword
            ),
            rule: RuleKind::PositiveKeyword,
            explanation: format!(
                "IF a user name is stored AND input contains a positive keyword (\"{}\"), THEN provide a canned positive response.",
                keyword
            ),
            captured: Some(keyword.to_string()),
        }
    } else if let Some(keyword) = first_keyword(&lowered, &NEGATIVE_KEYWORDS) {
        RuleOutcome {
            reply: format!(
                "I'm sorry to hear you're feeling {}, {}. It's okay to feel that way. Is there anything you'd like to talk about?",
                keyword, name
            ),
            rule: RuleKind::NegativeKeyword,
            explanation: format!(
                "IF a user name is stored AND input contains a negative keyword (\"{}\"), THEN provide a canned empathetic response.",
                keyword
            ),
            captured: Some(keyword.to_string()),
        }
    } else {
        fallback_outcome(Some(&name))
    };

    (outcome, state)
}

/// Name candidate from "my name is ..." / "I'm ..." or a lone token.
///
/// Patterns run on the lowercased text; the lone-token case keeps the raw
/// casing. A pattern with a non-empty capture decides on its own, even when
/// the capture holds only whitespace.
fn extract_name(text: &str, lowered: &str) -> Option<String> {
    let capture = MY_NAME_IS
        .captures(lowered)
        .or_else(|| I_AM.captures(lowered))
        .and_then(|caps| caps.get(1))
        .map(|rest| rest.as_str())
        .filter(|rest| !rest.is_empty());

    if let Some(rest) = capture {
        return rest.split_whitespace().next().map(str::to_string);
    }

    let mut tokens = text.split_whitespace();
    match (tokens.next(), tokens.next()) {
        (Some(token), None) => Some(token.to_string()),
        _ => None,
    }
}

fn first_keyword(lowered: &str, keywords: &[&'static str]) -> Option<&'static str> {
    keywords.iter().copied().find(|keyword| lowered.contains(keyword))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn name_outcome(name: &str) -> RuleOutcome {
    RuleOutcome {
        reply: format!(
            "Nice to meet you, {}! How are you feeling today? For example, you can tell me if you're happy or sad.",
            name
        ),
        rule: RuleKind::NameRecognition,
        explanation: format!(
            "IF input is a single word OR contains \"my name is...\"/\"I'm...\" AND no name is stored yet, THEN extract name (\"{}\") and respond.",
            name
        ),
        captured: Some(name.to_string()),
    }
}

fn fallback_outcome(name: Option<&str>) -> RuleOutcome {
    let reply = match name {
        Some(name) => format!(
            "I'm not sure how to respond to that, {}. You can tell me if you are feeling happy or sad.",
            name
        ),
        None => "I'm a simple bot. Please tell me your name. For example, \"My name is Hal\"."
            .to_string(),
    };

    RuleOutcome {
        reply,
        rule: RuleKind::DefaultFallback,
        explanation:
            "IF no other rule matches, THEN provide a default response prompting for valid input."
                .to_string(),
        captured: None,
    }
}

const NAME_SNIPPET: &str = r#"// Rule: name introduction
if state.stored_name().is_none() {
    let name = MY_NAME_IS.captures(&lowered)
        .or_else(|| I_AM.captures(&lowered))
        .and_then(|caps| first_token(&caps[1]))
        .or_else(|| single_token(text));
    if let Some(name) = name {
        // store capitalize(name), then greet and ask how they feel
    }
}"#;

const POSITIVE_SNIPPET: &str = r#"// Rule: positive keywords
const POSITIVE_KEYWORDS: [&str; 7] = ["happy", "good", "great", ...];
let found = POSITIVE_KEYWORDS.iter().find(|kw| lowered.contains(*kw));

if let (Some(name), Some(keyword)) = (stored_name, found) {
    // "That's wonderful to hear, {name}! I'm glad you're feeling {keyword}."
}"#;

const NEGATIVE_SNIPPET: &str = r#"// Rule: negative keywords
const NEGATIVE_KEYWORDS: [&str; 6] = ["sad", "bad", "terrible", ...];
let found = NEGATIVE_KEYWORDS.iter().find(|kw| lowered.contains(*kw));

if let (Some(name), Some(keyword)) = (stored_name, found) {
    // "I'm sorry to hear you're feeling {keyword}, {name}."
}"#;

const FALLBACK_SNIPPET: &str = r#"// Rule: default fallback
} else {
    match stored_name {
        Some(name) => "I'm not sure how to respond to that, {name}. ...",
        None => "I'm a simple bot. Please tell me your name.",
    }
}"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalize_handles_empty_and_unicode() {
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("émile"), "Émile");
        assert_eq!(capitalize("Bob"), "Bob");
    }

    #[test]
    fn pattern_names_come_from_lowercased_text() {
        let text = "My name is ALICE Smith";
        assert_eq!(
            extract_name(text, &text.to_lowercase()).as_deref(),
            Some("alice")
        );
    }

    #[test]
    fn lone_token_keeps_raw_casing() {
        assert_eq!(extract_name("  ALICE ", "  alice ").as_deref(), Some("ALICE"));
    }

    #[test]
    fn my_name_is_wins_over_i_am() {
        let text = "i'm here and my name is zed";
        assert_eq!(extract_name(text, text).as_deref(), Some("zed"));
    }

    #[test]
    fn whitespace_capture_yields_no_name() {
        assert_eq!(extract_name("I'm   ", "i'm   "), None);

        let text = "i'm bob and my name is ";
        assert_eq!(extract_name(text, text), None);
    }

    #[test]
    fn empty_capture_falls_back_to_lone_token() {
        assert_eq!(extract_name("I'm ", "i'm ").as_deref(), Some("I'm"));
    }

    #[test]
    fn multi_word_without_pattern_has_no_name() {
        assert_eq!(extract_name("hello there", "hello there"), None);
        assert_eq!(extract_name("", ""), None);
        assert_eq!(extract_name(" \t ", " \t "), None);
    }

    #[test]
    fn first_keyword_follows_declared_order() {
        assert_eq!(
            first_keyword("amazing and happy", &POSITIVE_KEYWORDS),
            Some("happy")
        );
        assert_eq!(first_keyword("nothing here", &NEGATIVE_KEYWORDS), None);
    }

    #[test]
    fn every_rule_has_a_title_and_snippet() {
        for rule in [
            RuleKind::NameRecognition,
            RuleKind::PositiveKeyword,
            RuleKind::NegativeKeyword,
            RuleKind::DefaultFallback,
        ] {
            assert!(rule.title().starts_with("Rule: "));
            assert!(rule.snippet().starts_with("// Rule: "));
        }
    }
}
