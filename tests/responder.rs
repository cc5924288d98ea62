use chatlogic::conversation::{Conversation, GREETING, Sender};
use chatlogic::responder::{ResponderState, RuleKind, Utterance, reset_state, respond};
use std::time::Duration;

fn say(state: ResponderState, text: &str) -> (chatlogic::responder::RuleOutcome, ResponderState) {
    respond(state, &Utterance::from(text))
}

#[test]
fn single_token_becomes_the_name() {
    let (outcome, state) = say(reset_state(), "sam");

    assert_eq!(outcome.rule, RuleKind::NameRecognition);
    assert_eq!(state.stored_name(), Some("Sam"));
    assert!(outcome.reply.starts_with("Nice to meet you, Sam!"));
}

#[test]
fn introductions_are_recognised() {
    for text in ["My name is Alice", "I'm alice", "hi, my name is ALICE smith"] {
        let (outcome, state) = say(reset_state(), text);
        assert_eq!(outcome.rule, RuleKind::NameRecognition, "input: {}", text);
        assert_eq!(state.stored_name(), Some("Alice"), "input: {}", text);
    }
}

#[test]
fn name_is_only_set_once() {
    let (_, state) = say(reset_state(), "Sam");
    let (outcome, state) = say(state, "My name is Bob");

    assert_ne!(outcome.rule, RuleKind::NameRecognition);
    assert_eq!(state.stored_name(), Some("Sam"));

    let (outcome, state) = say(state, "Bob");
    assert_eq!(outcome.rule, RuleKind::DefaultFallback);
    assert_eq!(state.stored_name(), Some("Sam"));
}

#[test]
fn keywords_need_a_name_first() {
    let (outcome, state) = say(reset_state(), "I feel great today");

    assert_eq!(outcome.rule, RuleKind::DefaultFallback);
    assert_eq!(state.stored_name(), None);
    assert!(outcome.reply.contains("Please tell me your name"));
}

#[test]
fn positive_and_negative_replies_use_the_name() {
    let state = ResponderState::with_name("Sam");

    let (outcome, _) = say(state.clone(), "I feel GREAT");
    assert_eq!(outcome.rule, RuleKind::PositiveKeyword);
    assert_eq!(outcome.captured.as_deref(), Some("great"));
    assert!(outcome.reply.contains("Sam"));

    let (outcome, _) = say(state, "kind of sad");
    assert_eq!(outcome.rule, RuleKind::NegativeKeyword);
    assert_eq!(outcome.captured.as_deref(), Some("sad"));
    assert!(outcome.reply.contains("Sam"));
}

#[test]
fn keyword_lists_are_scanned_in_declared_order() {
    let state = ResponderState::with_name("Sam");

    let (outcome, _) = say(state.clone(), "amazing and happy");
    assert_eq!(outcome.captured.as_deref(), Some("happy"));

    let (outcome, _) = say(state.clone(), "awful and sad");
    assert_eq!(outcome.captured.as_deref(), Some("sad"));

    // positive is checked before negative, so "good" wins here
    let (outcome, _) = say(state, "not so good");
    assert_eq!(outcome.rule, RuleKind::PositiveKeyword);
    assert_eq!(outcome.captured.as_deref(), Some("good"));
}

#[test]
fn empty_input_falls_back_without_state_change() {
    let (outcome, state) = say(reset_state(), "");
    assert_eq!(outcome.rule, RuleKind::DefaultFallback);
    assert_eq!(state, reset_state());

    let named = ResponderState::with_name("Sam");
    let (outcome, state) = say(named.clone(), "   ");
    assert_eq!(outcome.rule, RuleKind::DefaultFallback);
    assert_eq!(state, named);
}

#[test]
fn respond_is_deterministic() {
    let state = ResponderState::with_name("Sam");
    let first = say(state.clone(), "I had a terrible day");
    let second = say(state, "I had a terrible day");
    assert_eq!(first, second);
}

#[tokio::test]
async fn rules_only_conversation_tracks_transcript_and_resets() {
    let mut conversation = Conversation::new(None, Duration::ZERO);

    let replies = conversation.send("Alice").await.unwrap();
    assert!(replies.llm.is_none());
    assert!(replies.rule.text.contains("Alice"));

    let replies = conversation.send("I feel wonderful").await.unwrap();
    assert_eq!(
        replies.rule.explanation_title.as_deref(),
        Some(RuleKind::PositiveKeyword.title())
    );

    let messages = conversation.rules().transcript().messages();
    assert_eq!(messages.len(), 5);
    assert_eq!(messages[0].text, GREETING);
    assert_eq!(messages[1].sender, Sender::User);
    assert_eq!(messages[2].sender, Sender::Bot);

    conversation.reset();
    assert_eq!(conversation.rules().state().stored_name(), None);
    assert_eq!(conversation.rules().transcript().messages().len(), 1);
}

#[test]
fn pattern_with_blank_capture_does_not_name_the_user() {
    for text in ["I'm   ", "i'm bob and my name is "] {
        let (outcome, state) = say(reset_state(), text);
        assert_eq!(outcome.rule, RuleKind::DefaultFallback, "input: {:?}", text);
        assert_eq!(state.stored_name(), None, "input: {:?}", text);
    }
}
