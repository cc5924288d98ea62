use super::ChatState;
use crate::core::error::ChatError;
use serde::Serialize;
use std::path::PathBuf;

use console::style;

pub trait CommandHandler: Send + Sync {
    fn execute(&self, state: &mut ChatState, args: &[&str]) -> Result<Option<String>, ChatError>;
    fn help(&self) -> &'static str;
}

pub struct QuitCommand;
pub struct ClearCommand;
pub struct LogicCommand;
pub struct CodeCommand;
pub struct ModelCommand;

pub struct HelpCommand {
    lines: Vec<&'static str>,
}

impl HelpCommand {
    pub fn new(lines: Vec<&'static str>) -> Self {
        Self { lines }
    }
}

pub struct SaveHistoryCommand {
    dir: PathBuf,
}

impl SaveHistoryCommand {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }
}

impl CommandHandler for QuitCommand {
    fn execute(&self, state: &mut ChatState, _args: &[&str]) -> Result<Option<String>, ChatError> {
        state.should_continue = false;
        Ok(None)
    }

    fn help(&self) -> &'static str {
        "/quit - Exit the chat session"
    }
}

impl CommandHandler for HelpCommand {
    fn execute(
        &self,
        _state: &mut ChatState,
        _args: &[&str],
    ) -> Result<Option<String>, ChatError> {
        let mut help_text = vec![style("Available Commands").bold().underlined().to_string()];
        help_text.extend(self.lines.iter().map(|line| style(line).to_string()));
        Ok(Some(help_text.join("\n")))
    }

    fn help(&self) -> &'static str {
        "/help - Show available commands"
    }
}

impl CommandHandler for ClearCommand {
    fn execute(&self, state: &mut ChatState, _args: &[&str]) -> Result<Option<String>, ChatError> {
        state.conversation.reset();
        Ok(Some("Both conversations cleared. Starting over.".to_string()))
    }

    fn help(&self) -> &'static str {
        "/clear - Start over with both bots"
    }
}

impl CommandHandler for LogicCommand {
    fn execute(&self, state: &mut ChatState, args: &[&str]) -> Result<Option<String>, ChatError> {
        state.show_logic = match args.first() {
            None => !state.show_logic,
            Some(&"on") => true,
            Some(&"off") => false,
            Some(other) => {
                return Ok(Some(format!(
                    "Unknown option '{}'. Use: /logic [on|off]",
                    other
                )));
            }
        };

        let status = if state.show_logic { "shown" } else { "hidden" };
        Ok(Some(format!("Logic explanations are now {}.", status)))
    }

    fn help(&self) -> &'static str {
        "/logic [on|off] - Show or hide the logic behind each reply"
    }
}

impl CommandHandler for CodeCommand {
    fn execute(&self, state: &mut ChatState, _args: &[&str]) -> Result<Option<String>, ChatError> {
        match state.conversation.rules().last_rule() {
            Some(rule) => Ok(Some(format!(
                "{}\n{}",
                style(rule.title()).bold(),
                rule.snippet()
            ))),
            None => Ok(Some("No rule has fired yet.".to_string())),
        }
    }

    fn help(&self) -> &'static str {
        "/code - Show the code of the last rule that fired"
    }
}

impl CommandHandler for ModelCommand {
    fn execute(&self, state: &mut ChatState, args: &[&str]) -> Result<Option<String>, ChatError> {
        let Some(llm) = state.conversation.llm_mut() else {
            return Ok(Some("The LLM bot is disabled in this session.".to_string()));
        };

        match args.first() {
            None => Ok(Some(match llm.model() {
                Some(model) => format!("Current model: {}", model),
                None => format!("{} is not configured.", llm.service_name()),
            })),
            Some(new_model) => {
                if llm.set_model(new_model) {
                    Ok(Some(format!("Model changed to: {}", new_model)))
                } else {
                    Ok(Some(format!(
                        "{} is not configured; cannot change model.",
                        llm.service_name()
                    )))
                }
            }
        }
    }

    fn help(&self) -> &'static str {
        "/model [name] - Show or change the LLM model"
    }
}

#[derive(Serialize)]
struct SavedSession<'a> {
    rule_bot: &'a [crate::conversation::ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    llm_bot: Option<&'a [crate::conversation::ChatMessage]>,
}

impl CommandHandler for SaveHistoryCommand {
    fn execute(&self, state: &mut ChatState, args: &[&str]) -> Result<Option<String>, ChatError> {
        let filename = match args.first() {
            Some(name) => name.to_string(),
            None => chrono::Local::now()
                .format("%Y%m%d_%H%M%S.json")
                .to_string(),
        };

        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(filename);

        let session = SavedSession {
            rule_bot: state.conversation.rules().transcript().messages(),
            llm_bot: state
                .conversation
                .llm()
                .map(|llm| llm.transcript().messages()),
        };

        let file = std::fs::File::create(&path)?;
        serde_json::to_writer_pretty(file, &session)?;
        tracing::info!("Saved transcript to {}", path.display());

        Ok(Some(format!("History saved to: {}", path.display())))
    }

    fn help(&self) -> &'static str {
        "/save [filename] - Save both transcripts as JSON"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::create_command_registry;
    use crate::conversation::Conversation;
    use std::time::Duration;

    fn state() -> ChatState {
        ChatState::new(Conversation::new(None, Duration::ZERO), true)
    }

    #[test]
    fn quit_stops_the_loop() {
        let mut state = state();
        QuitCommand.execute(&mut state, &[]).unwrap();
        assert!(!state.should_continue);
    }

    #[test]
    fn logic_toggles_and_accepts_explicit_values() {
        let mut state = state();
        LogicCommand.execute(&mut state, &[]).unwrap();
        assert!(!state.show_logic);
        LogicCommand.execute(&mut state, &["on"]).unwrap();
        assert!(state.show_logic);
        LogicCommand.execute(&mut state, &["off"]).unwrap();
        assert!(!state.show_logic);

        let reply = LogicCommand.execute(&mut state, &["maybe"]).unwrap();
        assert!(reply.unwrap().contains("Unknown option"));
        assert!(!state.show_logic);
    }

    #[tokio::test]
    async fn code_shows_last_rule() {
        let mut state = state();
        let before = CodeCommand.execute(&mut state, &[]).unwrap().unwrap();
        assert_eq!(before, "No rule has fired yet.");

        state.conversation.send("Sam").await;
        let after = CodeCommand.execute(&mut state, &[]).unwrap().unwrap();
        assert!(after.contains("// Rule: name introduction"));
    }

    #[tokio::test]
    async fn clear_resets_conversation() {
        let mut state = state();
        state.conversation.send("Sam").await;

        ClearCommand.execute(&mut state, &[]).unwrap();
        assert_eq!(state.conversation.rules().state().stored_name(), None);
    }

    #[test]
    fn model_reports_disabled_llm() {
        let mut state = state();
        let reply = ModelCommand.execute(&mut state, &["x"]).unwrap().unwrap();
        assert!(reply.contains("disabled"));
    }

    #[tokio::test]
    async fn save_writes_rule_transcript() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state();
        state.conversation.send("my name is alice").await;

        SaveHistoryCommand::new(dir.path().to_path_buf())
            .execute(&mut state, &["session.json"])
            .unwrap();

        let saved: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(dir.path().join("session.json")).unwrap())
                .unwrap();
        let rule_bot = saved["rule_bot"].as_array().unwrap();
        assert_eq!(rule_bot.len(), 3);
        assert_eq!(rule_bot[1]["text"], "my name is alice");
        assert_eq!(rule_bot[2]["explanation_title"], "Rule: Name Recognition");
        assert!(saved.get("llm_bot").is_none());
    }

    #[test]
    fn dispatcher_parses_lines_and_rejects_unknown_commands() {
        let dispatcher = create_command_registry(PathBuf::from("."));
        let mut state = state();

        assert!(dispatcher.execute_line("hello", &mut state).is_none());
        assert!(matches!(
            dispatcher.execute_line("/nope", &mut state),
            Some(Err(ChatError::Input(_)))
        ));

        let help = dispatcher
            .execute_line("/help", &mut state)
            .unwrap()
            .unwrap()
            .unwrap();
        for name in ["/quit", "/clear", "/logic", "/code", "/model", "/save"] {
            assert!(help.contains(name), "missing {} in help", name);
        }

        dispatcher.execute_line("  /logic off ", &mut state);
        assert!(!state.show_logic);
    }
}
