use crate::commands::dispatcher::CommandDispatcher;
use crate::config::Config;
use crate::core::error::ChatError;

use console::style;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::{Hinter, HistoryHinter};
use rustyline::history::FileHistory;
use rustyline::validate::Validator;
use rustyline::{CompletionType, Config as EditorConfig, Context, EditMode, Editor, Helper};

/// Completes `/command` names.
pub struct CommandCompleter {
    command_names: Vec<String>,
}

impl CommandCompleter {
    pub fn new(command_registry: &CommandDispatcher) -> Self {
        Self {
            command_names: command_registry.get_command_names(),
        }
    }

    fn candidates(&self, line: &str, pos: usize) -> Option<(usize, Vec<Pair>)> {
        let typed = line.get(..pos)?.strip_prefix('/')?;
        if typed.contains(char::is_whitespace) {
            return None;
        }

        let matches: Vec<Pair> = self
            .command_names
            .iter()
            .filter(|cmd| cmd.starts_with(typed))
            .map(|cmd| Pair {
                display: cmd.to_string(),
                replacement: cmd.to_string(),
            })
            .collect();

        // 1 is the position after '/'
        Some((1, matches))
    }
}

/// Helper struct that combines the rustyline components
pub struct ChatHelper {
    completer: CommandCompleter,
    hinter: HistoryHinter,
}

impl ChatHelper {
    pub fn new(command_registry: &CommandDispatcher) -> Self {
        Self {
            completer: CommandCompleter::new(command_registry),
            hinter: HistoryHinter {},
        }
    }
}

impl Helper for ChatHelper {}

impl Completer for ChatHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        Ok(self
            .completer
            .candidates(line, pos)
            .unwrap_or((pos, Vec::new())))
    }
}

impl Hinter for ChatHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, ctx: &Context<'_>) -> Option<String> {
        self.hinter.hint(line, pos, ctx)
    }
}

impl Highlighter for ChatHelper {}

impl Validator for ChatHelper {}

/// Creates a configured rustyline editor
pub fn create_editor(
    command_registry: &CommandDispatcher,
) -> Result<Editor<ChatHelper, FileHistory>, ChatError> {
    let config = EditorConfig::builder()
        .history_ignore_space(true)
        .completion_type(CompletionType::List)
        .edit_mode(EditMode::Emacs)
        .build();

    let mut editor = Editor::with_config(config)
        .map_err(|e| ChatError::Input(format!("Failed to create line editor: {}", e)))?;

    editor.set_helper(Some(ChatHelper::new(command_registry)));

    if let Err(e) = editor.load_history(&Config::input_history_path()) {
        tracing::debug!("No input history loaded: {}", e);
    }

    Ok(editor)
}

/// Reads a line of input. `None` means the user asked to leave (Ctrl-C/Ctrl-D).
pub fn read_input(
    editor: &mut Editor<ChatHelper, FileHistory>,
) -> Result<Option<String>, ChatError> {
    let prompt = if cfg!(windows) && std::env::var("PSModulePath").is_ok() {
        "> ".to_string()
    } else {
        style("> ").bold().cyan().to_string()
    };
    match editor.readline(&prompt) {
        Ok(line) => {
            if !line.trim().is_empty() {
                editor
                    .add_history_entry(line.as_str())
                    .map_err(|e| ChatError::Input(format!("Failed to add history entry: {}", e)))?;
            }
            Ok(Some(line))
        }
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
            println!("Exiting...");
            Ok(None)
        }
        Err(err) => Err(ChatError::Input(format!("Input error: {}", err))),
    }
}

/// Saves the editor history
pub fn save_history(editor: &mut Editor<ChatHelper, FileHistory>) -> Result<(), ChatError> {
    let history_path = Config::input_history_path();

    if let Some(parent) = history_path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    editor
        .save_history(&history_path)
        .map_err(|e| ChatError::Input(format!("Failed to save history: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::create_command_registry;
    use std::path::PathBuf;

    fn completer() -> CommandCompleter {
        CommandCompleter::new(&create_command_registry(PathBuf::from(".")))
    }

    #[test]
    fn completes_command_prefixes() {
        let (start, pairs) = completer().candidates("/c", 2).unwrap();
        assert_eq!(start, 1);
        let names: Vec<_> = pairs.iter().map(|p| p.replacement.as_str()).collect();
        assert_eq!(names, vec!["clear", "code"]);
    }

    #[test]
    fn ignores_plain_text_and_arguments() {
        assert!(completer().candidates("hello", 5).is_none());
        assert!(completer().candidates("/logic o", 8).is_none());
    }
}
