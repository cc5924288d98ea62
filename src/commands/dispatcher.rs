use super::{
    ChatState,
    handler::{
        ClearCommand, CodeCommand, HelpCommand, LogicCommand, ModelCommand, QuitCommand,
        SaveHistoryCommand,
    },
    registry::CommandRegistry,
};
use crate::core::error::ChatError;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Clone)]
pub struct CommandDispatcher {
    registry: Arc<CommandRegistry>,
}

impl CommandDispatcher {
    pub fn new(registry: Arc<CommandRegistry>) -> Self {
        Self { registry }
    }

    /// Runs a `/command arg...` line. Returns `None` for lines that are not
    /// commands.
    pub fn execute_line(
        &self,
        line: &str,
        state: &mut ChatState,
    ) -> Option<Result<Option<String>, ChatError>> {
        let rest = line.trim().strip_prefix('/')?;
        let parts: Vec<&str> = rest.split_whitespace().collect();
        let (command, args) = match parts.split_first() {
            Some((command, args)) => (*command, args),
            None => return Some(Err(ChatError::Input("Empty command".to_string()))),
        };
        Some(self.execute(command, args, state))
    }

    pub fn execute(
        &self,
        command: &str,
        args: &[&str],
        state: &mut ChatState,
    ) -> Result<Option<String>, ChatError> {
        self.registry.execute(command, args, state)
    }

    pub fn get_command_names(&self) -> Vec<String> {
        self.registry.get_command_names()
    }
}

pub fn create_command_registry(history_dir: PathBuf) -> CommandDispatcher {
    let mut registry = CommandRegistry::new();

    registry.register("quit", QuitCommand);
    registry.register("clear", ClearCommand);
    registry.register("logic", LogicCommand);
    registry.register("code", CodeCommand);
    registry.register("model", ModelCommand);
    registry.register("save", SaveHistoryCommand::new(history_dir));

    let mut lines = vec!["/help - Show available commands"];
    lines.extend(registry.help_lines());
    registry.register("help", HelpCommand::new(lines));

    CommandDispatcher::new(Arc::new(registry))
}
