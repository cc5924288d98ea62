use crate::cli::Args;
use crate::commands::{ChatState, dispatcher::CommandDispatcher};
use crate::config::{Config, Provider};
use crate::conversation::{Conversation, GREETING, LlmBot};
use crate::core::error::ChatError;
use crate::display;
use crate::input;
use crate::providers::factory::ProviderFactory;
use is_terminal::IsTerminal;
use std::io::{self, Read};
use std::time::Duration;

pub struct Application {
    pub args: Args,
    pub config: Config,
    pub command_dispatcher: CommandDispatcher,
}

impl Application {
    pub fn new(args: Args, config: Config, command_dispatcher: CommandDispatcher) -> Self {
        Self {
            args,
            config,
            command_dispatcher,
        }
    }

    pub async fn run(&mut self) -> Result<(), ChatError> {
        if self.args.chat {
            return self.handle_continuous_chat_mode().await;
        }

        let piped = if !io::stdin().is_terminal() {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| ChatError::Input(format!("Failed to read from stdin: {}", e)))?;
            Some(buffer)
        } else {
            None
        };

        let turns = collect_turns(piped.as_deref(), self.args.query.as_deref());
        if turns.is_empty() {
            return Err(ChatError::Input(
                "No message provided. Pass one as an argument, pipe lines on stdin, or use --chat"
                    .to_string(),
            ));
        }

        self.handle_batch_mode(&turns).await
    }

    fn show_logic(&self) -> bool {
        self.config.show_logic && !self.args.no_logic
    }

    fn build_state(&self, thinking_delay: Duration) -> Result<ChatState, ChatError> {
        let llm = build_llm(&self.args, &self.config)?;
        Ok(ChatState::new(
            Conversation::new(llm, thinking_delay),
            self.show_logic(),
        ))
    }

    /// Runs each turn in order and prints both replies. Lines starting with
    /// `/` are treated as commands.
    async fn handle_batch_mode(&self, turns: &[String]) -> Result<(), ChatError> {
        let mut state = self.build_state(Duration::ZERO)?;

        for turn in turns {
            if !state.should_continue {
                break;
            }
            if self.run_command(turn, &mut state) {
                continue;
            }

            println!("\nYou: {}", turn);
            if let Some(replies) = state.conversation.send(turn).await {
                display::display_turn(&replies, state.show_logic);
            }
        }

        Ok(())
    }

    async fn handle_continuous_chat_mode(&self) -> Result<(), ChatError> {
        let mut state = self.build_state(self.config.thinking_delay())?;

        let description = state
            .conversation
            .llm()
            .map(|llm| format!("Powered by a Large Language Model ({})", llm.service_name()));
        display::display_banner(description.as_deref());
        println!("Type '/help' for available commands. Press Ctrl+D or type /quit to exit.");
        display::display_greeting(GREETING, state.conversation.llm().is_some());

        let mut editor = input::create_editor(&self.command_dispatcher)?;

        while state.should_continue {
            let input = match input::read_input(&mut editor)? {
                Some(input) => input.trim().to_string(),
                None => break,
            };

            if input.is_empty() || self.run_command(&input, &mut state) {
                continue;
            }

            if let Some(replies) = state.conversation.send(&input).await {
                display::display_turn(&replies, state.show_logic);
            }
        }

        input::save_history(&mut editor)?;

        Ok(())
    }

    /// Returns true when `line` was a slash command.
    fn run_command(&self, line: &str, state: &mut ChatState) -> bool {
        match self.command_dispatcher.execute_line(line, state) {
            Some(Ok(Some(output))) => {
                display::display_info(&output);
                true
            }
            Some(Ok(None)) => true,
            Some(Err(e)) => {
                display::display_error(&format!("Error executing command: {}", e));
                true
            }
            None => false,
        }
    }
}

/// Non-empty stdin lines in order, then the query argument.
pub fn collect_turns(piped: Option<&str>, query: Option<&str>) -> Vec<String> {
    piped
        .into_iter()
        .flat_map(str::lines)
        .chain(query)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// The LLM lane for this session. A missing API key is not fatal: the lane
/// answers with a configuration notice instead.
pub fn build_llm(args: &Args, config: &Config) -> Result<Option<LlmBot>, ChatError> {
    if args.rules_only {
        return Ok(None);
    }

    let provider = match &args.provider {
        Some(name) => Provider::from_str(name)
            .ok_or_else(|| ChatError::Config(format!("Unsupported provider: {}", name)))?,
        None => config.active_provider.unwrap_or_default(),
    };

    let mut provider_config = config.provider_config(provider);
    if let Some(model) = &args.model {
        provider_config.model = Some(model.clone());
    }

    match ProviderFactory::new().create(provider, &provider_config, config.request_timeout()) {
        Ok(llm) => {
            tracing::info!("Using {} model {}", llm.name(), llm.model());
            Ok(Some(LlmBot::new(llm)))
        }
        Err(ChatError::Config(msg)) => {
            tracing::warn!("{}", msg);
            Ok(Some(LlmBot::unconfigured(provider.display_name())))
        }
        Err(e) => Err(e),
    }
}
