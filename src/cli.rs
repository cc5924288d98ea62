use clap::Parser;
use std::path::PathBuf;

/// Compare a rule-based chatbot with a large language model, side by side.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Message to send to both bots
    pub query: Option<String>,

    /// Start an interactive chat session
    #[arg(short, long)]
    pub chat: bool,

    /// LLM provider to use [possible values: gemini, openai]
    #[arg(short, long)]
    pub provider: Option<String>,

    /// Model to use (provider-specific)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Only run the rule-based bot
    #[arg(long)]
    pub rules_only: bool,

    /// Hide the logic explanation under each reply
    #[arg(long)]
    pub no_logic: bool,

    /// Path to the config file (default: ~/.chatlogic/config.yaml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
