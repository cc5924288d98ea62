use chatlogic::app::Application;
use chatlogic::cli::Args;
use chatlogic::commands::create_command_registry;
use chatlogic::config::Config;
use chatlogic::core::error::ChatError;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

fn init_logging(verbose: u8) {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

async fn run(args: Args) -> Result<(), ChatError> {
    let config = Config::load(args.config.as_deref())?;
    let dispatcher = create_command_registry(Config::history_dir());

    let mut app = Application::new(args, config, dispatcher);
    app.run().await
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    tracing::debug!("Parsed CLI arguments: {:?}", args);

    if let Err(e) = run(args).await {
        tracing::error!("Run failed: {:?}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
