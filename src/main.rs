// Coach - Personal financial coaching service
// Main entry point

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use coach::coach::{prompt, validate_snapshot, FinancialContext, UserBehavior};
use coach::config::{constants::DEFAULT_LOG_FILTER, load_config};
use coach::providers::create_provider;
use coach::server::CoachServer;

/// Financial coaching over HTTP, backed by an OpenAI-compatible model
#[derive(Parser)]
#[command(name = "coach", about, version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve {
        /// Config file (default: ./coach.toml, then ~/.coach/config.toml)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Bind address, overrides the config file
        #[arg(long)]
        bind: Option<String>,
    },
    /// Print the prompt a snapshot would produce, without calling the provider
    Prompt {
        /// JSON file holding a user snapshot
        #[arg(long)]
        input: PathBuf,
        /// Question to ask
        #[arg(long)]
        question: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command.unwrap_or(Command::Serve {
        config: None,
        bind: None,
    }) {
        Command::Serve { config, bind } => run_server(config, bind).await,
        Command::Prompt { input, question } => print_prompt(&input, &question),
    }
}

async fn run_server(config_path: Option<PathBuf>, bind: Option<String>) -> Result<()> {
    let mut config = load_config(config_path.as_deref())?;
    if let Some(bind) = bind {
        config.server.bind_address = bind;
    }

    let provider = create_provider(&config.provider).context("Failed to create provider")?;
    tracing::info!(
        provider = %config.provider.display_name(),
        model = provider.default_model(),
        "Provider ready"
    );

    let server = CoachServer::new(&config, Arc::from(provider))?;
    server.serve().await
}

fn print_prompt(input: &std::path::Path, question: &str) -> Result<()> {
    let raw = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let user: UserBehavior = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a valid user snapshot", input.display()))?;
    validate_snapshot(&user)?;

    let context = FinancialContext::from_behavior(&user);
    println!("{}", prompt::advice_prompt(&context, question));
    Ok(())
}
