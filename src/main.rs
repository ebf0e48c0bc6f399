//! jibu - Conversational CLI
//!
#![doc = "jibu - Conversational CLI for hosted generative-language models"]
#![doc = "Main entry point for the jibu application."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use jibu::cli::{Cli, Commands, ModelCommand};
use jibu::commands;
use jibu::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path)?;

    // Validate configuration
    config.validate()?;

    // Execute command
    match cli.command {
        Commands::Chat { model, plain } => {
            tracing::info!("Starting interactive chat mode");
            if let Some(m) = &model {
                tracing::debug!("Using model override: {}", m);
            }
            commands::chat::run_chat(config, model, plain).await?;
            Ok(())
        }
        Commands::Ask {
            prompt,
            model,
            plain,
            timeout,
        } => {
            tracing::info!("Sending one-shot prompt");
            if let Some(seconds) = timeout {
                tracing::debug!("Using caller-supplied timeout: {}s", seconds);
            }
            commands::ask::run_ask(config, prompt, model, plain, timeout).await?;
            Ok(())
        }
        Commands::Models { command } => match command {
            ModelCommand::List { json } => {
                tracing::info!("Starting model listing command");
                commands::models::list_models(&config, json).await?;
                Ok(())
            }
        },
    }
}

/// Initialize tracing subscriber with environment filter
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "jibu=debug" } else { "jibu=info" };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
