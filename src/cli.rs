//! Command-line interface definition for jibu
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for interactive chat, one-shot prompts, and model
//! discovery.

use clap::{Parser, Subcommand};

/// jibu - Conversational CLI for hosted generative-language models
///
/// Hold a conversation with a remote text-generation endpoint, either
/// interactively or one prompt at a time.
#[derive(Parser, Debug, Clone)]
#[command(name = "jibu")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for jibu
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start an interactive conversation
    Chat {
        /// Override the model from config
        #[arg(short, long)]
        model: Option<String>,

        /// Start with an empty history instead of the bundled persona
        #[arg(long)]
        plain: bool,
    },

    /// Send a single prompt and print the reply
    Ask {
        /// The prompt to send
        #[arg(short, long)]
        prompt: String,

        /// Override the model from config
        #[arg(short, long)]
        model: Option<String>,

        /// Start with an empty history instead of the bundled persona
        #[arg(long)]
        plain: bool,

        /// Fail the call if no reply arrives within this many seconds
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// Inspect models at the endpoint
    Models {
        /// Model subcommand
        #[command(subcommand)]
        command: ModelCommand,
    },
}

/// Model discovery subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ModelCommand {
    /// List models available at the endpoint
    List {
        /// Output as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_chat_command() {
        let cli = Cli::try_parse_from(["jibu", "chat"]);
        assert!(cli.is_ok());
        let cli = cli.unwrap();
        assert!(matches!(cli.command, Commands::Chat { .. }));
    }

    #[test]
    fn test_cli_parse_chat_with_model() {
        let cli = Cli::try_parse_from(["jibu", "chat", "--model", "gemini-1.5-flash"]);
        assert!(cli.is_ok());
        let cli = cli.unwrap();
        if let Commands::Chat { model, plain } = cli.command {
            assert_eq!(model, Some("gemini-1.5-flash".to_string()));
            assert!(!plain);
        } else {
            panic!("Expected Chat command");
        }
    }

    #[test]
    fn test_cli_parse_chat_plain() {
        let cli = Cli::try_parse_from(["jibu", "chat", "--plain"]);
        assert!(cli.is_ok());
        let cli = cli.unwrap();
        if let Commands::Chat { model, plain } = cli.command {
            assert_eq!(model, None);
            assert!(plain);
        } else {
            panic!("Expected Chat command");
        }
    }

    #[test]
    fn test_cli_parse_ask() {
        let cli = Cli::try_parse_from(["jibu", "ask", "--prompt", "habari yako"]);
        assert!(cli.is_ok());
        let cli = cli.unwrap();
        if let Commands::Ask {
            prompt,
            model,
            plain,
            timeout,
        } = cli.command
        {
            assert_eq!(prompt, "habari yako");
            assert_eq!(model, None);
            assert!(!plain);
            assert_eq!(timeout, None);
        } else {
            panic!("Expected Ask command");
        }
    }

    #[test]
    fn test_cli_parse_ask_with_timeout() {
        let cli = Cli::try_parse_from(["jibu", "ask", "--prompt", "hi", "--timeout", "10"]);
        assert!(cli.is_ok());
        let cli = cli.unwrap();
        if let Commands::Ask { timeout, .. } = cli.command {
            assert_eq!(timeout, Some(10));
        } else {
            panic!("Expected Ask command");
        }
    }

    #[test]
    fn test_cli_parse_ask_requires_prompt() {
        let cli = Cli::try_parse_from(["jibu", "ask"]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_cli_parse_models_list() {
        let cli = Cli::try_parse_from(["jibu", "models", "list"]);
        assert!(cli.is_ok());
        let cli = cli.unwrap();
        if let Commands::Models { command } = cli.command {
            assert!(matches!(command, ModelCommand::List { json: false }));
        } else {
            panic!("Expected Models command");
        }
    }

    #[test]
    fn test_cli_parse_models_list_json() {
        let cli = Cli::try_parse_from(["jibu", "models", "list", "--json"]);
        assert!(cli.is_ok());
        let cli = cli.unwrap();
        if let Commands::Models { command } = cli.command {
            assert!(matches!(command, ModelCommand::List { json: true }));
        } else {
            panic!("Expected Models command");
        }
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::try_parse_from(["jibu", "--config", "custom.yaml", "chat"]);
        assert!(cli.is_ok());
        let cli = cli.unwrap();
        assert_eq!(cli.config, Some("custom.yaml".to_string()));
    }

    #[test]
    fn test_cli_parse_with_verbose() {
        let cli = Cli::try_parse_from(["jibu", "-v", "chat"]);
        assert!(cli.is_ok());
        assert!(cli.unwrap().verbose);
    }

    #[test]
    fn test_cli_parse_missing_command() {
        let cli = Cli::try_parse_from(["jibu"]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_cli_parse_invalid_command() {
        let cli = Cli::try_parse_from(["jibu", "invalid"]);
        assert!(cli.is_err());
    }
}
