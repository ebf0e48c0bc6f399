//! jibu - Conversational CLI library
//!
//! This library provides the core functionality for the jibu CLI: a
//! caller-owned prompt session over a hosted text-generation endpoint,
//! plus configuration, error types, and the bundled assistant persona.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `session`: the conversational prompt session (append-only history)
//! - `generate`: generator abstraction and the Gemini wire client
//! - `prompts`: the bundled multilingual assistant persona
//! - `config`: configuration management and validation
//! - `error`: error types and result aliases
//! - `cli`: command-line interface definition
//! - `commands`: handlers behind the CLI subcommands
//!
//! # Example
//!
//! ```no_run
//! use jibu::{Config, PromptSession};
//! use jibu::generate::create_generator;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config/config.yaml")?;
//!     config.validate()?;
//!
//!     let generator = create_generator(&config.endpoint)?;
//!     let mut session =
//!         PromptSession::new(generator, None, config.generation.clone(), Vec::new());
//!     let reply = session.send("habari yako").await?;
//!     println!("{}", reply);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod generate;
pub mod prompts;
pub mod session;

// Re-export commonly used types
pub use config::Config;
pub use error::{GenerationFailure, JibuError, Result};
pub use generate::{GenerationConfig, Generator, ResponseFormat, Role, TokenUsage, Turn};
pub use session::PromptSession;
