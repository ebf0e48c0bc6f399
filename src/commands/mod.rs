/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

It exposes three top-level command modules:

- `chat`   — Interactive conversation mode
- `ask`    — Send a single prompt and print the reply
- `models` — Model discovery at the endpoint

These handlers are intentionally small and use the library components:
the generator, the prompt session, and the bundled persona.
*/

use crate::config::Config;
use crate::error::Result;
use crate::generate::create_generator;
use crate::prompts;
use crate::session::PromptSession;

pub mod ask;
pub mod chat;
pub mod models;

/// Build a session for the configured endpoint
///
/// The bundled persona (system instruction plus seed conversation) is
/// attached unless `plain` is set or the config disables it.
pub(crate) fn build_session(config: &Config, plain: bool) -> Result<PromptSession> {
    let generator = create_generator(&config.endpoint)?;

    let (system_instruction, seed_history) = if config.chat.persona && !plain {
        (Some(prompts::system_instruction()), prompts::seed_history())
    } else {
        (None, Vec::new())
    };

    Ok(PromptSession::new(
        generator,
        system_instruction,
        config.generation.clone(),
        seed_history,
    ))
}
