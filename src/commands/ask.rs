//! One-shot prompt handler
//!
//! Builds a session, sends a single prompt, and prints the reply to
//! stdout. Failures abort the run and surface to the caller unchanged.

use crate::config::Config;
use crate::error::Result;
use std::time::Duration;

/// Send one prompt and print the reply
///
/// # Arguments
///
/// * `config` - Global configuration (consumed)
/// * `prompt` - The user text to send
/// * `model` - Optional override for the configured model
/// * `plain` - If true, send without the bundled persona
/// * `timeout` - Optional deadline in seconds for the call
///
/// # Errors
///
/// Propagates the generation failure; nothing is printed on error.
pub async fn run_ask(
    mut config: Config,
    prompt: String,
    model: Option<String>,
    plain: bool,
    timeout: Option<u64>,
) -> Result<()> {
    if let Some(model) = model {
        config.endpoint.model = model;
    }

    let mut session = super::build_session(&config, plain)?;

    let reply = match timeout {
        Some(seconds) => {
            session
                .send_with_timeout(prompt, Duration::from_secs(seconds))
                .await?
        }
        None => session.send(prompt).await?,
    };

    println!("{}", reply);
    Ok(())
}
