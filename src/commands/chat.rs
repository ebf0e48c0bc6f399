//! Interactive chat mode handler
//!
//! Builds a prompt session from the configuration and runs a
//! readline-based loop that submits user input and prints replies.
//! A failed exchange is surfaced and its pending user turn is pruned so
//! the next input starts from the last good state.

use crate::config::Config;
use crate::error::Result;
use crate::generate::Role;

use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// Start interactive chat mode
///
/// # Arguments
///
/// * `config` - Global configuration (consumed)
/// * `model` - Optional override for the configured model
/// * `plain` - If true, start without the bundled persona
///
/// # Errors
///
/// Returns error if session construction or the readline editor fails;
/// generation failures are reported inside the loop and do not end it.
pub async fn run_chat(mut config: Config, model: Option<String>, plain: bool) -> Result<()> {
    if let Some(model) = model {
        config.endpoint.model = model;
    }

    let mut session = super::build_session(&config, plain)?;
    let mut rl = DefaultEditor::new()?;

    print_welcome_banner(&config.endpoint.model, session.system_instruction().is_some());

    loop {
        match rl.readline("you> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }

                rl.add_history_entry(trimmed)?;

                match trimmed {
                    "exit" | "quit" | "/quit" => break,
                    "/help" => {
                        print_help();
                        continue;
                    }
                    "/history" => {
                        print_history(session.history());
                        continue;
                    }
                    "/usage" => {
                        let usage = session.usage();
                        println!(
                            "Tokens: {} prompt, {} reply, {} total\n",
                            usage.prompt_tokens, usage.candidate_tokens, usage.total_tokens
                        );
                        continue;
                    }
                    _ => {}
                }

                match session.send(trimmed).await {
                    Ok(reply) => {
                        println!("{} {}\n", "jibu>".cyan().bold(), reply);
                    }
                    Err(e) => {
                        println!("{} {}", "error:".red().bold(), e);
                        if session.discard_pending_user_turn().is_some() {
                            println!("{}\n", "Input dropped from history; try again.".yellow());
                        }
                    }
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                tracing::error!("Readline error: {}", e);
                return Err(e.into());
            }
        }
    }

    println!("Kwaheri!");
    Ok(())
}

/// Display the welcome banner with model and persona status
fn print_welcome_banner(model: &str, persona: bool) {
    println!("{}", "jibu interactive chat".bold());
    println!("Model: {}", model.cyan());
    if persona {
        println!("Persona: {}", crate::prompts::ASSISTANT_NAME.green());
    } else {
        println!("Persona: {}", "none".yellow());
    }
    println!("Type /help for commands, exit to leave.\n");
}

/// Display available special commands
fn print_help() {
    println!("Commands:");
    println!("  /help     Show this help");
    println!("  /history  Show the conversation so far");
    println!("  /usage    Show accumulated token usage");
    println!("  exit      Leave the chat (also: quit, /quit)\n");
}

/// Display the conversation history
fn print_history(history: &[crate::generate::Turn]) {
    if history.is_empty() {
        println!("(no turns yet)\n");
        return;
    }

    for turn in history {
        let tag = match turn.role {
            Role::User => "user ".blue(),
            Role::Model => "model".magenta(),
        };
        println!("{} {}", tag, turn.text);
    }
    println!();
}
