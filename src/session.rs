//! Conversational prompt session
//!
//! This module implements the session that owns a system instruction, an
//! append-only conversation history seeded at construction, and the
//! generation parameters sent with every call. One `send` forwards the
//! full ordered history plus a new user turn to the generator and records
//! the reply.

use crate::error::{GenerationFailure, Result};
use crate::generate::{GenerationConfig, Generator, Role, TokenUsage, Turn};
use std::time::Duration;

/// A caller-owned conversation with a remote text-generation endpoint
///
/// The session holds the ordered history and mutates it only by appending:
/// one user turn and one model turn per successful exchange. Role
/// alternation is the caller's responsibility; the session never reorders
/// or rewrites turns it has recorded.
///
/// Only one call is in flight at a time: `send` borrows the session
/// mutably and suspends the caller until the reply arrives.
///
/// # Examples
///
/// ```no_run
/// use jibu::config::EndpointConfig;
/// use jibu::generate::{create_generator, GenerationConfig, Turn};
/// use jibu::session::PromptSession;
///
/// # async fn example() -> jibu::error::Result<()> {
/// let generator = create_generator(&EndpointConfig::default())?;
/// let mut session = PromptSession::new(
///     generator,
///     Some("You are a concise assistant.".to_string()),
///     GenerationConfig::default(),
///     vec![Turn::user("hello"), Turn::model("Hi, how can I help?")],
/// );
/// let reply = session.send("habari yako").await?;
/// println!("{}", reply);
/// # Ok(())
/// # }
/// ```
pub struct PromptSession {
    generator: Box<dyn Generator>,
    system_instruction: Option<String>,
    history: Vec<Turn>,
    config: GenerationConfig,
    usage: TokenUsage,
}

impl PromptSession {
    /// Construct a session; performs no I/O
    ///
    /// # Arguments
    ///
    /// * `generator` - The endpoint capability used for every call
    /// * `system_instruction` - Optional fixed instruction sent with each request
    /// * `config` - Generation parameters for every call
    /// * `seed_history` - Initial ordered conversation context
    pub fn new(
        generator: Box<dyn Generator>,
        system_instruction: Option<String>,
        config: GenerationConfig,
        seed_history: Vec<Turn>,
    ) -> Self {
        Self {
            generator,
            system_instruction,
            history: seed_history,
            config,
            usage: TokenUsage::default(),
        }
    }

    /// Submit a new user turn and return the model's reply text
    ///
    /// Appends a user turn, issues one remote call carrying the full
    /// ordered history, appends a model turn with the first candidate's
    /// text, and returns that text.
    ///
    /// On failure the appended user turn remains in the history; call
    /// `discard_pending_user_turn` to prune it before retrying with
    /// different input.
    ///
    /// # Errors
    ///
    /// Propagates the generator's `GenerationFailure` unchanged; no retry
    /// is performed.
    pub async fn send(&mut self, user_text: impl Into<String>) -> Result<String> {
        self.history.push(Turn::user(user_text));

        let reply = self
            .generator
            .generate(self.system_instruction.as_deref(), &self.history, &self.config)
            .await?;

        if let Some(usage) = &reply.usage {
            self.usage.add(usage);
        }
        self.history.push(Turn::model(reply.text.clone()));

        tracing::debug!("Exchange recorded, history length {}", self.history.len());
        Ok(reply.text)
    }

    /// Like `send`, but fail the call when the deadline expires
    ///
    /// On expiry the in-flight call is dropped and the history is restored
    /// to its pre-call state: the user turn appended at the start of the
    /// operation is removed before returning `GenerationFailure::Timeout`.
    ///
    /// Any other failure behaves exactly like `send`: the user turn stays.
    pub async fn send_with_timeout(
        &mut self,
        user_text: impl Into<String>,
        timeout: Duration,
    ) -> Result<String> {
        self.history.push(Turn::user(user_text));

        let outcome = tokio::time::timeout(
            timeout,
            self.generator
                .generate(self.system_instruction.as_deref(), &self.history, &self.config),
        )
        .await;

        match outcome {
            Ok(result) => {
                let reply = result?;
                if let Some(usage) = &reply.usage {
                    self.usage.add(usage);
                }
                self.history.push(Turn::model(reply.text.clone()));
                Ok(reply.text)
            }
            Err(_) => {
                self.history.pop();
                tracing::warn!("Generation call timed out after {:?}", timeout);
                Err(GenerationFailure::Timeout(timeout).into())
            }
        }
    }

    /// Remove the trailing user turn left behind by a failed `send`
    ///
    /// Returns the pruned turn, or None when the history does not end in a
    /// user turn (nothing is removed in that case).
    pub fn discard_pending_user_turn(&mut self) -> Option<Turn> {
        if self.history.last().map(|turn| turn.role) == Some(Role::User) {
            self.history.pop()
        } else {
            None
        }
    }

    /// The ordered conversation history
    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    /// Number of turns recorded so far
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// Returns true if the history holds no turns
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// The fixed system instruction, if one was supplied
    pub fn system_instruction(&self) -> Option<&str> {
        self.system_instruction.as_deref()
    }

    /// Token usage accumulated across every successful call
    pub fn usage(&self) -> TokenUsage {
        self.usage
    }
}
