//! Generator trait and common types for jibu
//!
//! This module defines the Generator trait that text-generation endpoints
//! implement, along with the conversation turn types and generation
//! parameters shared by the session layer and the wire client.

use crate::error::{JibuError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Speaker role for a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The human side of the conversation
    User,
    /// The generated side of the conversation
    Model,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Model => write!(f, "model"),
        }
    }
}

/// One message in a conversation, tagged with its speaker role
///
/// Turns are immutable once created; a conversation history only ever
/// grows by appending new turns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    /// Who produced this turn
    pub role: Role,
    /// The text content of the turn
    pub text: String,
}

impl Turn {
    /// Creates a new user turn
    ///
    /// # Examples
    ///
    /// ```
    /// use jibu::generate::{Role, Turn};
    ///
    /// let turn = Turn::user("habari yako");
    /// assert_eq!(turn.role, Role::User);
    /// ```
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    /// Creates a new model turn
    ///
    /// # Examples
    ///
    /// ```
    /// use jibu::generate::{Role, Turn};
    ///
    /// let turn = Turn::model("Good, thank you!");
    /// assert_eq!(turn.role, Role::Model);
    /// ```
    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            text: text.into(),
        }
    }
}

/// Output format requested from the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseFormat {
    /// Unstructured text (the wire `text/plain`)
    #[default]
    PlainText,
    /// JSON output mode (the wire `application/json`)
    Json,
}

impl ResponseFormat {
    /// The MIME type this format maps to on the wire
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::PlainText => "text/plain",
            Self::Json => "application/json",
        }
    }
}

fn default_temperature() -> f32 {
    0.9
}

fn default_top_p() -> f32 {
    1.0
}

fn default_max_output_tokens() -> u32 {
    2048
}

/// Generation parameters carried with every request
///
/// Ranges are enforced by `Config::validate`, not here: temperature and
/// top_p in [0, 1], max_output_tokens strictly positive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Nucleus sampling cutoff
    #[serde(default = "default_top_p")]
    pub top_p: f32,

    /// Upper bound on generated tokens
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    /// Requested output format
    #[serde(default)]
    pub response_format: ResponseFormat,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            top_p: default_top_p(),
            max_output_tokens: default_max_output_tokens(),
            response_format: ResponseFormat::default(),
        }
    }
}

/// Token usage reported by the service for one call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Tokens consumed by the prompt (history plus new turn)
    pub prompt_tokens: u32,
    /// Tokens in the returned candidate
    pub candidate_tokens: u32,
    /// Total tokens billed for the call
    pub total_tokens: u32,
}

impl TokenUsage {
    /// Create a new TokenUsage instance
    ///
    /// # Examples
    ///
    /// ```
    /// use jibu::generate::TokenUsage;
    ///
    /// let usage = TokenUsage::new(100, 50);
    /// assert_eq!(usage.total_tokens, 150);
    /// ```
    pub fn new(prompt_tokens: u32, candidate_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            candidate_tokens,
            total_tokens: prompt_tokens + candidate_tokens,
        }
    }

    /// Accumulate another call's usage into this one
    pub fn add(&mut self, other: &TokenUsage) {
        self.prompt_tokens += other.prompt_tokens;
        self.candidate_tokens += other.candidate_tokens;
        self.total_tokens += other.total_tokens;
    }
}

/// Reply from a single generation call
///
/// Carries the first candidate's text and, when the service reports it,
/// the token usage for the call.
#[derive(Debug, Clone)]
pub struct GenerationReply {
    /// The first text part of the first candidate
    pub text: String,
    /// Token usage, if the service reported it
    pub usage: Option<TokenUsage>,
}

/// Metadata about a model available at the endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Model resource name (e.g. "models/gemini-1.0-pro")
    pub name: String,
    /// Display name for user-friendly presentation
    pub display_name: String,
    /// Maximum prompt tokens the model accepts
    pub input_token_limit: u32,
    /// Maximum tokens the model will generate
    pub output_token_limit: u32,
}

/// Generator trait for text-generation endpoints
///
/// The session layer treats the remote service as an opaque capability:
/// hand over the full ordered history plus the generation parameters,
/// receive the first textual candidate or a `GenerationFailure`.
///
/// # Examples
///
/// ```no_run
/// use jibu::generate::{GenerationConfig, GenerationReply, Generator, Turn};
/// use jibu::error::Result;
/// use async_trait::async_trait;
///
/// struct MyGenerator;
///
/// #[async_trait]
/// impl Generator for MyGenerator {
///     async fn generate(
///         &self,
///         _system_instruction: Option<&str>,
///         _history: &[Turn],
///         _config: &GenerationConfig,
///     ) -> Result<GenerationReply> {
///         Ok(GenerationReply {
///             text: "Response".to_string(),
///             usage: None,
///         })
///     }
/// }
/// ```
#[async_trait]
pub trait Generator: Send + Sync {
    /// Issue a single generation call
    ///
    /// # Arguments
    ///
    /// * `system_instruction` - Optional fixed instruction sent alongside the history
    /// * `history` - Full ordered conversation, ending with the new user turn
    /// * `config` - Generation parameters for this call
    ///
    /// # Errors
    ///
    /// Returns a `GenerationFailure` describing the failure kind; no retry
    /// is performed at this layer.
    async fn generate(
        &self,
        system_instruction: Option<&str>,
        history: &[Turn],
        config: &GenerationConfig,
    ) -> Result<GenerationReply>;

    /// List models available at this endpoint
    ///
    /// # Errors
    ///
    /// The default implementation reports that model listing is not
    /// supported by this generator.
    async fn list_models(&self) -> Result<Vec<ModelInfo>> {
        Err(JibuError::Endpoint(
            "Model listing is not supported by this generator".to_string(),
        )
        .into())
    }
}
