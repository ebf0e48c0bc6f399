//! Configuration management for jibu
//!
//! This module handles loading, parsing, and validating configuration
//! from a YAML file with environment variable overrides.

use crate::error::{JibuError, Result};
use crate::generate::GenerationConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

/// Main configuration structure for jibu
///
/// Holds the endpoint settings, the generation parameters sent with every
/// call, and chat-session behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Remote endpoint configuration
    #[serde(default)]
    pub endpoint: EndpointConfig,

    /// Generation parameters
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Chat session settings
    #[serde(default)]
    pub chat: ChatConfig,
}

/// Remote endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Optional API base URL override (useful for tests and local mocks)
    ///
    /// When set, this base is used to build the `generateContent` and
    /// `models` endpoints, which allows tests to point the generator at a
    /// mock server.
    #[serde(default)]
    pub api_base: Option<String>,

    /// Model identifier to generate with
    #[serde(default = "default_model")]
    pub model: String,

    /// API key for the endpoint
    ///
    /// Usually supplied through the GEMINI_API_KEY environment variable
    /// rather than the config file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// HTTP client timeout (seconds)
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_model() -> String {
    "gemini-1.0-pro".to_string()
}

fn default_timeout_seconds() -> u64 {
    120
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            api_base: None,
            model: default_model(),
            api_key: None,
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

/// Chat session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Start chat sessions with the bundled assistant persona and its
    /// seed conversation
    #[serde(default = "default_persona")]
    pub persona: bool,
}

fn default_persona() -> bool {
    true
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            persona: default_persona(),
        }
    }
}

impl Config {
    /// Load configuration from file with environment overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    ///
    /// # Returns
    ///
    /// Returns the loaded and merged configuration
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| JibuError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| JibuError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(api_base) = std::env::var("JIBU_API_BASE") {
            self.endpoint.api_base = Some(api_base);
        }

        if let Ok(model) = std::env::var("JIBU_MODEL") {
            self.endpoint.model = model;
        }

        if let Ok(api_key) = std::env::var("GEMINI_API_KEY") {
            self.endpoint.api_key = Some(api_key);
        }

        if let Ok(timeout) = std::env::var("JIBU_TIMEOUT_SECONDS") {
            if let Ok(value) = timeout.parse() {
                self.endpoint.timeout_seconds = value;
            } else {
                tracing::warn!("Invalid JIBU_TIMEOUT_SECONDS: {}", timeout);
            }
        }
    }

    /// Validate the configuration
    ///
    /// Enforces the generation parameter ranges (temperature and top_p in
    /// [0, 1], max_output_tokens strictly positive), a non-empty model id,
    /// a present API key, and a well-formed api_base when one is set.
    ///
    /// # Errors
    ///
    /// Returns a `Config` error describing the first violation found
    pub fn validate(&self) -> Result<()> {
        if self.endpoint.model.is_empty() {
            return Err(JibuError::Config("endpoint.model must not be empty".to_string()).into());
        }

        if self.endpoint.api_key.as_deref().unwrap_or("").is_empty() {
            return Err(JibuError::Config(
                "API key missing; set endpoint.api_key or the GEMINI_API_KEY environment variable"
                    .to_string(),
            )
            .into());
        }

        if self.endpoint.timeout_seconds == 0 {
            return Err(
                JibuError::Config("endpoint.timeout_seconds must be positive".to_string()).into(),
            );
        }

        if let Some(api_base) = &self.endpoint.api_base {
            let url = Url::parse(api_base)
                .map_err(|e| JibuError::Config(format!("Invalid endpoint.api_base: {}", e)))?;
            if url.scheme() != "http" && url.scheme() != "https" {
                return Err(JibuError::Config(format!(
                    "endpoint.api_base must be http or https, got {}",
                    url.scheme()
                ))
                .into());
            }
        }

        if !(0.0..=1.0).contains(&self.generation.temperature) {
            return Err(JibuError::Config(format!(
                "generation.temperature must be in [0, 1], got {}",
                self.generation.temperature
            ))
            .into());
        }

        if !(0.0..=1.0).contains(&self.generation.top_p) {
            return Err(JibuError::Config(format!(
                "generation.top_p must be in [0, 1], got {}",
                self.generation.top_p
            ))
            .into());
        }

        if self.generation.max_output_tokens == 0 {
            return Err(JibuError::Config(
                "generation.max_output_tokens must be positive".to_string(),
            )
            .into());
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: EndpointConfig::default(),
            generation: GenerationConfig::default(),
            chat: ChatConfig::default(),
        }
    }
}
