//! Gemini generator implementation for jibu
//!
//! This module implements the Generator trait for the Google
//! generative-language API, issuing `generateContent` calls over HTTPS
//! and mapping the candidate/part response shape back into crate types.
//! Includes model listing via the `models` collection endpoint.

use crate::config::EndpointConfig;
use crate::error::{GenerationFailure, JibuError, Result};
use crate::generate::{GenerationConfig, GenerationReply, Generator, ModelInfo, TokenUsage, Turn};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default API base when the config does not override it
const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";

/// Generative-language API client
///
/// Connects to a hosted generateContent endpoint. The API base is
/// overridable through `EndpointConfig::api_base`, which allows tests to
/// point the generator at a mock server.
///
/// # Examples
///
/// ```no_run
/// use jibu::config::EndpointConfig;
/// use jibu::generate::{GeminiGenerator, GenerationConfig, Generator, Turn};
///
/// # async fn example() -> jibu::error::Result<()> {
/// let config = EndpointConfig {
///     model: "gemini-1.0-pro".to_string(),
///     api_key: Some("my-key".to_string()),
///     ..Default::default()
/// };
/// let generator = GeminiGenerator::new(config)?;
/// let history = vec![Turn::user("Hello!")];
/// let reply = generator
///     .generate(None, &history, &GenerationConfig::default())
///     .await?;
/// println!("{}", reply.text);
/// # Ok(())
/// # }
/// ```
pub struct GeminiGenerator {
    client: Client,
    config: EndpointConfig,
}

/// Request body for generateContent
#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<WireContent>,
    #[serde(rename = "systemInstruction", skip_serializing_if = "Option::is_none")]
    system_instruction: Option<WireContent>,
    #[serde(rename = "generationConfig")]
    generation_config: WireGenerationConfig,
}

/// One content entry on the wire: a role plus ordered text parts
#[derive(Debug, Serialize, Deserialize)]
struct WireContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<WirePart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WirePart {
    #[serde(default)]
    text: String,
}

/// Generation parameters in wire casing
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireGenerationConfig {
    temperature: f32,
    top_p: f32,
    max_output_tokens: u32,
    response_mime_type: String,
}

/// Response body from generateContent
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<WireCandidate>,
    #[serde(rename = "usageMetadata", default)]
    usage_metadata: Option<WireUsageMetadata>,
}

#[derive(Debug, Deserialize)]
struct WireCandidate {
    #[serde(default)]
    content: Option<WireContent>,
    #[serde(rename = "finishReason", default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireUsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
    #[serde(default)]
    total_token_count: u32,
}

/// Response body from the models collection endpoint
#[derive(Debug, Deserialize)]
struct ListModelsResponse {
    #[serde(default)]
    models: Vec<WireModel>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireModel {
    name: String,
    #[serde(default)]
    display_name: String,
    #[serde(default)]
    input_token_limit: u32,
    #[serde(default)]
    output_token_limit: u32,
}

impl GeminiGenerator {
    /// Create a new generator instance
    ///
    /// # Arguments
    ///
    /// * `config` - Endpoint configuration containing model, key, and base URL
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails
    ///
    /// # Examples
    ///
    /// ```
    /// use jibu::config::EndpointConfig;
    /// use jibu::generate::GeminiGenerator;
    ///
    /// let config = EndpointConfig {
    ///     model: "gemini-1.0-pro".to_string(),
    ///     ..Default::default()
    /// };
    /// let generator = GeminiGenerator::new(config);
    /// assert!(generator.is_ok());
    /// ```
    pub fn new(config: EndpointConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent("jibu/0.1.0")
            .build()
            .map_err(|e| JibuError::Endpoint(format!("Failed to create HTTP client: {}", e)))?;

        tracing::info!(
            "Initialized generator: base={}, model={}",
            config.api_base.as_deref().unwrap_or(DEFAULT_API_BASE),
            config.model
        );

        Ok(Self { client, config })
    }

    /// The configured model identifier
    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn api_base(&self) -> &str {
        self.config.api_base.as_deref().unwrap_or(DEFAULT_API_BASE)
    }

    fn api_key(&self) -> &str {
        self.config.api_key.as_deref().unwrap_or_default()
    }

    /// Convert crate turns to wire contents
    fn convert_history(history: &[Turn]) -> Vec<WireContent> {
        history
            .iter()
            .map(|turn| WireContent {
                role: Some(turn.role.to_string()),
                parts: vec![WirePart {
                    text: turn.text.clone(),
                }],
            })
            .collect()
    }

    /// Extract the first candidate's first text part
    fn convert_reply(response: GenerateContentResponse) -> Result<GenerationReply> {
        let usage = response.usage_metadata.map(|u| TokenUsage {
            prompt_tokens: u.prompt_token_count,
            candidate_tokens: u.candidates_token_count,
            total_tokens: u.total_token_count,
        });

        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or(GenerationFailure::EmptyResponse)?;

        if let Some(reason) = &candidate.finish_reason {
            tracing::debug!("Candidate finish reason: {}", reason);
        }

        let text = candidate
            .content
            .and_then(|content| content.parts.into_iter().next())
            .map(|part| part.text)
            .filter(|text| !text.is_empty())
            .ok_or(GenerationFailure::EmptyResponse)?;

        Ok(GenerationReply { text, usage })
    }

    /// Map a non-success status to the matching failure kind
    fn status_failure(status: reqwest::StatusCode, body: String) -> GenerationFailure {
        match status.as_u16() {
            401 | 403 => GenerationFailure::AuthFailure(format!("{}: {}", status, body)),
            429 => GenerationFailure::QuotaExceeded(format!("{}: {}", status, body)),
            _ => GenerationFailure::Network(format!("service returned {}: {}", status, body)),
        }
    }
}

#[async_trait]
impl Generator for GeminiGenerator {
    async fn generate(
        &self,
        system_instruction: Option<&str>,
        history: &[Turn],
        config: &GenerationConfig,
    ) -> Result<GenerationReply> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base(),
            self.config.model
        );

        let request = GenerateContentRequest {
            contents: Self::convert_history(history),
            system_instruction: system_instruction.map(|text| WireContent {
                role: None,
                parts: vec![WirePart {
                    text: text.to_string(),
                }],
            }),
            generation_config: WireGenerationConfig {
                temperature: config.temperature,
                top_p: config.top_p,
                max_output_tokens: config.max_output_tokens,
                response_mime_type: config.response_format.mime_type().to_string(),
            },
        };

        tracing::debug!(
            "Sending generate request: model={}, {} turns",
            self.config.model,
            history.len()
        );

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key())])
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Generate request failed: {}", e);
                GenerationFailure::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Service returned error {}: {}", status, body);
            return Err(Self::status_failure(status, body).into());
        }

        let body: GenerateContentResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to decode generate response: {}", e);
            GenerationFailure::MalformedResponse(e.to_string())
        })?;

        let reply = Self::convert_reply(body)?;

        tracing::debug!(
            "Received reply: {} chars, usage={:?}",
            reply.text.len(),
            reply.usage
        );

        Ok(reply)
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>> {
        let url = format!("{}/v1beta/models", self.api_base());
        tracing::debug!("Listing models from {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[("key", self.api_key())])
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Model listing request failed: {}", e);
                GenerationFailure::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Service returned error {}: {}", status, body);
            return Err(Self::status_failure(status, body).into());
        }

        let body: ListModelsResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to decode models response: {}", e);
            GenerationFailure::MalformedResponse(e.to_string())
        })?;

        let models = body
            .models
            .into_iter()
            .map(|m| ModelInfo {
                display_name: if m.display_name.is_empty() {
                    m.name.clone()
                } else {
                    m.display_name
                },
                name: m.name,
                input_token_limit: m.input_token_limit,
                output_token_limit: m.output_token_limit,
            })
            .collect::<Vec<_>>();

        tracing::debug!("Fetched {} models", models.len());
        Ok(models)
    }
}
