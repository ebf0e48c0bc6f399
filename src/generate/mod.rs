//! Generation module for jibu
//!
//! This module contains the generator abstraction over remote
//! text-generation endpoints and the Gemini wire-format implementation.

pub mod base;
pub mod gemini;

pub use base::{
    GenerationConfig, GenerationReply, Generator, ModelInfo, ResponseFormat, Role, TokenUsage,
    Turn,
};
pub use gemini::GeminiGenerator;

use crate::config::EndpointConfig;
use crate::error::Result;

/// Create a boxed generator for the configured endpoint
///
/// # Arguments
///
/// * `config` - Endpoint configuration (model, key, base URL, timeout)
///
/// # Errors
///
/// Returns error if generator initialization fails
pub fn create_generator(config: &EndpointConfig) -> Result<Box<dyn Generator>> {
    Ok(Box::new(GeminiGenerator::new(config.clone())?))
}
