//! Bundled prompt content for jibu
//!
//! This module packages the default assistant persona: the fixed system
//! instruction and the seed conversation that chat sessions start from
//! unless the caller asks for a plain session.

pub mod assistant;

pub use assistant::{seed_history, system_instruction, ASSISTANT_NAME};
