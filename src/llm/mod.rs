//! LLM integration module.
//!
//! Provides an OpenAI-compatible client and the prompt text used by the
//! ToC repair pass.

mod client;
mod prompts;

pub use client::{LlmClient, Message, Role};
pub use prompts::Prompts;
