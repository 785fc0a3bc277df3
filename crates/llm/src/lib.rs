//! LLM client for search result enhancement
//!
//! Talks to an OpenAI-compatible chat-completions endpoint. The only
//! consumer-facing capability is [`SearchEnhancer`].

mod ai_types;
mod client;
mod enhance;
pub mod error;
#[cfg(test)]
mod retry_tests;

pub use client::{DEFAULT_BASE_URL, DEFAULT_MODEL, LlmClient, truncate};
pub use enhance::{Enhancement, SearchEnhancer, reorder_hits};
pub use error::LlmError;
