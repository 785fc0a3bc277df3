//! Embedding generation for semantic search
//!
//! Query and message texts are embedded by a remote OpenAI-compatible
//! endpoint. Callers depend on [`EmbeddingProvider`] so tests can swap in
//! deterministic fakes.

mod client;
mod error;
mod provider;

pub use client::{DEFAULT_BASE_URL, DEFAULT_MODEL, EmbeddingConfig, HttpEmbeddingClient};
pub use error::EmbeddingError;
pub use provider::EmbeddingProvider;
