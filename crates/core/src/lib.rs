//! Core types and algorithms for chatio
//!
//! Domain entities shared across crates, plus the two pieces of search logic
//! that run in-process: stored-embedding normalization and cosine ranking.

pub mod constants;
mod conversation;
pub mod embedding;
mod env_config;
mod error;
mod json_utils;
mod message;
pub mod ranking;
mod task;

pub use constants::*;
pub use conversation::*;
pub use embedding::{Embedding, EmbeddingParseError, StoredEmbedding};
pub use env_config::{SearchSettings, env_non_empty, env_parse_with_default};
pub use error::*;
pub use json_utils::{extract_json_object, strip_markdown_json};
pub use message::*;
pub use ranking::{
    Candidate, RankDiagnostics, RankError, RankOutcome, ScoredCandidate, cosine_similarity, rank,
    round_similarity, validate_query,
};
pub use task::*;
