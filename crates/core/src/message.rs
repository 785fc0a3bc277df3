//! Message projections used by search and embedding backfill.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ranking::ScoredCandidate;

/// The search-visible projection of a chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    pub id: String,
    pub conversation_id: String,
    pub author_id: String,
    pub content: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A message returned by semantic search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(flatten)]
    pub message: MessageRecord,
    /// Cosine similarity rounded to four decimals.
    pub similarity: f64,
}

impl SearchHit {
    #[must_use]
    pub fn new(message: MessageRecord, similarity: f64) -> Self {
        Self { message, similarity }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.message.id
    }
}

impl From<ScoredCandidate<MessageRecord>> for SearchHit {
    fn from(scored: ScoredCandidate<MessageRecord>) -> Self {
        Self { message: scored.item, similarity: scored.similarity }
    }
}

/// A message that still needs an embedding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingEmbedding {
    pub id: String,
    pub content: String,
}

/// Embedding coverage over the `messages` table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddingStats {
    pub total: u64,
    pub with_embeddings: u64,
    pub without_embeddings: u64,
}
