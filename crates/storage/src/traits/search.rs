use async_trait::async_trait;
use chatio_core::{Candidate, MessageRecord};

use crate::error::StorageError;

/// A row returned by the database-side similarity function.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedMessage {
    pub message: MessageRecord,
    /// Missing when the function's result set omits the score.
    pub similarity: Option<f64>,
}

/// Message retrieval for semantic search.
#[async_trait]
pub trait MessageSearchStore: Send + Sync {
    /// Whether the `match_messages` function is installed.
    async fn has_match_function(&self) -> Result<bool, StorageError>;

    /// Call `match_messages(query_embedding, match_threshold, match_count)`.
    async fn match_messages(
        &self,
        query: &[f64],
        threshold: f64,
        limit: usize,
    ) -> Result<Vec<MatchedMessage>, StorageError>;

    /// Fetch up to `limit` messages with a non-null embedding, embedding as stored text.
    async fn fetch_embedded_messages(
        &self,
        limit: usize,
    ) -> Result<Vec<Candidate<MessageRecord>>, StorageError>;
}
