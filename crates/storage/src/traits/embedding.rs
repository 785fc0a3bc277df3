use async_trait::async_trait;
use chatio_core::{EmbeddingStats, PendingEmbedding};

use crate::error::StorageError;

/// Embedding coverage and backfill operations.
#[async_trait]
pub trait EmbeddingStore: Send + Sync {
    /// Count messages with and without embeddings.
    async fn embedding_stats(&self) -> Result<EmbeddingStats, StorageError>;

    /// Oldest messages that have no embedding yet.
    async fn messages_without_embeddings(
        &self,
        limit: usize,
    ) -> Result<Vec<PendingEmbedding>, StorageError>;

    /// Store an embedding vector for a message.
    async fn store_embedding(&self, message_id: &str, embedding: &[f64])
    -> Result<(), StorageError>;
}
