//! EmbeddingStore implementation for PgStorage.

use super::*;

use crate::traits::EmbeddingStore;
use async_trait::async_trait;
use chatio_core::{EmbeddingStats, PendingEmbedding};

#[async_trait]
impl EmbeddingStore for PgStorage {
    async fn embedding_stats(&self) -> Result<EmbeddingStats> {
        let (total, with_embeddings): (i64, i64) =
            sqlx::query_as("SELECT COUNT(*), COUNT(embedding) FROM messages")
                .fetch_one(&self.pool)
                .await?;
        let total = u64::try_from(total).unwrap_or(0);
        let with_embeddings = u64::try_from(with_embeddings).unwrap_or(0);
        Ok(EmbeddingStats {
            total,
            with_embeddings,
            without_embeddings: total.saturating_sub(with_embeddings),
        })
    }

    async fn messages_without_embeddings(&self, limit: usize) -> Result<Vec<PendingEmbedding>> {
        let rows = sqlx::query(
            "SELECT id::text AS id, content
               FROM messages
              WHERE embedding IS NULL
              ORDER BY created_at ASC
              LIMIT $1",
        )
        .bind(usize_to_i64(limit))
        .fetch_all(&self.pool)
        .await?;
        rows.iter()
            .map(|row| -> Result<PendingEmbedding> {
                Ok(PendingEmbedding { id: row.try_get("id")?, content: row.try_get("content")? })
            })
            .collect()
    }

    async fn store_embedding(&self, message_id: &str, embedding: &[f64]) -> Result<()> {
        let result = sqlx::query("UPDATE messages SET embedding = $1::vector WHERE id = $2::uuid")
            .bind(vector_literal(embedding))
            .bind(message_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound { entity: "message", id: message_id.to_owned() });
        }
        Ok(())
    }
}
