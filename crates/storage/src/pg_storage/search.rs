//! MessageSearchStore implementation for PgStorage.

use super::*;

use crate::traits::{MatchedMessage, MessageSearchStore};
use async_trait::async_trait;
use chatio_core::{Candidate, MATCH_MESSAGES_FUNCTION, StoredEmbedding};

#[async_trait]
impl MessageSearchStore for PgStorage {
    async fn has_match_function(&self) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM pg_proc WHERE proname = $1)")
                .bind(MATCH_MESSAGES_FUNCTION)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn match_messages(
        &self,
        query: &[f64],
        threshold: f64,
        limit: usize,
    ) -> Result<Vec<MatchedMessage>> {
        let sql = format!(
            "SELECT {MESSAGE_COLUMNS}, similarity::float8 AS similarity
               FROM {MATCH_MESSAGES_FUNCTION}($1::vector, $2, $3::int)"
        );
        let rows = sqlx::query(&sql)
            .bind(vector_literal(query))
            .bind(threshold)
            .bind(usize_to_i64(limit))
            .fetch_all(&self.pool)
            .await?;
        rows.iter()
            .map(|row| -> Result<MatchedMessage> {
                Ok(MatchedMessage {
                    message: row_to_message(row)?,
                    similarity: row.try_get("similarity")?,
                })
            })
            .collect()
    }

    async fn fetch_embedded_messages(
        &self,
        limit: usize,
    ) -> Result<Vec<Candidate<MessageRecord>>> {
        let sql = format!(
            "SELECT {MESSAGE_COLUMNS}, embedding::text AS embedding
               FROM messages
              WHERE embedding IS NOT NULL
              ORDER BY created_at DESC
              LIMIT $1"
        );
        let rows = sqlx::query(&sql).bind(usize_to_i64(limit)).fetch_all(&self.pool).await?;
        rows.iter()
            .map(|row| -> Result<Candidate<MessageRecord>> {
                let embedding: String = row.try_get("embedding")?;
                Ok(Candidate::new(row_to_message(row)?, StoredEmbedding::from_text(embedding)))
            })
            .collect()
    }
}
