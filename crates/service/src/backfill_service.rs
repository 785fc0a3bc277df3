//! Embedding backfill for messages stored before embeddings were generated.

use std::sync::Arc;
use std::time::Duration;

use chatio_core::{EmbeddingStats, MAX_QUERY_LIMIT, PendingEmbedding};
use chatio_embeddings::{EmbeddingError, EmbeddingProvider};
use chatio_storage::EmbeddingStore;
use serde::Serialize;

use crate::ServiceError;

/// Pause between batches to stay under provider rate limits.
const DEFAULT_BATCH_PAUSE: Duration = Duration::from_millis(200);

/// Shown when every message already has an embedding.
pub const NOTHING_TO_BACKFILL_MESSAGE: &str = "No messages need embeddings";
/// Shown after a run that attempted at least one message.
pub const BACKFILL_COMPLETED_MESSAGE: &str = "Backfill completed";

/// Outcome of one backfill run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackfillReport {
    pub message: String,
    pub processed: usize,
    pub errors: usize,
    pub total: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub error_details: Vec<String>,
}

pub struct EmbeddingBackfillService {
    store: Arc<dyn EmbeddingStore>,
    embeddings: Arc<dyn EmbeddingProvider>,
    batch_pause: Duration,
}

impl EmbeddingBackfillService {
    #[must_use]
    pub fn new(store: Arc<dyn EmbeddingStore>, embeddings: Arc<dyn EmbeddingProvider>) -> Self {
        Self { store, embeddings, batch_pause: DEFAULT_BATCH_PAUSE }
    }

    #[must_use]
    pub const fn with_batch_pause(mut self, pause: Duration) -> Self {
        self.batch_pause = pause;
        self
    }

    pub async fn stats(&self) -> Result<EmbeddingStats, ServiceError> {
        Ok(self.store.embedding_stats().await?)
    }

    /// Embed up to `limit` messages lacking an embedding, `batch_size` at a time.
    ///
    /// A failure on one message is recorded in the report and does not stop the run.
    /// Only failing to list pending messages is an error.
    pub async fn backfill(
        &self,
        batch_size: usize,
        limit: usize,
    ) -> Result<BackfillReport, ServiceError> {
        if batch_size == 0 {
            return Err(ServiceError::InvalidInput("batchSize must be at least 1".to_owned()));
        }
        let limit = limit.min(MAX_QUERY_LIMIT);
        let pending = self.store.messages_without_embeddings(limit).await?;
        if pending.is_empty() {
            return Ok(BackfillReport {
                message: NOTHING_TO_BACKFILL_MESSAGE.to_owned(),
                processed: 0,
                errors: 0,
                total: 0,
                error_details: Vec::new(),
            });
        }

        let total = pending.len();
        tracing::info!(total, batch_size, "starting embedding backfill");

        let mut processed = 0;
        let mut error_details = Vec::new();
        for (index, batch) in pending.chunks(batch_size).enumerate() {
            if index > 0 && !self.batch_pause.is_zero() {
                tokio::time::sleep(self.batch_pause).await;
            }
            for message in batch {
                match self.embed_one(message).await {
                    Ok(()) => processed += 1,
                    Err(e) => {
                        tracing::warn!(message_id = %message.id, error = %e, "backfill failed for message");
                        error_details.push(format!("Message {}: {e}", message.id));
                    },
                }
            }
            tracing::debug!(batch = index + 1, processed, "backfill batch done");
        }

        tracing::info!(processed, errors = error_details.len(), total, "embedding backfill finished");
        Ok(BackfillReport {
            message: BACKFILL_COMPLETED_MESSAGE.to_owned(),
            processed,
            errors: error_details.len(),
            total,
            error_details,
        })
    }

    /// The pgvector column has a fixed width; a vector of the wrong length never reaches it.
    async fn embed_one(&self, message: &PendingEmbedding) -> Result<(), ServiceError> {
        let embedding = self.embeddings.embed(&message.content).await?;
        let expected = self.embeddings.dimensions();
        if embedding.len() != expected {
            let actual = embedding.len();
            return Err(EmbeddingError::DimensionMismatch { expected, actual }.into());
        }
        self.store.store_embedding(&message.id, &embedding).await?;
        Ok(())
    }
}
