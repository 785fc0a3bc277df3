use async_trait::async_trait;
use chatio_core::Embedding;

use crate::error::EmbeddingError;

/// Source of text embeddings.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed one text. The result always has `dimensions()` elements.
    async fn embed(&self, text: &str) -> Result<Embedding, EmbeddingError>;

    /// Length of every vector this provider returns.
    fn dimensions(&self) -> usize;
}
