//! Typed error enum for the service layer.
//!
//! Unifies storage, search, LLM, and embedding failures into a single error
//! type so handlers match on failure modes instead of downcasting.

use chatio_core::CoreError;
use chatio_embeddings::EmbeddingError;
use chatio_llm::LlmError;
use chatio_search::SearchError;
use chatio_storage::StorageError;
use thiserror::Error;

/// Service-layer error unifying storage, search, LLM, and embedding failures.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Storage operation failed (DB, not found, duplicate, etc.).
    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    /// Search strategy failed.
    #[error("search: {0}")]
    Search(#[from] SearchError),

    /// LLM API call failed.
    #[error("llm: {0}")]
    Llm(#[from] LlmError),

    /// Embedding generation failed.
    #[error("embedding: {0}")]
    Embedding(#[from] EmbeddingError),

    /// Caller provided invalid input (empty query, malformed id, bad enum value).
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl ServiceError {
    pub(crate) fn not_found(entity: &'static str, id: &str) -> Self {
        Self::Storage(StorageError::NotFound { entity, id: id.to_owned() })
    }

    /// Whether this error is likely transient (worth retrying).
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Storage(e) | Self::Search(SearchError::Storage(e)) => e.is_transient(),
            Self::Llm(e) => e.is_transient(),
            Self::Embedding(e) => e.is_transient(),
            _ => false,
        }
    }

    /// Whether this error represents a not-found condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Storage(StorageError::NotFound { .. }))
    }

    /// Whether this error represents a duplicate/conflict.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Storage(e) if e.is_duplicate())
    }

    /// Whether the caller sent something the service or database rejected as malformed.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_) | Self::Storage(StorageError::InvalidInput(_)))
    }
}

impl From<CoreError> for ServiceError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidInput(msg) => Self::InvalidInput(msg),
        }
    }
}

/// Reject ids that are not UUIDs before they reach the database.
pub(crate) fn parse_id(entity: &str, id: &str) -> Result<String, ServiceError> {
    let id = id.trim();
    uuid::Uuid::parse_str(id)
        .map(|u| u.to_string())
        .map_err(|_| ServiceError::InvalidInput(format!("Invalid {entity} id: {id:?}")))
}
