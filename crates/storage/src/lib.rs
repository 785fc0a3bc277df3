//! Storage layer for chatio
//!
//! PostgreSQL (pgvector) storage behind narrow async traits, one per concern.

pub mod error;
mod pg_storage;
pub mod traits;

pub use error::StorageError;
pub use pg_storage::PgStorage;
pub use traits::{
    ConversationStore, EmbeddingStore, HealthStore, MatchedMessage, MessageSearchStore, TaskStore,
};
