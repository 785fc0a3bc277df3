//! Storage trait abstraction
//!
//! Async domain traits for each storage concern. `PgStorage` implements all of
//! them; services and search strategies depend on the narrow trait they need.

pub mod conversation;
pub mod embedding;
pub mod health;
pub mod search;
pub mod task;

pub use conversation::ConversationStore;
pub use embedding::EmbeddingStore;
pub use health::HealthStore;
pub use search::{MatchedMessage, MessageSearchStore};
pub use task::TaskStore;
