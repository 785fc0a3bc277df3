//! Service layer for chatio.
//!
//! Coordinates storage, embedding generation, search strategies and LLM
//! enhancement. The HTTP and CLI crates depend only on these services.

mod backfill_service;
mod conversation_service;
pub mod error;
mod search_service;
mod task_service;
#[cfg(test)]
mod test_support;

pub use backfill_service::{
    BACKFILL_COMPLETED_MESSAGE, BackfillReport, EmbeddingBackfillService,
    NOTHING_TO_BACKFILL_MESSAGE,
};
pub use conversation_service::ConversationService;
pub use error::ServiceError;
pub use search_service::{EMPTY_CORPUS_MESSAGE, SearchResponse, SearchService};
pub use task_service::TaskService;
