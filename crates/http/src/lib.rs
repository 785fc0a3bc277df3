//! HTTP API server for chatio.

pub mod api_error;
mod handlers;
mod query_types;
mod response_types;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use chatio_search::StrategyKind;
use chatio_service::{ConversationService, EmbeddingBackfillService, SearchService, TaskService};
use chatio_storage::HealthStore;

/// Shared application state for all HTTP handlers.
///
/// Wrapped in `Arc` for thread-safe sharing across handlers.
pub struct AppState {
    /// Semantic search over message embeddings
    pub search_service: Arc<SearchService>,
    pub conversation_service: Arc<ConversationService>,
    pub task_service: Arc<TaskService>,
    /// Embedding coverage stats and backfill
    pub backfill_service: Arc<EmbeddingBackfillService>,
    /// Database connectivity checks for `/api/test`
    pub health: Arc<dyn HealthStore>,
}

impl AppState {
    #[must_use]
    pub fn strategy_kind(&self) -> StrategyKind {
        self.search_service.strategy_kind()
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health::health))
        .route("/api/test", get(handlers::health::connection_test))
        .route("/api/search", post(handlers::search::search))
        .route(
            "/api/conversations",
            get(handlers::conversations::list_conversations)
                .post(handlers::conversations::create_conversation)
                .put(handlers::conversations::update_conversation)
                .delete(handlers::conversations::delete_conversation),
        )
        .route(
            "/api/tasks",
            get(handlers::tasks::list_tasks)
                .post(handlers::tasks::create_task)
                .put(handlers::tasks::update_task)
                .delete(handlers::tasks::delete_task),
        )
        .route(
            "/api/messages/backfill",
            get(handlers::backfill::backfill_stats).post(handlers::backfill::run_backfill),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
