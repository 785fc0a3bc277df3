use anyhow::Result;
use chatio_http::{AppState, create_router};
use chatio_service::{ConversationService, EmbeddingBackfillService, TaskService};
use std::sync::Arc;

use super::{connect, embedding_provider, search_service};

pub(crate) async fn run(port: u16, host: String) -> Result<()> {
    let storage = connect().await?;
    let embeddings = embedding_provider()?;

    let state = Arc::new(AppState {
        search_service: Arc::new(search_service(storage.clone(), embeddings.clone()).await?),
        conversation_service: Arc::new(ConversationService::new(storage.clone())),
        task_service: Arc::new(TaskService::new(storage.clone())),
        backfill_service: Arc::new(EmbeddingBackfillService::new(storage.clone(), embeddings)),
        health: storage,
    });
    tracing::info!(strategy = %state.strategy_kind(), "search strategy selected");

    let router = create_router(state);
    let addr = format!("{host}:{port}");
    tracing::info!("Starting HTTP server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
