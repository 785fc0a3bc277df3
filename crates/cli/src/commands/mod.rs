//! Subcommand implementations and the wiring they share.

pub(crate) mod backfill;
pub(crate) mod probe;
pub(crate) mod search;
pub(crate) mod serve;

use std::sync::Arc;

use anyhow::Result;
use chatio_core::SearchSettings;
use chatio_embeddings::{EmbeddingConfig, EmbeddingProvider, HttpEmbeddingClient};
use chatio_llm::{LlmClient, SearchEnhancer};
use chatio_search::select_strategy;
use chatio_service::SearchService;
use chatio_storage::PgStorage;

use crate::database_url;

pub(crate) async fn connect() -> Result<Arc<PgStorage>> {
    Ok(Arc::new(PgStorage::new(&database_url()?).await?))
}

pub(crate) fn embedding_provider() -> Result<Arc<dyn EmbeddingProvider>> {
    let config = EmbeddingConfig::from_env();
    if config.api_key.is_none() {
        tracing::warn!("CHATIO_EMBEDDING_API_KEY not set, embedding requests are unauthenticated");
    }
    tracing::info!(model = %config.model, dimensions = config.dimensions, "embedding client configured");
    Ok(Arc::new(HttpEmbeddingClient::new(config)?))
}

fn enhancer() -> Result<Option<Arc<dyn SearchEnhancer>>> {
    let Some(client) = LlmClient::from_env()? else {
        tracing::info!("CHATIO_LLM_API_KEY not set, search enhancement disabled");
        return Ok(None);
    };
    tracing::info!(model = client.model(), "search enhancement enabled");
    Ok(Some(Arc::new(client)))
}

/// Probe the database once and build the search service around the chosen strategy.
pub(crate) async fn search_service(
    storage: Arc<PgStorage>,
    embeddings: Arc<dyn EmbeddingProvider>,
) -> Result<SearchService> {
    let settings = SearchSettings::from_env();
    let strategy = select_strategy(storage, settings.candidate_limit).await;
    Ok(SearchService::new(embeddings, strategy, enhancer()?, settings))
}
