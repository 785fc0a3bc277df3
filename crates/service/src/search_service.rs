use std::sync::Arc;

use chatio_core::{MAX_QUERY_LIMIT, SearchHit, SearchSettings};
use chatio_embeddings::EmbeddingProvider;
use chatio_llm::SearchEnhancer;
use chatio_search::{SearchStrategy, StrategyKind};
use serde::Serialize;

use crate::ServiceError;

/// Shown when no message has an embedding yet.
pub const EMPTY_CORPUS_MESSAGE: &str = "No messages with embeddings found in database";

/// Result of one semantic search, ready to serialize.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<SearchHit>,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SearchResponse {
    /// True when `warning` reports a below-threshold fallback.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.warning.is_some()
    }
}

/// Embeds the query, runs the selected strategy and optionally enhances the hits.
pub struct SearchService {
    embeddings: Arc<dyn EmbeddingProvider>,
    strategy: Arc<dyn SearchStrategy>,
    enhancer: Option<Arc<dyn SearchEnhancer>>,
    settings: SearchSettings,
}

impl SearchService {
    #[must_use]
    pub fn new(
        embeddings: Arc<dyn EmbeddingProvider>,
        strategy: Arc<dyn SearchStrategy>,
        enhancer: Option<Arc<dyn SearchEnhancer>>,
        settings: SearchSettings,
    ) -> Self {
        Self { embeddings, strategy, enhancer, settings }
    }

    #[must_use]
    pub fn strategy_kind(&self) -> StrategyKind {
        self.strategy.kind()
    }

    /// Run a semantic search. `limit` and `threshold` fall back to configured defaults.
    pub async fn search(
        &self,
        query: &str,
        limit: Option<usize>,
        threshold: Option<f64>,
    ) -> Result<SearchResponse, ServiceError> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(ServiceError::InvalidInput(
                "Search query is required and must be a non-empty string".to_owned(),
            ));
        }
        let threshold = threshold.unwrap_or(self.settings.default_threshold);
        if !threshold.is_finite() {
            return Err(ServiceError::InvalidInput("threshold must be a finite number".to_owned()));
        }
        let limit = limit.unwrap_or(self.settings.default_limit).min(MAX_QUERY_LIMIT);

        let query_embedding = self.embeddings.embed(trimmed).await?;
        tracing::debug!(dimensions = query_embedding.len(), "generated query embedding");

        let outcome = self.strategy.search(&query_embedding, threshold, limit).await?;
        tracing::info!(
            strategy = %self.strategy.kind(),
            hits = outcome.hits.len(),
            degraded = outcome.degraded,
            threshold,
            limit,
            "semantic search completed"
        );

        let warning = outcome.degraded.then(|| {
            format!("No results found with similarity >= {threshold}. Showing top results.")
        });
        let message = outcome.empty_corpus.then(|| EMPTY_CORPUS_MESSAGE.to_owned());
        let (results, summary) = self.enhance(trimmed, outcome.hits).await;

        Ok(SearchResponse {
            query: query.to_owned(),
            count: results.len(),
            results,
            summary,
            warning,
            message,
        })
    }

    /// Enhancement never fails the search; errors fall back to the ranked list.
    async fn enhance(&self, query: &str, hits: Vec<SearchHit>) -> (Vec<SearchHit>, Option<String>) {
        let Some(enhancer) = &self.enhancer else {
            return (hits, None);
        };
        if hits.is_empty() {
            return (hits, None);
        }
        match enhancer.enhance(query, &hits).await {
            Ok(enhancement) if enhancement.results.len() == hits.len() => {
                (enhancement.results, enhancement.summary)
            },
            Ok(enhancement) => {
                tracing::warn!(
                    expected = hits.len(),
                    actual = enhancement.results.len(),
                    "enhancer changed the result count, using ranked results"
                );
                (hits, None)
            },
            Err(e) => {
                tracing::warn!(error = %e, "search enhancement failed, using ranked results");
                (hits, None)
            },
        }
    }
}
