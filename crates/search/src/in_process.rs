use std::sync::Arc;

use async_trait::async_trait;
use chatio_core::{SearchHit, rank, validate_query};
use chatio_storage::MessageSearchStore;

use crate::error::SearchError;
use crate::strategy::{SearchStrategy, StrategyKind, StrategyOutcome};

/// Fetches a capped batch of embedded messages and ranks them locally.
pub struct InProcessRanked {
    store: Arc<dyn MessageSearchStore>,
    candidate_limit: usize,
}

impl InProcessRanked {
    #[must_use]
    pub fn new(store: Arc<dyn MessageSearchStore>, candidate_limit: usize) -> Self {
        Self { store, candidate_limit }
    }
}

#[async_trait]
impl SearchStrategy for InProcessRanked {
    fn kind(&self) -> StrategyKind {
        StrategyKind::InProcessRanked
    }

    async fn search(
        &self,
        query: &[f64],
        threshold: f64,
        limit: usize,
    ) -> Result<StrategyOutcome, SearchError> {
        validate_query(query)?;
        let candidates = self.store.fetch_embedded_messages(self.candidate_limit).await?;
        if candidates.is_empty() {
            tracing::info!("no messages with embeddings to rank");
            return Ok(StrategyOutcome { empty_corpus: true, ..StrategyOutcome::default() });
        }

        let outcome = rank(query, candidates, threshold, limit)?;
        let dropped = outcome.diagnostics.dropped();
        if dropped > 0 {
            tracing::warn!(
                dropped,
                parse_failures = outcome.diagnostics.parse_failures,
                dimension_mismatches = outcome.diagnostics.dimension_mismatches,
                "candidates skipped during ranking"
            );
        }
        if outcome.degraded {
            tracing::info!(
                threshold,
                returned = outcome.results.len(),
                lowest_similarity = outcome.lowest_similarity().unwrap_or(0.0),
                "no candidate met threshold, returning closest matches"
            );
        }

        Ok(StrategyOutcome {
            degraded: outcome.degraded,
            hits: outcome.results.into_iter().map(SearchHit::from).collect(),
            empty_corpus: false,
        })
    }
}
