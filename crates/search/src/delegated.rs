use std::sync::Arc;

use async_trait::async_trait;
use chatio_core::{SearchHit, round_similarity, validate_query};
use chatio_storage::MessageSearchStore;

use crate::error::SearchError;
use crate::strategy::{SearchStrategy, StrategyKind, StrategyOutcome};

/// Delegates ranking to the database `match_messages` function.
///
/// The function applies the threshold itself, so this path never degrades.
pub struct StoreDelegated {
    store: Arc<dyn MessageSearchStore>,
}

impl StoreDelegated {
    #[must_use]
    pub fn new(store: Arc<dyn MessageSearchStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl SearchStrategy for StoreDelegated {
    fn kind(&self) -> StrategyKind {
        StrategyKind::StoreDelegated
    }

    async fn search(
        &self,
        query: &[f64],
        threshold: f64,
        limit: usize,
    ) -> Result<StrategyOutcome, SearchError> {
        validate_query(query)?;
        let matches = self.store.match_messages(query, threshold, limit).await?;
        let hits: Vec<SearchHit> = matches
            .into_iter()
            .take(limit)
            .map(|m| SearchHit::new(m.message, round_similarity(m.similarity.unwrap_or(0.0))))
            .collect();
        tracing::debug!(hits = hits.len(), threshold, "match_messages returned");
        Ok(StrategyOutcome { hits, degraded: false, empty_corpus: false })
    }
}
