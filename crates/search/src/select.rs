use std::sync::Arc;

use chatio_storage::MessageSearchStore;

use crate::delegated::StoreDelegated;
use crate::in_process::InProcessRanked;
use crate::strategy::SearchStrategy;

/// Pick the search path once, at startup.
///
/// Uses the database function when it exists. A failed probe selects
/// in-process ranking so search keeps working against a degraded database.
pub async fn select_strategy(
    store: Arc<dyn MessageSearchStore>,
    candidate_limit: usize,
) -> Arc<dyn SearchStrategy> {
    match store.has_match_function().await {
        Ok(true) => {
            tracing::info!("match_messages available, delegating similarity search to the database");
            Arc::new(StoreDelegated::new(store))
        },
        Ok(false) => {
            tracing::info!(candidate_limit, "match_messages not installed, ranking in process");
            Arc::new(InProcessRanked::new(store, candidate_limit))
        },
        Err(e) => {
            tracing::warn!(error = %e, candidate_limit, "strategy probe failed, ranking in process");
            Arc::new(InProcessRanked::new(store, candidate_limit))
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::StrategyKind;
    use crate::test_support::FakeSearchStore;

    #[tokio::test]
    async fn test_selects_delegated_when_function_exists() {
        let store = FakeSearchStore { has_function: Some(true), ..Default::default() };
        let strategy = select_strategy(Arc::new(store), 100).await;
        assert_eq!(strategy.kind(), StrategyKind::StoreDelegated);
    }

    #[tokio::test]
    async fn test_selects_in_process_when_function_missing() {
        let store = FakeSearchStore { has_function: Some(false), ..Default::default() };
        let strategy = select_strategy(Arc::new(store), 100).await;
        assert_eq!(strategy.kind(), StrategyKind::InProcessRanked);
    }

    #[tokio::test]
    async fn test_probe_failure_falls_back_to_in_process() {
        let store = FakeSearchStore { has_function: None, ..Default::default() };
        let strategy = select_strategy(Arc::new(store), 100).await;
        assert_eq!(strategy.kind(), StrategyKind::InProcessRanked);
    }
}
