use async_trait::async_trait;
use chatio_core::SearchHit;
use serde::Serialize;

use crate::error::SearchError;

/// Which search path is in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// The database ranks via `match_messages`.
    StoreDelegated,
    /// Candidates are fetched and ranked in this process.
    InProcessRanked,
}

impl StrategyKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::StoreDelegated => "store_delegated",
            Self::InProcessRanked => "in_process_ranked",
        }
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ranked hits from one strategy run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StrategyOutcome {
    pub hits: Vec<SearchHit>,
    /// Nothing met the threshold; `hits` holds the closest matches instead.
    pub degraded: bool,
    /// No message has an embedding, so nothing could be compared.
    pub empty_corpus: bool,
}

/// One way of turning a query embedding into ranked message hits.
#[async_trait]
pub trait SearchStrategy: Send + Sync {
    fn kind(&self) -> StrategyKind;

    /// Return at most `limit` hits ordered by descending similarity.
    async fn search(
        &self,
        query: &[f64],
        threshold: f64,
        limit: usize,
    ) -> Result<StrategyOutcome, SearchError>;
}
