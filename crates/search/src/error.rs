use chatio_core::RankError;
use chatio_storage::StorageError;
use thiserror::Error;

/// Errors raised while executing a search strategy.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Rank(#[from] RankError),
}
