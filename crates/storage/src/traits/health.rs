use async_trait::async_trait;

use crate::error::StorageError;

/// Connectivity checks.
#[async_trait]
pub trait HealthStore: Send + Sync {
    /// Round-trip a trivial query.
    async fn ping(&self) -> Result<(), StorageError>;

    /// Read at most `limit` rows from the `user` table and return how many came back.
    async fn sample_users(&self, limit: usize) -> Result<usize, StorageError>;
}
