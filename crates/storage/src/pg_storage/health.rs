//! HealthStore implementation for PgStorage.

use super::*;

use crate::traits::HealthStore;
use async_trait::async_trait;

#[async_trait]
impl HealthStore for PgStorage {
    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn sample_users(&self, limit: usize) -> Result<usize> {
        let rows = sqlx::query(r#"SELECT 1 FROM "user" LIMIT $1"#)
            .bind(usize_to_i64(limit))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.len())
    }
}
