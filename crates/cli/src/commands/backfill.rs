use anyhow::Result;
use chatio_service::EmbeddingBackfillService;

use super::{connect, embedding_provider};

pub(crate) async fn run_backfill(batch_size: usize, limit: usize) -> Result<()> {
    let storage = connect().await?;
    let service = EmbeddingBackfillService::new(storage, embedding_provider()?);

    let before = service.stats().await?;
    tracing::info!(
        total = before.total,
        without_embeddings = before.without_embeddings,
        "embedding coverage before backfill"
    );

    let report = service.backfill(batch_size, limit).await?;
    for detail in &report.error_details {
        eprintln!("{detail}");
    }
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
