use anyhow::Result;
use chatio_core::SearchSettings;
use chatio_search::select_strategy;
use chatio_storage::HealthStore;

use super::connect;

/// Check connectivity and report the strategy `serve` would use.
pub(crate) async fn run_probe() -> Result<()> {
    let storage = connect().await?;
    storage.ping().await?;
    let settings = SearchSettings::from_env();
    let strategy = select_strategy(storage, settings.candidate_limit).await;
    println!("{}", strategy.kind());
    Ok(())
}
