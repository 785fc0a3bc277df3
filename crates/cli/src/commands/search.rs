use anyhow::Result;

use super::{connect, embedding_provider, search_service};

pub(crate) async fn run_search(
    query: String,
    limit: Option<usize>,
    threshold: Option<f64>,
) -> Result<()> {
    let storage = connect().await?;
    let service = search_service(storage, embedding_provider()?).await?;
    let response = service.search(&query, limit, threshold).await?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
