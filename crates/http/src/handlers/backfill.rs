use axum::{Json, body::Bytes, extract::State};
use std::sync::Arc;

use chatio_core::EmbeddingStats;
use chatio_service::BackfillReport;

use crate::AppState;
use crate::api_error::ApiError;
use crate::query_types::BackfillRequest;

pub async fn backfill_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<EmbeddingStats>, ApiError> {
    Ok(Json(state.backfill_service.stats().await?))
}

/// The body is optional; an empty body runs with default batch size and limit.
pub async fn run_backfill(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<BackfillReport>, ApiError> {
    let request = if body.iter().all(u8::is_ascii_whitespace) {
        BackfillRequest::default()
    } else {
        serde_json::from_slice::<BackfillRequest>(&body)
            .map_err(|e| ApiError::BadRequest(format!("Invalid backfill request: {e}")))?
    };
    let report =
        state.backfill_service.backfill(request.batch_size, request.capped_limit()).await?;
    Ok(Json(report))
}
