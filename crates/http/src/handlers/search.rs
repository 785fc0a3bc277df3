use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use std::sync::Arc;

use chatio_service::SearchResponse;

use crate::AppState;
use crate::api_error::ApiError;
use crate::query_types::SearchRequest;

pub async fn search(
    State(state): State<Arc<AppState>>,
    body: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let Json(request) = body?;
    let query = request.query.unwrap_or_default();
    state
        .search_service
        .search(&query, request.limit, request.threshold)
        .await
        .map(Json)
        .map_err(|e| {
            if !e.is_invalid_input() {
                tracing::error!(error = %e, "semantic search failed");
            }
            ApiError::from(e)
        })
}
