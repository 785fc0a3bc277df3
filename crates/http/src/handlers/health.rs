use axum::{Json, extract::State};
use std::sync::Arc;

use crate::AppState;
use crate::api_error::ApiError;
use crate::response_types::{ConnectionTestResponse, HealthResponse};

/// Rows sampled from the `user` table by the connection test.
const CONNECTION_TEST_SAMPLE: usize = 5;

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        message: "Backend is running",
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Connection check: a failed round-trip is an error, a failed sample query is reported.
pub async fn connection_test(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ConnectionTestResponse>, ApiError> {
    state.health.ping().await.map_err(|e| ApiError::Internal(e.into()))?;

    let (query_status, record_count) = match state.health.sample_users(CONNECTION_TEST_SAMPLE).await
    {
        Ok(count) => ("success", count),
        Err(e) => {
            tracing::warn!(error = %e, "connection test sample query failed");
            ("failed", 0)
        },
    };
    Ok(Json(ConnectionTestResponse {
        message: "Database connection successful!",
        connection_status: "connected",
        query_status,
        record_count,
    }))
}
