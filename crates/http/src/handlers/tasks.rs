use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use std::sync::Arc;

use chatio_core::Task;

use crate::AppState;
use crate::api_error::ApiError;
use crate::query_types::{CreateTaskRequest, IdQuery, TaskQuery, UpdateTaskRequest};
use crate::response_types::{
    FetchResponse, ListResponse, MessageResponse, MutationResponse, SingleResponse,
};

/// `?id=` returns `{data: item}`, otherwise `{data, count}` over tasks
/// matching every given filter.
pub async fn list_tasks(
    State(state): State<Arc<AppState>>,
    query: Result<Query<TaskQuery>, QueryRejection>,
) -> Result<Json<FetchResponse<Task>>, ApiError> {
    let Query(query) = query?;
    if let Some(id) = query.id.as_deref() {
        let task = state.task_service.get(id).await?;
        return Ok(Json(FetchResponse::Single(SingleResponse { data: task })));
    }
    let tasks = state.task_service.list(query.filter()?).await?;
    Ok(Json(FetchResponse::List(ListResponse::new(tasks))))
}

pub async fn create_task(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MutationResponse<Task>>), ApiError> {
    let Json(request) = body?;
    let created = state.task_service.create(request.into_new()?).await?;
    Ok((
        StatusCode::CREATED,
        Json(MutationResponse { message: "Task created successfully", data: created }),
    ))
}

pub async fn update_task(
    State(state): State<Arc<AppState>>,
    body: Result<Json<UpdateTaskRequest>, JsonRejection>,
) -> Result<Json<MutationResponse<Task>>, ApiError> {
    let Json(request) = body?;
    let (id, patch) = request.into_patch()?;
    let updated = state.task_service.update(&id, patch).await?;
    Ok(Json(MutationResponse { message: "Task updated successfully", data: updated }))
}

pub async fn delete_task(
    State(state): State<Arc<AppState>>,
    query: Result<Query<IdQuery>, QueryRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Query(query) = query?;
    let id = query
        .id
        .ok_or_else(|| ApiError::BadRequest("Task id is required as query parameter".to_owned()))?;
    state.task_service.delete(&id).await?;
    Ok(Json(MessageResponse { message: "Task deleted successfully" }))
}
