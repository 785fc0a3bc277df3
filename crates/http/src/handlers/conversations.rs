use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use std::sync::Arc;

use chatio_core::Conversation;

use crate::AppState;
use crate::api_error::ApiError;
use crate::query_types::{
    ConversationQuery, CreateConversationRequest, IdQuery, UpdateConversationRequest,
};
use crate::response_types::{
    FetchResponse, ListResponse, MessageResponse, MutationResponse, SingleResponse,
};

/// `?id=` returns `{data: item}`, otherwise `{data, count}` over all
/// conversations filtered by `?type=`.
pub async fn list_conversations(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ConversationQuery>, QueryRejection>,
) -> Result<Json<FetchResponse<Conversation>>, ApiError> {
    let Query(query) = query?;
    if let Some(id) = query.id.as_deref() {
        let conversation = state.conversation_service.get(id).await?;
        return Ok(Json(FetchResponse::Single(SingleResponse { data: conversation })));
    }
    let conversations = state.conversation_service.list(query.kind()?).await?;
    Ok(Json(FetchResponse::List(ListResponse::new(conversations))))
}

pub async fn create_conversation(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CreateConversationRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MutationResponse<Conversation>>), ApiError> {
    let Json(request) = body?;
    let created = state.conversation_service.create(request.into_new()?).await?;
    Ok((
        StatusCode::CREATED,
        Json(MutationResponse { message: "Conversation created successfully", data: created }),
    ))
}

pub async fn update_conversation(
    State(state): State<Arc<AppState>>,
    body: Result<Json<UpdateConversationRequest>, JsonRejection>,
) -> Result<Json<MutationResponse<Conversation>>, ApiError> {
    let Json(request) = body?;
    let (id, patch) = request.into_patch()?;
    let updated = state.conversation_service.update(&id, patch).await?;
    Ok(Json(MutationResponse { message: "Conversation updated successfully", data: updated }))
}

pub async fn delete_conversation(
    State(state): State<Arc<AppState>>,
    query: Result<Query<IdQuery>, QueryRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Query(query) = query?;
    let id = query.id.ok_or_else(|| {
        ApiError::BadRequest("Conversation id is required as query parameter".to_owned())
    })?;
    state.conversation_service.delete(&id).await?;
    Ok(Json(MessageResponse { message: "Conversation deleted successfully" }))
}
