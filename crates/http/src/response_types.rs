//! Response types (Serialize)

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct ConnectionTestResponse {
    pub message: &'static str,
    pub connection_status: &'static str,
    pub query_status: &'static str,
    pub record_count: usize,
}

/// `{data, count}` envelope for list endpoints.
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
    pub count: usize,
}

impl<T> ListResponse<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self { count: data.len(), data }
    }
}

/// `{data}` envelope for a lookup by id.
#[derive(Debug, Serialize)]
pub struct SingleResponse<T> {
    pub data: T,
}

/// GET on a collection answers either a single lookup or a filtered list.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum FetchResponse<T> {
    Single(SingleResponse<T>),
    List(ListResponse<T>),
}

/// `{message, data}` envelope for create and update.
#[derive(Debug, Serialize)]
pub struct MutationResponse<T> {
    pub message: &'static str,
    pub data: T,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
