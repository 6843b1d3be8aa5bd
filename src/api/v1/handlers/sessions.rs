//! v1 session lifecycle handlers.

use axum::extract::State;

use crate::api::v1::dto::sessions::{CreateSessionResponse, ListSessionsResponse};
use crate::api::v1::response::{ApiError, ApiResponse};
use crate::api::AppState;

/// `POST /api/v1/sessions`
#[utoipa::path(
    post,
    path = "/api/v1/sessions",
    tag = "sessions",
    operation_id = "sessions.create",
    responses(
        (status = 201, description = "Session created", body = CreateSessionResponse),
        (status = 500, description = "Storage failure", body = ApiError),
    )
)]
pub async fn create_session(State(state): State<AppState>) -> ApiResponse<CreateSessionResponse> {
    match state.store.create_session().await {
        Ok(record) => ApiResponse::created(CreateSessionResponse::from(record)),
        Err(e) => e.into(),
    }
}

/// `GET /api/v1/sessions`
#[utoipa::path(
    get,
    path = "/api/v1/sessions",
    tag = "sessions",
    operation_id = "sessions.list",
    responses(
        (status = 200, description = "Known session ids", body = ListSessionsResponse),
    )
)]
pub async fn list_sessions(State(state): State<AppState>) -> ApiResponse<ListSessionsResponse> {
    match state.store.list_sessions().await {
        Ok(sessions) => {
            let total = sessions.len();
            ApiResponse::success(ListSessionsResponse { sessions, total })
        }
        Err(e) => e.into(),
    }
}
