//! v1 score retrieval handler.

use axum::extract::{Path, State};

use crate::api::v1::dto::answers::ScoreResponse;
use crate::api::v1::response::{ApiError, ApiResponse};
use crate::api::AppState;

/// `GET /api/v1/sessions/{sessionId}/scores/{questionId}`
#[utoipa::path(
    get,
    path = "/api/v1/sessions/{sessionId}/scores/{questionId}",
    tag = "scores",
    operation_id = "scores.get",
    params(
        ("sessionId" = String, Path, description = "Session ID"),
        ("questionId" = String, Path, description = "Question ID"),
    ),
    responses(
        (status = 200, description = "Stored score", body = ScoreResponse),
        (status = 404, description = "Session or score not found", body = ApiError),
    )
)]
pub async fn get_score(
    State(state): State<AppState>,
    Path((session_id, question_id)): Path<(String, String)>,
) -> ApiResponse<ScoreResponse> {
    match state.store.read_score(&session_id, &question_id).await {
        Ok(record) => ApiResponse::success(ScoreResponse::from(record)),
        Err(e) => e.into(),
    }
}
