//! v1 answer scoring and transcription handlers.

use axum::extract::{Multipart, Path, State};

use crate::api::v1::dto::answers::{ScoreAnswerRequest, ScoreResponse, TranscribeAnswerResponse};
use crate::api::v1::response::{ApiError, ApiResponse, ErrorCode};
use crate::api::AppState;

/// `POST /api/v1/sessions/{sessionId}/answers:score`
#[utoipa::path(
    post,
    path = "/api/v1/sessions/{sessionId}/answers:score",
    tag = "answers",
    operation_id = "answers.score",
    params(("sessionId" = String, Path, description = "Session ID")),
    request_body = ScoreAnswerRequest,
    responses(
        (status = 200, description = "Answer scored", body = ScoreResponse),
        (status = 400, description = "Invalid request", body = ApiError),
        (status = 404, description = "Session, resume, plan, or question not found", body = ApiError),
        (status = 503, description = "Embedding model not ready", body = ApiError),
    )
)]
pub async fn score_answer(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    axum::Json(req): axum::Json<ScoreAnswerRequest>,
) -> ApiResponse<ScoreResponse> {
    if req.question_id.trim().is_empty() {
        return ApiResponse::error(ErrorCode::InvalidRequest, "Question id cannot be empty");
    }
    if req.answer.trim().is_empty() {
        return ApiResponse::error(ErrorCode::InvalidRequest, "Answer cannot be empty");
    }

    // Audit copy of the raw answer. Failure to persist it is not fatal to
    // scoring itself.
    if let Err(e) = state
        .store
        .save_answer(&session_id, &req.question_id, "txt", req.answer.as_bytes())
        .await
    {
        tracing::warn!(error = %e, "Failed to persist answer audit copy");
    }

    match state
        .scoring
        .score_answer(&session_id, &req.question_id, &req.answer)
        .await
    {
        Ok(record) => ApiResponse::success(ScoreResponse::from(record)),
        Err(e) => e.into(),
    }
}

/// `POST /api/v1/sessions/{sessionId}/answers:transcribe`
///
/// Accepts a multipart `file` field with a spoken answer and a `questionId`
/// text field, stores the audio for audit, transcribes it, then scores the
/// transcript exactly like a typed answer.
#[utoipa::path(
    post,
    path = "/api/v1/sessions/{sessionId}/answers:transcribe",
    tag = "answers",
    operation_id = "answers.transcribe",
    params(("sessionId" = String, Path, description = "Session ID")),
    request_body(content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Transcribed and scored answer", body = TranscribeAnswerResponse),
        (status = 400, description = "Invalid upload", body = ApiError),
        (status = 404, description = "Session, plan, or question not found", body = ApiError),
        (status = 501, description = "Transcription not configured", body = ApiError),
        (status = 503, description = "Embedding model not ready", body = ApiError),
    )
)]
pub async fn transcribe_answer(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    mut multipart: Multipart,
) -> ApiResponse<TranscribeAnswerResponse> {
    let mut audio_bytes: Option<Vec<u8>> = None;
    let mut extension: Option<String> = None;
    let mut question_id: Option<String> = None;

    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "file" => {
                if let Some(name) = field.file_name() {
                    extension = name.rsplit('.').next().map(|ext| ext.to_lowercase());
                }
                match field.bytes().await {
                    Ok(b) => audio_bytes = Some(b.to_vec()),
                    Err(e) => {
                        return ApiResponse::error(
                            ErrorCode::InvalidRequest,
                            format!("Failed to read audio: {e}"),
                        );
                    }
                }
            }
            "questionId" | "question_id" => {
                if let Ok(text) = field.text().await {
                    if !text.trim().is_empty() {
                        question_id = Some(text.trim().to_string());
                    }
                }
            }
            _ => {}
        }
    }

    let Some(bytes) = audio_bytes else {
        return ApiResponse::error(ErrorCode::InvalidRequest, "Missing 'file' field");
    };
    let Some(question_id) = question_id else {
        return ApiResponse::error(ErrorCode::InvalidRequest, "Missing 'questionId' field");
    };

    let ext = extension.unwrap_or_else(|| "mp3".to_string());
    if let Err(e) = state
        .store
        .save_answer(&session_id, &question_id, &ext, &bytes)
        .await
    {
        return e.into();
    }

    let transcript = match state.transcription.transcribe(&bytes, Some(&ext)).await {
        Ok(t) => t,
        Err(e) => return e.into(),
    };

    match state
        .scoring
        .score_answer(&session_id, &question_id, &transcript)
        .await
    {
        Ok(record) => ApiResponse::success(TranscribeAnswerResponse {
            session_id,
            question_id,
            transcript,
            score: ScoreResponse::from(record),
        }),
        Err(e) => e.into(),
    }
}
