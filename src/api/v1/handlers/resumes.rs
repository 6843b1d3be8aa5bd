//! v1 résumé upload and parsing handlers.

use axum::extract::{Multipart, Path, State};

use crate::api::v1::dto::resumes::{ParsedResumeResponse, UploadResumeResponse};
use crate::api::v1::response::{ApiError, ApiResponse, ErrorCode};
use crate::api::AppState;
use crate::extraction::{extract_profile, ContentExtractor};
use crate::models::ParsedResume;

pub const MAX_RESUME_SIZE: usize = 25 * 1024 * 1024;

const EXCERPT_CHARS: usize = 2000;

/// `POST /api/v1/sessions/{sessionId}/resume`
#[utoipa::path(
    post,
    path = "/api/v1/sessions/{sessionId}/resume",
    tag = "resumes",
    operation_id = "resumes.upload",
    params(("sessionId" = String, Path, description = "Session ID")),
    request_body(content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Resume stored", body = UploadResumeResponse),
        (status = 400, description = "Invalid upload", body = ApiError),
        (status = 404, description = "Session not found", body = ApiError),
    )
)]
pub async fn upload_resume(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    mut multipart: Multipart,
) -> ApiResponse<UploadResumeResponse> {
    let mut file_bytes: Option<Vec<u8>> = None;
    let mut file_name: Option<String> = None;

    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or("").to_string();

        if name == "file" {
            if let Some(name) = field.file_name() {
                file_name = Some(name.to_string());
            }

            let bytes = match field.bytes().await {
                Ok(b) => b,
                Err(e) => {
                    return ApiResponse::error(
                        ErrorCode::InvalidRequest,
                        format!("Failed to read file: {e}"),
                    );
                }
            };

            if bytes.len() > MAX_RESUME_SIZE {
                return ApiResponse::error(
                    ErrorCode::InvalidRequest,
                    format!(
                        "File too large: {} bytes (max {} bytes)",
                        bytes.len(),
                        MAX_RESUME_SIZE
                    ),
                );
            }

            file_bytes = Some(bytes.to_vec());
        }
    }

    let Some(bytes) = file_bytes else {
        return ApiResponse::error(ErrorCode::InvalidRequest, "Missing 'file' field");
    };
    let filename = file_name.unwrap_or_else(|| "resume".to_string());

    match state.store.save_resume(&session_id, &filename, &bytes).await {
        Ok(path) => {
            let stored = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or(filename);
            ApiResponse::created(UploadResumeResponse {
                session_id,
                filename: stored,
                size_bytes: bytes.len(),
            })
        }
        Err(e) => e.into(),
    }
}

/// `POST /api/v1/sessions/{sessionId}/resume:parse`
///
/// Extracts text from the session's uploaded résumé, derives the candidate
/// profile, and persists it as `parsed_resume.json`.
#[utoipa::path(
    post,
    path = "/api/v1/sessions/{sessionId}/resume:parse",
    tag = "resumes",
    operation_id = "resumes.parse",
    params(("sessionId" = String, Path, description = "Session ID")),
    responses(
        (status = 200, description = "Parsed candidate profile", body = ParsedResumeResponse),
        (status = 404, description = "Session or resume not found", body = ApiError),
    )
)]
pub async fn parse_resume(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> ApiResponse<ParsedResumeResponse> {
    let (filename, bytes) = match state.store.first_resume(&session_id).await {
        Ok(found) => found,
        Err(e) => return e.into(),
    };

    let text = match ContentExtractor::extract(&bytes, &filename) {
        Ok(text) => text,
        Err(e) => return e.into(),
    };

    let profile = extract_profile(&text);
    let parsed = ParsedResume {
        filename,
        profile,
        raw_text_excerpt: text.chars().take(EXCERPT_CHARS).collect(),
        full_text_length: text.chars().count(),
    };

    if let Err(e) = state.store.write_parsed_resume(&session_id, &parsed).await {
        return e.into();
    }

    ApiResponse::success(ParsedResumeResponse::from(parsed))
}

/// `GET /api/v1/sessions/{sessionId}/resume`
#[utoipa::path(
    get,
    path = "/api/v1/sessions/{sessionId}/resume",
    tag = "resumes",
    operation_id = "resumes.get",
    params(("sessionId" = String, Path, description = "Session ID")),
    responses(
        (status = 200, description = "Parsed candidate profile", body = ParsedResumeResponse),
        (status = 404, description = "Session or parsed resume not found", body = ApiError),
    )
)]
pub async fn get_parsed_resume(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> ApiResponse<ParsedResumeResponse> {
    match state.store.read_parsed_resume(&session_id).await {
        Ok(parsed) => ApiResponse::success(ParsedResumeResponse::from(parsed)),
        Err(e) => e.into(),
    }
}
