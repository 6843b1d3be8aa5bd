use axum::Json;
use utoipa::OpenApi;

use super::dto;
use super::handlers;
use super::response;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Candor API",
        version = "1.0.0",
        description = "Resume-to-assessment pipeline. Parses resumes, plans interviews, and scores answers against synthesized references.",
    ),
    paths(
        handlers::health::health_check,
        handlers::sessions::create_session,
        handlers::sessions::list_sessions,
        handlers::resumes::upload_resume,
        handlers::resumes::parse_resume,
        handlers::resumes::get_parsed_resume,
        handlers::plans::create_plan,
        handlers::plans::get_plan,
        handlers::answers::score_answer,
        handlers::answers::transcribe_answer,
        handlers::scores::get_score,
    ),
    components(schemas(
        // Response envelope
        response::ErrorCode,
        response::ApiError,
        // Sessions
        dto::sessions::CreateSessionResponse,
        dto::sessions::ListSessionsResponse,
        // Resumes
        dto::resumes::UploadResumeResponse,
        dto::resumes::ParsedResumeResponse,
        dto::resumes::EducationEntryResponse,
        // Plans
        dto::plans::CreatePlanRequest,
        dto::plans::PlanResponse,
        dto::plans::QuestionResponse,
        // Answers & scores
        dto::answers::ScoreAnswerRequest,
        dto::answers::ScoreResponse,
        dto::answers::TokenMatchResponse,
        dto::answers::TranscribeAnswerResponse,
        // Health (handler-local types)
        handlers::health::HealthData,
        handlers::health::EmbeddingsStatus,
        handlers::health::TranscriptionStatus,
    )),
    tags(
        (name = "health", description = "Health check"),
        (name = "sessions", description = "Interview session lifecycle"),
        (name = "resumes", description = "Resume upload and profile extraction"),
        (name = "plans", description = "Interview plan generation"),
        (name = "answers", description = "Answer scoring and transcription"),
        (name = "scores", description = "Stored score retrieval"),
    ),
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
