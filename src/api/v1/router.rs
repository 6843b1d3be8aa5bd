use axum::{
    routing::{get, post},
    Router,
};

use crate::api::state::AppState;

use super::handlers;

pub fn v1_router() -> Router<AppState> {
    let sessions = Router::new()
        .route(
            "/",
            get(handlers::sessions::list_sessions).post(handlers::sessions::create_session),
        )
        .route(
            "/{sessionId}/resume",
            get(handlers::resumes::get_parsed_resume).post(handlers::resumes::upload_resume),
        )
        .route(
            "/{sessionId}/resume:parse",
            post(handlers::resumes::parse_resume),
        )
        .route(
            "/{sessionId}/plan",
            get(handlers::plans::get_plan).post(handlers::plans::create_plan),
        )
        .route(
            "/{sessionId}/answers:score",
            post(handlers::answers::score_answer),
        )
        .route(
            "/{sessionId}/answers:transcribe",
            post(handlers::answers::transcribe_answer),
        )
        .route(
            "/{sessionId}/scores/{questionId}",
            get(handlers::scores::get_score),
        );

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/openapi.json", get(super::openapi::openapi_json))
        .nest("/sessions", sessions)
}
