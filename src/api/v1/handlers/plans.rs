//! v1 interview plan handlers.

use axum::extract::{Path, State};

use crate::api::v1::dto::plans::{CreatePlanRequest, PlanResponse};
use crate::api::v1::response::{ApiError, ApiResponse};
use crate::api::AppState;
use crate::interview::build_plan;

/// `POST /api/v1/sessions/{sessionId}/plan`
///
/// Builds a deterministic plan from the parsed résumé. Rebuilding replaces
/// the stored plan and assigns fresh technical question ids.
#[utoipa::path(
    post,
    path = "/api/v1/sessions/{sessionId}/plan",
    tag = "plans",
    operation_id = "plans.create",
    params(("sessionId" = String, Path, description = "Session ID")),
    request_body = CreatePlanRequest,
    responses(
        (status = 201, description = "Interview plan created", body = PlanResponse),
        (status = 404, description = "Session or parsed resume not found", body = ApiError),
    )
)]
pub async fn create_plan(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    req: Option<axum::Json<CreatePlanRequest>>,
) -> ApiResponse<PlanResponse> {
    let req = req.map(|axum::Json(r)| r).unwrap_or_default();

    let parsed = match state.store.read_parsed_resume(&session_id).await {
        Ok(parsed) => parsed,
        Err(e) => return e.into(),
    };

    let plan = build_plan(&parsed.profile, &session_id, req.default_min_score);

    if let Err(e) = state.store.write_plan(&session_id, &plan).await {
        return e.into();
    }

    ApiResponse::created(PlanResponse::from(plan))
}

/// `GET /api/v1/sessions/{sessionId}/plan`
#[utoipa::path(
    get,
    path = "/api/v1/sessions/{sessionId}/plan",
    tag = "plans",
    operation_id = "plans.get",
    params(("sessionId" = String, Path, description = "Session ID")),
    responses(
        (status = 200, description = "Interview plan", body = PlanResponse),
        (status = 404, description = "Session or plan not found", body = ApiError),
    )
)]
pub async fn get_plan(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> ApiResponse<PlanResponse> {
    match state.store.read_plan(&session_id).await {
        Ok(plan) => ApiResponse::success(PlanResponse::from(plan)),
        Err(e) => e.into(),
    }
}
