use axum::extract::State;
use serde::Serialize;

use crate::api::v1::response::ApiResponse;
use crate::api::AppState;

/// Health data returned inside the v1 envelope.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct HealthData {
    pub status: String,
    pub version: String,
    pub embeddings: EmbeddingsStatus,
    pub transcription: TranscriptionStatus,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct EmbeddingsStatus {
    /// `"ready"` once the model is loaded, `"loading"` before that.
    pub status: String,
    pub model: String,
    pub dimensions: usize,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct TranscriptionStatus {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// `GET /api/v1/health`
#[utoipa::path(
    get,
    path = "/api/v1/health",
    tag = "health",
    responses(
        (status = 200, description = "Service health status", body = HealthData),
    )
)]
pub async fn health_check(State(state): State<AppState>) -> ApiResponse<HealthData> {
    let embeddings = EmbeddingsStatus {
        status: if state.embeddings.is_ready() {
            "ready".to_string()
        } else {
            "loading".to_string()
        },
        model: state.config.embeddings.model.clone(),
        dimensions: state.config.embeddings.dimensions,
    };

    let transcription = if state.transcription.is_available() {
        TranscriptionStatus {
            status: "available".to_string(),
            model: Some(state.config.transcription.model.clone()),
        }
    } else {
        TranscriptionStatus {
            status: "unavailable".to_string(),
            model: None,
        }
    };

    ApiResponse::success(HealthData {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        embeddings,
        transcription,
    })
}
