//! Session lifecycle DTOs for the v1 API.

use serde::Serialize;

use crate::storage::SessionRecord;

/// Response for `POST /v1/sessions`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionResponse {
    /// UUID v4 identifying the new interview session.
    pub session_id: String,
}

impl From<SessionRecord> for CreateSessionResponse {
    fn from(record: SessionRecord) -> Self {
        Self {
            session_id: record.session_id,
        }
    }
}

/// Response for `GET /v1/sessions`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListSessionsResponse {
    pub sessions: Vec<String>,
    pub total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_response_serializes_camel_case() {
        let resp = CreateSessionResponse {
            session_id: "abc".to_string(),
        };
        let json = serde_json::to_value(&resp).expect("serialize");
        assert_eq!(json["sessionId"], "abc");
    }
}
