//! Answer scoring and transcription DTOs for the v1 API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{ScoreRecord, TokenMatch};

/// Request body for `POST /v1/sessions/{sessionId}/answers:score`.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScoreAnswerRequest {
    /// Question id from the session's interview plan.
    pub question_id: String,
    /// The candidate's answer text.
    pub answer: String,
}

/// A scored answer, also returned by `GET .../scores/{questionId}`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResponse {
    pub session_id: String,
    pub question_id: String,
    /// Clamped cosine similarity in [-1, 1].
    pub similarity: f64,
    /// Similarity rescaled to the 0..=10 band, rounded to 2 decimals.
    pub score: f64,
    /// Threshold below which the answer is flagged for human review.
    pub min_score: f64,
    pub needs_human_review: bool,
    pub reference_snippet: String,
    pub answer_excerpt: String,
    /// Highest-weighted terms shared by the reference and the answer.
    pub top_matches: Vec<TokenMatchResponse>,
    #[schema(value_type = String)]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenMatchResponse {
    pub token: String,
    /// TF-IDF weight of the term in the reference answer.
    pub ref_tfidf: f64,
}

impl From<TokenMatch> for TokenMatchResponse {
    fn from(m: TokenMatch) -> Self {
        Self {
            token: m.token,
            ref_tfidf: m.ref_tfidf,
        }
    }
}

impl From<ScoreRecord> for ScoreResponse {
    fn from(record: ScoreRecord) -> Self {
        Self {
            session_id: record.session_id,
            question_id: record.question_id,
            similarity: record.similarity,
            score: record.score,
            min_score: record.min_score,
            needs_human_review: record.needs_human_review,
            reference_snippet: record.reference_snippet,
            answer_excerpt: record.answer_excerpt,
            top_matches: record.top_matches.into_iter().map(Into::into).collect(),
            created_at: record.created_at,
        }
    }
}

/// Response for `POST /v1/sessions/{sessionId}/answers:transcribe`.
/// The transcript is scored exactly like a typed answer.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TranscribeAnswerResponse {
    pub session_id: String,
    pub question_id: String,
    pub transcript: String,
    pub score: ScoreResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_response_serializes_camel_case() {
        let record = ScoreRecord {
            session_id: "s1".to_string(),
            question_id: "intro".to_string(),
            similarity: 0.42,
            score: 7.1,
            min_score: 5.0,
            needs_human_review: false,
            reference_snippet: "ref".to_string(),
            answer_excerpt: "ans".to_string(),
            top_matches: vec![TokenMatch {
                token: "kubernetes".to_string(),
                ref_tfidf: 0.5,
            }],
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(ScoreResponse::from(record)).expect("serialize");
        assert_eq!(json["needsHumanReview"], false);
        assert_eq!(json["minScore"], 5.0);
        assert_eq!(json["topMatches"][0]["refTfidf"], 0.5);
        assert!(json.get("createdAt").is_some());
    }
}
