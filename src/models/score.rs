use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A lexical overlap token shared by reference and answer, weighted by
/// its TF-IDF importance in the reference text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct TokenMatch {
    pub token: String,
    pub ref_tfidf: f64,
}

/// The `scores/<question_id>.json` session document, overwritten on
/// each scoring call for that question (last write wins).
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ScoreRecord {
    pub session_id: String,
    pub question_id: String,
    /// Cosine similarity of the two embeddings, clamped to [-1, 1].
    pub similarity: f64,
    /// Affine rescale of similarity onto [0, 10], rounded to 2 decimals.
    pub score: f64,
    pub min_score: f64,
    /// `score < min_score`, exactly; equality passes.
    pub needs_human_review: bool,
    /// Truncated copies of the scoring inputs, retained for audit.
    pub reference_snippet: String,
    pub answer_excerpt: String,
    /// Ranked descending by reference importance; empty when the
    /// explainability layer degraded.
    pub top_matches: Vec<TokenMatch>,
    pub created_at: DateTime<Utc>,
}
