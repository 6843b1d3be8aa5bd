use crate::models::{InterviewPlan, Question};

/// Fallback review threshold when neither the question nor the plan
/// carries one.
pub const DEFAULT_MIN_SCORE: f64 = 5.0;

/// Resolve the effective review threshold for a question: its own
/// `min_score`, else the plan-wide default, else 5.0.
pub fn resolve_min_score(question: &Question, plan: &InterviewPlan) -> f64 {
    question
        .min_score
        .or(plan.default_min_score)
        .unwrap_or(DEFAULT_MIN_SCORE)
}

/// Flag an answer for human review. Strict comparison: a score exactly
/// at the threshold passes.
pub fn needs_review(score: f64, min_score: f64) -> bool {
    score < min_score
}
