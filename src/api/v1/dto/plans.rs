//! Interview plan DTOs for the v1 API.

use serde::{Deserialize, Serialize};

use crate::models::{InterviewPlan, Question};

/// Request body for `POST /v1/sessions/{sessionId}/plan`.
#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlanRequest {
    /// Plan-wide review threshold applied to questions without their own.
    pub default_min_score: Option<f64>,
}

/// Interview plan response.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlanResponse {
    pub session_id: String,
    pub candidate: String,
    pub summary: String,
    pub total_questions: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_min_score: Option<f64>,
    pub questions: Vec<QuestionResponse>,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResponse {
    pub id: String,
    #[serde(rename = "type")]
    pub question_type: String,
    pub question: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skill: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_score: Option<f64>,
}

impl From<Question> for QuestionResponse {
    fn from(q: Question) -> Self {
        Self {
            id: q.id,
            question_type: q.question_type.to_string(),
            question: q.question,
            skill: q.skill,
            min_score: q.min_score,
        }
    }
}

impl From<InterviewPlan> for PlanResponse {
    fn from(plan: InterviewPlan) -> Self {
        Self {
            session_id: plan.session_id,
            candidate: plan.candidate,
            summary: plan.summary,
            total_questions: plan.total_questions,
            default_min_score: plan.default_min_score,
            questions: plan.questions.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QuestionType;

    #[test]
    fn plan_response_serializes_camel_case() {
        let plan = InterviewPlan {
            session_id: "s1".to_string(),
            candidate: "Candidate".to_string(),
            summary: "A summary".to_string(),
            total_questions: 1,
            default_min_score: Some(6.0),
            questions: vec![Question {
                id: "intro".to_string(),
                question_type: QuestionType::Hr,
                question: "Tell me about yourself.".to_string(),
                skill: None,
                min_score: None,
            }],
        };

        let json = serde_json::to_value(PlanResponse::from(plan)).expect("serialize");
        assert_eq!(json["sessionId"], "s1");
        assert_eq!(json["totalQuestions"], 1);
        assert_eq!(json["defaultMinScore"], 6.0);
        assert_eq!(json["questions"][0]["type"], "hr");
        assert!(json["questions"][0].get("skill").is_none());
    }
}
