use serde::{Deserialize, Serialize};

/// Fixed question id for the opening HR question.
pub const INTRO_QUESTION_ID: &str = "intro";
/// Fixed question id for the closing behavioral HR question.
pub const BEHAVIORAL_QUESTION_ID: &str = "behavioral";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    Hr,
    Technical,
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hr => write!(f, "hr"),
            Self::Technical => write!(f, "technical"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Question {
    /// `"intro"`/`"behavioral"` for the fixed HR slots, a fresh uuid v4
    /// for technical questions.
    pub id: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub question: String,
    /// Skill this question probes; technical questions only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill: Option<String>,
    /// Per-question review threshold overriding the plan default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_score: Option<f64>,
}

/// The `interview_plan.json` session document.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct InterviewPlan {
    pub session_id: String,
    /// Candidate display name, `"Candidate"` when the profile had none.
    pub candidate: String,
    pub summary: String,
    pub total_questions: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_min_score: Option<f64>,
    pub questions: Vec<Question>,
}

impl InterviewPlan {
    pub fn find_question(&self, question_id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == question_id)
    }
}
