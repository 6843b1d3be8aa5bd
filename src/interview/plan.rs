use uuid::Uuid;

use crate::models::{
    CandidateProfile, InterviewPlan, Question, QuestionType, BEHAVIORAL_QUESTION_ID,
    INTRO_QUESTION_ID,
};

/// Cap on skill-derived technical questions per plan.
pub const MAX_TECHNICAL_QUESTIONS: usize = 5;

/// Build the interview plan for a candidate profile.
///
/// Structure is fixed: one intro HR question, one technical question per
/// profile skill (profile order, capped at 5), one closing behavioral HR
/// question. Question content is deterministic for a given profile;
/// technical question ids are freshly generated uuids on every call, so
/// re-building a plan never preserves question identity.
pub fn build_plan(
    profile: &CandidateProfile,
    session_id: &str,
    default_min_score: Option<f64>,
) -> InterviewPlan {
    let candidate = profile
        .name
        .clone()
        .unwrap_or_else(|| "Candidate".to_string());

    let mut questions = Vec::with_capacity(profile.skills.len().min(MAX_TECHNICAL_QUESTIONS) + 2);

    questions.push(Question {
        id: INTRO_QUESTION_ID.to_string(),
        question_type: QuestionType::Hr,
        question: format!(
            "Hi {candidate}, please introduce yourself and briefly explain your background."
        ),
        skill: None,
        min_score: None,
    });

    for skill in profile.skills.iter().take(MAX_TECHNICAL_QUESTIONS) {
        questions.push(Question {
            id: Uuid::new_v4().to_string(),
            question_type: QuestionType::Technical,
            question: format!("Can you explain your experience with {skill}?"),
            skill: Some(skill.clone()),
            min_score: None,
        });
    }

    questions.push(Question {
        id: BEHAVIORAL_QUESTION_ID.to_string(),
        question_type: QuestionType::Hr,
        question: "Describe a challenging problem you faced and how you solved it.".to_string(),
        skill: None,
        min_score: None,
    });

    InterviewPlan {
        session_id: session_id.to_string(),
        candidate,
        summary: profile.summary.clone(),
        total_questions: questions.len(),
        default_min_score,
        questions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile_with_skills(skills: &[&str]) -> CandidateProfile {
        CandidateProfile {
            name: Some("Jane Doe".to_string()),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            summary: "Backend engineer".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn plan_size_is_clamped_skills_plus_two() {
        for n in 0..8 {
            let skills: Vec<String> = (0..n).map(|i| format!("skill{i}")).collect();
            let skills_ref: Vec<&str> = skills.iter().map(String::as_str).collect();
            let plan = build_plan(&profile_with_skills(&skills_ref), "s1", None);
            assert_eq!(plan.questions.len(), n.min(5) + 2);
            assert_eq!(plan.total_questions, plan.questions.len());
        }
    }

    #[test]
    fn fixed_hr_slots_bracket_the_plan() {
        let plan = build_plan(&profile_with_skills(&["python", "docker"]), "s1", None);
        assert_eq!(plan.questions.first().unwrap().id, INTRO_QUESTION_ID);
        assert_eq!(plan.questions.last().unwrap().id, BEHAVIORAL_QUESTION_ID);
        assert_eq!(plan.questions[0].question_type, QuestionType::Hr);
        assert!(plan.questions[0].question.contains("Jane Doe"));
    }

    #[test]
    fn technical_questions_follow_profile_skill_order() {
        let plan = build_plan(&profile_with_skills(&["docker", "python", "sql"]), "s1", None);
        let skills: Vec<&str> = plan.questions[1..=3]
            .iter()
            .map(|q| q.skill.as_deref().unwrap())
            .collect();
        assert_eq!(skills, vec!["docker", "python", "sql"]);
        for q in &plan.questions[1..=3] {
            assert_eq!(q.question_type, QuestionType::Technical);
            assert!(q.question.contains(q.skill.as_deref().unwrap()));
        }
    }

    #[test]
    fn technical_ids_are_fresh_per_build() {
        let profile = profile_with_skills(&["python"]);
        let first = build_plan(&profile, "s1", None);
        let second = build_plan(&profile, "s1", None);
        assert_ne!(first.questions[1].id, second.questions[1].id);
        // Content stays deterministic even though identity does not
        assert_eq!(first.questions[1].question, second.questions[1].question);
    }

    #[test]
    fn missing_name_defaults_to_candidate() {
        let mut profile = profile_with_skills(&[]);
        profile.name = None;
        let plan = build_plan(&profile, "s1", None);
        assert_eq!(plan.candidate, "Candidate");
        assert!(plan.questions[0].question.contains("Hi Candidate"));
    }

    #[test]
    fn default_min_score_is_carried() {
        let plan = build_plan(&profile_with_skills(&[]), "s1", Some(6.0));
        assert_eq!(plan.default_min_score, Some(6.0));
    }
}
