use crate::models::{CandidateProfile, Question, QuestionType};

/// Longest project excerpt embedded in a technical reference.
const PROJECT_SNIPPET_CHARS: usize = 800;

/// Synthesize the "ideal answer" a candidate response is scored
/// against. Pure string interpolation; there is no human-authored
/// reference text anywhere in the pipeline.
pub fn build_reference(profile: &CandidateProfile, question: &Question) -> String {
    match question.question_type {
        QuestionType::Technical => {
            let skill = question
                .skill
                .as_deref()
                .unwrap_or(question.question.as_str());
            let project_snippet = profile
                .projects
                .first()
                .map(|p| truncate_chars(p, PROJECT_SNIPPET_CHARS))
                .unwrap_or_default();
            format!(
                "Describe your experience with {skill}. Mention projects using {skill}, \
                 tools/frameworks, your role, responsibilities, and any concrete results \
                 or metrics. Resume summary: {summary}. Example project excerpt: {project_snippet}",
                summary = profile.summary,
            )
        }
        QuestionType::Hr => format!(
            "Answer: {question}. Include role, duration, achievements. Resume summary: {summary}",
            question = question.question,
            summary = profile.summary,
        ),
    }
}

fn truncate_chars(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}
