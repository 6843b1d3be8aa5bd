mod explain;
mod gate;
mod similarity;

pub use explain::top_lexical_matches;
pub use gate::{needs_review, resolve_min_score, DEFAULT_MIN_SCORE};
pub use similarity::{clamp_similarity, cosine_similarity, round_to, score_from_similarity};

use chrono::Utc;

use crate::config::ScoringConfig;
use crate::embeddings::EmbeddingProvider;
use crate::error::{CandorError, Result};
use crate::interview::build_reference;
use crate::models::ScoreRecord;
use crate::storage::SessionStore;

/// Stored snippets are capped so a score record stays a small document
/// even for long-winded answers.
const SNIPPET_CHARS: usize = 1200;

/// Scores one candidate answer against the synthesized reference for a
/// planned question, persisting the result as the session's score of
/// record for that question.
#[derive(Clone)]
pub struct ScoringService {
    store: SessionStore,
    embeddings: EmbeddingProvider,
    top_matches: usize,
}

impl ScoringService {
    pub fn new(store: SessionStore, embeddings: EmbeddingProvider, config: &ScoringConfig) -> Self {
        Self {
            store,
            embeddings,
            top_matches: config.top_matches,
        }
    }

    pub async fn score_answer(
        &self,
        session_id: &str,
        question_id: &str,
        answer: &str,
    ) -> Result<ScoreRecord> {
        let answer = answer.trim();
        if answer.is_empty() {
            return Err(CandorError::Validation(
                "Answer text must not be empty".to_string(),
            ));
        }

        let parsed = self.store.read_parsed_resume(session_id).await?;
        let plan = self.store.read_plan(session_id).await?;
        let question = plan.find_question(question_id).ok_or_else(|| {
            CandorError::NotFound(format!("Question {question_id} not in interview plan"))
        })?;

        let reference = build_reference(&parsed.profile, question);

        let (ref_embedding, answer_embedding) =
            self.embeddings.embed_pair(&reference, answer).await?;

        let similarity = cosine_similarity(&ref_embedding, &answer_embedding);
        let score = score_from_similarity(similarity);
        let min_score = resolve_min_score(question, &plan);

        let record = ScoreRecord {
            session_id: session_id.to_string(),
            question_id: question_id.to_string(),
            similarity: round_to(clamp_similarity(similarity), 4),
            score,
            min_score,
            needs_human_review: needs_review(score, min_score),
            reference_snippet: truncate_chars(&reference, SNIPPET_CHARS),
            answer_excerpt: truncate_chars(answer, SNIPPET_CHARS),
            top_matches: top_lexical_matches(&reference, answer, self.top_matches),
            created_at: Utc::now(),
        };

        self.store.write_score(session_id, &record).await?;
        Ok(record)
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
