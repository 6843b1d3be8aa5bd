//! Session storage round trips and the scoring pipeline's failure
//! behavior when the embedding model is not loaded.

use candor::config::{EmbeddingsConfig, ScoringConfig};
use candor::embeddings::EmbeddingProvider;
use candor::error::CandorError;
use candor::extraction::extract_profile;
use candor::interview::build_plan;
use candor::models::{ParsedResume, ScoreRecord, INTRO_QUESTION_ID};
use candor::scoring::ScoringService;
use candor::storage::SessionStore;

fn unloaded_embeddings() -> EmbeddingProvider {
    EmbeddingProvider::deferred(&EmbeddingsConfig {
        model: "all-MiniLM-L6-v2".to_string(),
        dimensions: 384,
        batch_size: 32,
    })
}

async fn seeded_session(store: &SessionStore) -> String {
    let session = store.create_session().await.unwrap();
    let profile = extract_profile("Jordan Lee\nBackend engineer\nSkills: Python, Docker");
    let plan = build_plan(&profile, &session.session_id, None);
    let parsed = ParsedResume {
        filename: "resume.txt".to_string(),
        profile,
        raw_text_excerpt: "Jordan Lee".to_string(),
        full_text_length: 10,
    };
    store
        .write_parsed_resume(&session.session_id, &parsed)
        .await
        .unwrap();
    store.write_plan(&session.session_id, &plan).await.unwrap();
    session.session_id
}

#[tokio::test]
async fn parsed_resume_and_plan_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(dir.path());
    let session_id = seeded_session(&store).await;

    let parsed = store.read_parsed_resume(&session_id).await.unwrap();
    assert_eq!(parsed.filename, "resume.txt");
    assert_eq!(parsed.profile.name.as_deref(), Some("Jordan Lee"));

    let plan = store.read_plan(&session_id).await.unwrap();
    assert_eq!(plan.session_id, session_id);
    assert!(plan.find_question(INTRO_QUESTION_ID).is_some());
}

#[tokio::test]
async fn score_records_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(dir.path());
    let session_id = seeded_session(&store).await;

    let record = ScoreRecord {
        session_id: session_id.clone(),
        question_id: "intro".to_string(),
        similarity: 0.61,
        score: 8.05,
        min_score: 5.0,
        needs_human_review: false,
        reference_snippet: "ref".to_string(),
        answer_excerpt: "ans".to_string(),
        top_matches: vec![],
        created_at: chrono::Utc::now(),
    };
    store.write_score(&session_id, &record).await.unwrap();

    let read = store.read_score(&session_id, "intro").await.unwrap();
    assert_eq!(read.score, 8.05);
    assert!(!read.needs_human_review);
}

#[tokio::test]
async fn reading_a_missing_score_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(dir.path());
    let session_id = seeded_session(&store).await;

    let result = store.read_score(&session_id, "behavioral").await;
    assert!(matches!(result, Err(CandorError::NotFound(_))));
}

#[tokio::test]
async fn scoring_without_a_loaded_model_fails_fast() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(dir.path());
    let session_id = seeded_session(&store).await;

    let scoring = ScoringService::new(
        store.clone(),
        unloaded_embeddings(),
        &ScoringConfig::default(),
    );
    let result = scoring
        .score_answer(&session_id, INTRO_QUESTION_ID, "I am a backend engineer.")
        .await;
    assert!(matches!(result, Err(CandorError::ModelNotReady(_))));
}

#[tokio::test]
async fn scoring_an_unplanned_question_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(dir.path());
    let session_id = seeded_session(&store).await;

    let scoring = ScoringService::new(
        store.clone(),
        unloaded_embeddings(),
        &ScoringConfig::default(),
    );
    let result = scoring
        .score_answer(&session_id, "no-such-question", "answer")
        .await;
    assert!(matches!(result, Err(CandorError::NotFound(_))));
}

#[tokio::test]
async fn empty_answers_are_rejected_before_any_io() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(dir.path());

    let scoring = ScoringService::new(
        store.clone(),
        unloaded_embeddings(),
        &ScoringConfig::default(),
    );
    let result = scoring
        .score_answer("ignored", INTRO_QUESTION_ID, "   ")
        .await;
    assert!(matches!(result, Err(CandorError::Validation(_))));
}

#[tokio::test]
async fn uploaded_resumes_are_listed_deterministically() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(dir.path());
    let session = store.create_session().await.unwrap();

    store
        .save_resume(&session.session_id, "b.txt", b"second")
        .await
        .unwrap();
    store
        .save_resume(&session.session_id, "a.txt", b"first")
        .await
        .unwrap();

    let (filename, bytes) = store.first_resume(&session.session_id).await.unwrap();
    assert_eq!(filename, "a.txt");
    assert_eq!(bytes, b"first");
}
