use std::io::Write;
use std::path::{Path, PathBuf};

use atomicwrites::{AllowOverwrite, AtomicFile};
use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

use crate::error::{CandorError, Result};
use crate::models::{InterviewPlan, ParsedResume, ScoreRecord};

const RESUMES_DIR: &str = "resumes";
const ANSWERS_DIR: &str = "answers";
const SCORES_DIR: &str = "scores";
const PARSED_RESUME_FILE: &str = "parsed_resume.json";
const PLAN_FILE: &str = "interview_plan.json";

/// Flat-file store for per-session JSON documents.
///
/// Layout under the storage root:
///
/// ```text
/// <root>/<session_id>/resumes/<uploaded file>
/// <root>/<session_id>/answers/<question_id>_<answer_id>.*
/// <root>/<session_id>/parsed_resume.json
/// <root>/<session_id>/interview_plan.json
/// <root>/<session_id>/scores/<question_id>.json
/// ```
///
/// Session directories are created only by [`SessionStore::create_session`];
/// every other operation treats a missing directory or document as a
/// `NotFound` prerequisite failure and never creates it implicitly.
#[derive(Debug, Clone)]
pub struct SessionStore {
    root: PathBuf,
}

#[derive(Debug, Clone)]
pub struct SessionRecord {
    pub session_id: String,
    pub storage_path: PathBuf,
}

impl SessionStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create a new session directory with its resumes/answers/scores
    /// subdirectories and return its fresh id.
    pub async fn create_session(&self) -> Result<SessionRecord> {
        let session_id = Uuid::new_v4().to_string();
        let session_dir = self.root.join(&session_id);

        for sub in [RESUMES_DIR, ANSWERS_DIR, SCORES_DIR] {
            tokio::fs::create_dir_all(session_dir.join(sub)).await?;
        }

        Ok(SessionRecord {
            session_id,
            storage_path: session_dir,
        })
    }

    /// List existing session ids (directory names under the root).
    pub async fn list_sessions(&self) -> Result<Vec<String>> {
        let mut sessions = Vec::new();
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            // No sessions created yet
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(sessions),
            Err(e) => return Err(e.into()),
        };

        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_dir() {
                sessions.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        sessions.sort();
        Ok(sessions)
    }

    /// Resolve a session directory, rejecting non-uuid ids (they could
    /// otherwise smuggle path separators) and missing directories.
    pub async fn require_session(&self, session_id: &str) -> Result<PathBuf> {
        Uuid::parse_str(session_id)
            .map_err(|_| CandorError::Validation(format!("Invalid session id: {session_id}")))?;

        let dir = self.root.join(session_id);
        if !tokio::fs::try_exists(&dir).await? {
            return Err(CandorError::NotFound(format!(
                "Session {session_id} not found"
            )));
        }
        Ok(dir)
    }

    /// Save an uploaded résumé into the session's `resumes/` directory.
    pub async fn save_resume(
        &self,
        session_id: &str,
        filename: &str,
        bytes: &[u8],
    ) -> Result<PathBuf> {
        let dir = self.require_session(session_id).await?.join(RESUMES_DIR);
        if !tokio::fs::try_exists(&dir).await? {
            return Err(CandorError::NotFound(format!(
                "Resume directory missing for session {session_id}"
            )));
        }

        let safe_name = sanitize_filename(filename);
        let path = dir.join(&safe_name);
        tokio::fs::write(&path, bytes).await?;
        Ok(path)
    }

    /// The first résumé file in the session (lexical order for
    /// determinism), as `(filename, bytes)`.
    pub async fn first_resume(&self, session_id: &str) -> Result<(String, Vec<u8>)> {
        let dir = self.require_session(session_id).await?.join(RESUMES_DIR);
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(CandorError::NotFound(format!(
                    "Resume directory missing for session {session_id}"
                )))
            }
            Err(e) => return Err(e.into()),
        };

        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_file() {
                files.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        files.sort();

        let filename = files.into_iter().next().ok_or_else(|| {
            CandorError::NotFound(format!("No resume uploaded for session {session_id}"))
        })?;
        let bytes = tokio::fs::read(dir.join(&filename)).await?;
        Ok((filename, bytes))
    }

    /// Persist a raw answer (text or audio) under `answers/` for audit.
    pub async fn save_answer(
        &self,
        session_id: &str,
        question_id: &str,
        extension: &str,
        bytes: &[u8],
    ) -> Result<PathBuf> {
        let dir = self.require_session(session_id).await?.join(ANSWERS_DIR);
        if !tokio::fs::try_exists(&dir).await? {
            return Err(CandorError::NotFound(format!(
                "Answers directory missing for session {session_id}"
            )));
        }

        let answer_id = Uuid::new_v4().simple().to_string();
        let safe_question = sanitize_filename(question_id);
        let path = dir.join(format!("{safe_question}_{answer_id}.{extension}"));
        tokio::fs::write(&path, bytes).await?;
        Ok(path)
    }

    pub async fn write_parsed_resume(&self, session_id: &str, parsed: &ParsedResume) -> Result<()> {
        let dir = self.require_session(session_id).await?;
        write_json_atomic(dir.join(PARSED_RESUME_FILE), parsed).await
    }

    pub async fn read_parsed_resume(&self, session_id: &str) -> Result<ParsedResume> {
        let dir = self.require_session(session_id).await?;
        read_json(dir.join(PARSED_RESUME_FILE), || {
            format!("{PARSED_RESUME_FILE} not found for session {session_id}")
        })
        .await
    }

    pub async fn write_plan(&self, session_id: &str, plan: &InterviewPlan) -> Result<()> {
        let dir = self.require_session(session_id).await?;
        write_json_atomic(dir.join(PLAN_FILE), plan).await
    }

    pub async fn read_plan(&self, session_id: &str) -> Result<InterviewPlan> {
        let dir = self.require_session(session_id).await?;
        read_json(dir.join(PLAN_FILE), || {
            format!("{PLAN_FILE} not found for session {session_id}")
        })
        .await
    }

    /// Write a score record atomically (temp file + rename), so an
    /// aborted scoring call can never leave a partial document.
    pub async fn write_score(&self, session_id: &str, record: &ScoreRecord) -> Result<()> {
        let dir = self.require_session(session_id).await?.join(SCORES_DIR);
        if !tokio::fs::try_exists(&dir).await? {
            return Err(CandorError::NotFound(format!(
                "Scores directory missing for session {session_id}"
            )));
        }
        let filename = format!("{}.json", sanitize_filename(&record.question_id));
        write_json_atomic(dir.join(filename), record).await
    }

    pub async fn read_score(&self, session_id: &str, question_id: &str) -> Result<ScoreRecord> {
        let dir = self.require_session(session_id).await?.join(SCORES_DIR);
        let filename = format!("{}.json", sanitize_filename(question_id));
        read_json(dir.join(filename), || {
            format!("No score recorded for question {question_id} in session {session_id}")
        })
        .await
    }
}

/// Keep only the final path component and replace separators, so
/// client-supplied names cannot escape the session directory.
fn sanitize_filename(name: &str) -> String {
    let base = Path::new(name)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | ':') { '_' } else { c })
        .collect();
    if cleaned.is_empty() {
        "unnamed".to_string()
    } else {
        cleaned
    }
}

async fn read_json<T: DeserializeOwned>(
    path: PathBuf,
    missing_msg: impl FnOnce() -> String,
) -> Result<T> {
    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(CandorError::NotFound(missing_msg()))
        }
        Err(e) => return Err(e.into()),
    };
    Ok(serde_json::from_slice(&bytes)?)
}

async fn write_json_atomic<T: Serialize>(path: PathBuf, value: &T) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value)?;
    tokio::task::spawn_blocking(move || {
        AtomicFile::new(&path, AllowOverwrite)
            .write(|f| f.write_all(&bytes))
            .map_err(|e| match e {
                atomicwrites::Error::Internal(io) => CandorError::Io(io),
                atomicwrites::Error::User(io) => CandorError::Io(io),
            })
    })
    .await
    .map_err(|e| CandorError::Internal(format!("Atomic write worker failed: {e}")))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_path_components() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("resume.pdf"), "resume.pdf");
        assert_eq!(sanitize_filename(""), "unnamed");
    }

    #[tokio::test]
    async fn list_sessions_with_missing_root_is_empty() {
        let store = SessionStore::new("/nonexistent/candor-test-root");
        assert!(store.list_sessions().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn non_uuid_session_ids_are_rejected() {
        let store = SessionStore::new("/tmp");
        let result = store.require_session("../sneaky").await;
        assert!(matches!(result, Err(CandorError::Validation(_))));
    }
}
