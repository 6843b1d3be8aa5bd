//! Résumé upload and parsing DTOs for the v1 API.

use serde::Serialize;

use crate::models::{EducationEntry, ParsedResume};

/// Response for `POST /v1/sessions/{sessionId}/resume`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadResumeResponse {
    pub session_id: String,
    /// Sanitized filename as stored on disk.
    pub filename: String,
    pub size_bytes: usize,
}

/// Extracted candidate profile returned by résumé parsing.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParsedResumeResponse {
    pub filename: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub phones: Vec<String>,
    /// Matched skill vocabulary entries, lowercase and sorted.
    pub skills: Vec<String>,
    pub education: Vec<EducationEntryResponse>,
    pub projects: Vec<String>,
    pub summary: String,
    pub raw_text_excerpt: String,
    pub full_text_length: usize,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntryResponse {
    pub keyword: String,
    pub years: Vec<String>,
}

impl From<EducationEntry> for EducationEntryResponse {
    fn from(entry: EducationEntry) -> Self {
        Self {
            keyword: entry.keyword,
            years: entry.years.into_iter().collect(),
        }
    }
}

impl From<ParsedResume> for ParsedResumeResponse {
    fn from(parsed: ParsedResume) -> Self {
        Self {
            filename: parsed.filename,
            name: parsed.profile.name,
            email: parsed.profile.email,
            phones: parsed.profile.phones,
            skills: parsed.profile.skills,
            education: parsed.profile.education.into_iter().map(Into::into).collect(),
            projects: parsed.profile.projects,
            summary: parsed.profile.summary,
            raw_text_excerpt: parsed.raw_text_excerpt,
            full_text_length: parsed.full_text_length,
        }
    }
}
