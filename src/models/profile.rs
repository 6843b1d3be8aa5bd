use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Structured candidate facts derived heuristically from résumé text.
///
/// The profile is best-effort by design: every field degrades to an
/// empty/`None` value on unparseable input rather than failing. It is
/// written wholesale on each parse; there is no incremental merge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CandidateProfile {
    /// Best-effort name guess from the first plausible capitalized line.
    pub name: Option<String>,
    pub email: Option<String>,
    /// At most 3 numbers, each with ≥7 digits, lexically sorted.
    #[serde(default)]
    pub phones: Vec<String>,
    /// Alphabetically sorted subset of the fixed skill vocabulary.
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    /// Up to 5 context windows around project-indicator lines.
    #[serde(default)]
    pub projects: Vec<String>,
    /// First two non-empty lines of the document, joined.
    #[serde(default)]
    pub summary: String,
}

/// One education keyword match. The years are every 4-digit year-like
/// token found anywhere in the document, not just near the keyword.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct EducationEntry {
    pub keyword: String,
    pub years: BTreeSet<String>,
}

/// The `parsed_resume.json` session document: the profile plus
/// provenance about the source file.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ParsedResume {
    pub filename: String,
    #[serde(flatten)]
    pub profile: CandidateProfile,
    /// First 2000 characters of the extracted text, kept for audit.
    pub raw_text_excerpt: String,
    pub full_text_length: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsed_resume_flattens_profile_fields() {
        let parsed = ParsedResume {
            filename: "cv.pdf".to_string(),
            profile: CandidateProfile {
                name: Some("Ada Lovelace".to_string()),
                summary: "Engineer".to_string(),
                ..Default::default()
            },
            raw_text_excerpt: "Ada Lovelace".to_string(),
            full_text_length: 12,
        };

        let json = serde_json::to_value(&parsed).unwrap();
        assert_eq!(json["filename"], "cv.pdf");
        assert_eq!(json["name"], "Ada Lovelace");
        assert_eq!(json["summary"], "Engineer");
        assert!(json.get("profile").is_none());
    }

    #[test]
    fn profile_missing_fields_deserialize_to_defaults() {
        let profile: CandidateProfile = serde_json::from_str(r#"{"name":null,"email":null}"#).unwrap();
        assert!(profile.phones.is_empty());
        assert!(profile.skills.is_empty());
        assert_eq!(profile.summary, "");
    }
}
