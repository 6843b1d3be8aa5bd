use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::models::{CandidateProfile, EducationEntry};

/// Fixed vocabulary the skill extractor matches against. Extending the
/// product to new stacks means extending this list.
pub const SKILL_VOCABULARY: &[&str] = &[
    "python",
    "java",
    "c",
    "c++",
    "pytorch",
    "tensorflow",
    "keras",
    "scikit-learn",
    "machine learning",
    "deep learning",
    "nlp",
    "computer vision",
    "opencv",
    "sql",
    "mysql",
    "postgresql",
    "mongodb",
    "docker",
    "kubernetes",
    "aws",
    "linux",
    "react",
    "angular",
    "nodejs",
    "fastapi",
];

const EDUCATION_KEYWORDS: &[&str] = &[
    "bachelor", "master", "b.sc", "m.sc", "b.tech", "m.tech", "bs", "ms", "phd", "degree",
];

const PROJECT_KEYWORDS: &[&str] = &[
    "project",
    "projects",
    "worked on",
    "implemented",
    "built",
    "developed",
];

const MAX_PHONES: usize = 3;
const MAX_PROJECT_BLOCKS: usize = 5;
const PROJECT_CONTEXT_LINES: usize = 2;

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"[a-zA-Z0-9.+\-_]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}").expect("valid email regex")
    })
}

fn phone_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?:\+?\d{1,3}[-.\s]?)?(?:\(?\d{2,4}\)?[-.\s]?)?\d{6,10}")
            .expect("valid phone regex")
    })
}

fn year_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?:19|20)\d{2}").expect("valid year regex"))
}

/// Derive a structured candidate profile from flat résumé text.
///
/// Pure and infallible: every sub-extractor degrades to an empty or
/// `None` result on input it cannot make sense of.
pub fn extract_profile(raw_text: &str) -> CandidateProfile {
    CandidateProfile {
        name: guess_name(raw_text),
        email: find_email(raw_text),
        phones: find_phones(raw_text),
        skills: extract_skills(raw_text),
        education: find_education(raw_text),
        projects: extract_projects(raw_text),
        summary: build_summary(raw_text),
    }
}

/// First line of 1–5 whitespace-separated tokens where at least one
/// token starts with an uppercase letter; keeps up to 4 tokens.
fn guess_name(text: &str) -> Option<String> {
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let words: Vec<&str> = line.split_whitespace().collect();
        let has_capitalized = words
            .iter()
            .any(|w| w.chars().next().is_some_and(|c| c.is_uppercase()));
        if has_capitalized && words.len() <= 5 {
            return Some(words[..words.len().min(4)].join(" "));
        }
    }
    None
}

fn find_email(text: &str) -> Option<String> {
    email_re().find(text).map(|m| m.as_str().to_string())
}

/// All loose phone matches with at least 7 digits once formatting is
/// stripped. Deduplicated, lexically sorted, capped at 3. The lexical
/// sort order is a documented quirk, not a requirement.
fn find_phones(text: &str) -> Vec<String> {
    let phones: BTreeSet<String> = phone_re()
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .filter(|p| p.chars().filter(|c| c.is_ascii_digit()).count() >= 7)
        .collect();

    phones.into_iter().take(MAX_PHONES).collect()
}

/// Case-insensitive substring match against the fixed vocabulary.
/// The returned set is deduplicated and alphabetically sorted.
fn extract_skills(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    let mut found: Vec<String> = SKILL_VOCABULARY
        .iter()
        .filter(|skill| lower.contains(*skill))
        .map(|s| s.to_string())
        .collect();
    found.sort();
    found.dedup();
    found
}

/// One entry per education keyword present anywhere in the text. Years
/// are every 4-digit year-like token in the whole document; they are
/// deliberately not scoped to the keyword's vicinity.
fn find_education(text: &str) -> Vec<EducationEntry> {
    let lower = text.to_lowercase();
    let years: BTreeSet<String> = year_re()
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect();

    EDUCATION_KEYWORDS
        .iter()
        .filter(|kw| lower.contains(*kw))
        .map(|kw| EducationEntry {
            keyword: kw.to_string(),
            years: years.clone(),
        })
        .collect()
}

/// Context blocks around project-indicator lines: up to 2 lines before
/// and after, non-empty lines joined with single spaces, capped at 5.
fn extract_projects(text: &str) -> Vec<String> {
    let lines: Vec<&str> = text.lines().collect();
    let mut blocks = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        let lower = line.to_lowercase();
        if !PROJECT_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
            continue;
        }
        let start = i.saturating_sub(PROJECT_CONTEXT_LINES);
        let end = (i + PROJECT_CONTEXT_LINES + 1).min(lines.len());
        let block = lines[start..end]
            .iter()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        blocks.push(block);
        if blocks.len() >= MAX_PROJECT_BLOCKS {
            break;
        }
    }

    blocks
}

/// First two non-empty lines joined with a single space.
fn build_summary(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .take(2)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Jane Doe\n\
        Senior Backend Engineer\n\
        jane.doe@example.com | +1 415-555-0134\n\
        \n\
        Skills: Python, Docker, PostgreSQL, AWS\n\
        \n\
        Projects\n\
        Built a REST API using Python and FastAPI for order management.\n\
        Implemented CI pipelines with Docker.\n\
        \n\
        Education\n\
        Bachelor of Science, 2014 - 2018\n";

    #[test]
    fn guesses_name_from_first_plausible_line() {
        assert_eq!(guess_name(SAMPLE), Some("Jane Doe".to_string()));
    }

    #[test]
    fn name_keeps_at_most_four_tokens() {
        let name = guess_name("Maria Fernanda Lopez Garcia Ruiz\n");
        assert_eq!(name, Some("Maria Fernanda Lopez Garcia".to_string()));
    }

    #[test]
    fn name_is_none_without_a_qualifying_line() {
        assert_eq!(guess_name(""), None);
        assert_eq!(
            guess_name("one two three four five six seven eight\n"),
            None
        );
    }

    #[test]
    fn finds_first_email() {
        assert_eq!(
            find_email(SAMPLE),
            Some("jane.doe@example.com".to_string())
        );
        assert_eq!(find_email("no address here"), None);
    }

    #[test]
    fn phones_require_seven_digits() {
        let phones = find_phones("call 123 or +91 9876543210");
        assert_eq!(phones.len(), 1);
        assert!(phones[0].contains("9876543210"));
    }

    #[test]
    fn phones_are_deduplicated_and_capped() {
        let text = "9876543210 9876543210 8765432109 7654321098 6543210987";
        let phones = find_phones(text);
        assert_eq!(phones.len(), 3);
        // Lexically sorted, documented quirk
        let mut sorted = phones.clone();
        sorted.sort();
        assert_eq!(phones, sorted);
    }

    #[test]
    fn skills_are_sorted_subset_of_vocabulary() {
        let skills = extract_skills(SAMPLE);
        // Substring matching means "c" and "sql" (inside "postgresql")
        // also hit; documented best-effort behavior.
        assert_eq!(
            skills,
            vec!["aws", "c", "docker", "fastapi", "postgresql", "python", "sql"]
        );
        for skill in &skills {
            assert!(SKILL_VOCABULARY.contains(&skill.as_str()));
        }
    }

    #[test]
    fn education_pairs_keywords_with_all_document_years() {
        let education = find_education(SAMPLE);
        let bachelor = education
            .iter()
            .find(|e| e.keyword == "bachelor")
            .expect("bachelor entry");
        assert!(bachelor.years.contains("2014"));
        assert!(bachelor.years.contains("2018"));
    }

    #[test]
    fn projects_capture_context_windows() {
        let projects = extract_projects(SAMPLE);
        assert!(!projects.is_empty());
        assert!(projects.len() <= 5);
        assert!(projects[0].contains("REST API"));
        // 2 lines of leading context are included
        assert!(projects[0].contains("Projects"));
    }

    #[test]
    fn summary_joins_first_two_nonempty_lines() {
        assert_eq!(
            build_summary(SAMPLE),
            "Jane Doe Senior Backend Engineer"
        );
        assert_eq!(build_summary(""), "");
    }

    #[test]
    fn extract_profile_never_fails_on_noise() {
        let profile = extract_profile("\u{0}\u{1}\n\n   \n!!!");
        assert!(profile.email.is_none());
        assert!(profile.skills.is_empty());
        assert!(profile.projects.is_empty());
    }
}
