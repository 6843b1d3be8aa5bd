use std::collections::{HashMap, HashSet};

use crate::models::TokenMatch;
use crate::scoring::similarity::round_to;

/// Vocabulary cap for the two-document TF-IDF space. When exceeded,
/// the highest total-frequency terms are kept, alphabetical tiebreak.
const MAX_VOCABULARY: usize = 2000;

/// Decimal places for token weights on the wire.
const WEIGHT_DECIMALS: u32 = 6;

/// Common English stopwords dropped before term construction.
const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can", "cannot", "could", "did", "do", "does", "doing", "down", "during", "each",
    "few", "for", "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers",
    "herself", "him", "himself", "his", "how", "if", "in", "into", "is", "it", "its", "itself",
    "just", "me", "more", "most", "my", "myself", "no", "nor", "not", "now", "of", "off", "on",
    "once", "only", "or", "other", "our", "ours", "ourselves", "out", "over", "own", "same",
    "she", "should", "so", "some", "such", "than", "that", "the", "their", "theirs", "them",
    "themselves", "then", "there", "these", "they", "this", "those", "through", "too", "under",
    "until", "up", "very", "was", "we", "were", "what", "when", "where", "which", "while", "who",
    "whom", "why", "will", "with", "would", "you", "your", "yours", "yourself", "yourselves",
];

fn is_stopword(token: &str) -> bool {
    STOP_WORDS.binary_search(&token).is_ok()
}

/// Lowercase alphanumeric tokens of at least two characters.
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|s| s.len() > 1)
        .map(str::to_string)
        .collect()
}

/// Unigrams plus bigrams, built after stopword removal so bigrams span
/// dropped function words ("built a rest" yields "built rest").
fn build_terms(text: &str) -> Vec<String> {
    let tokens: Vec<String> = tokenize(text)
        .into_iter()
        .filter(|t| !is_stopword(t))
        .collect();

    let mut terms = Vec::with_capacity(tokens.len() * 2);
    terms.extend(tokens.iter().cloned());
    for pair in tokens.windows(2) {
        terms.push(format!("{} {}", pair[0], pair[1]));
    }
    terms
}

fn term_counts(terms: &[String]) -> HashMap<&str, usize> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for term in terms {
        *counts.entry(term.as_str()).or_insert(0) += 1;
    }
    counts
}

/// Ranked lexical overlap between reference and answer.
///
/// Builds a TF-IDF space over exactly the two documents (smooth idf,
/// L2-normalized doc vectors). A token qualifies only when its weight
/// is strictly positive in both documents; results are ranked by the
/// token's importance in the *reference*, ties broken by vocabulary
/// order, truncated to `k`.
///
/// This is a best-effort secondary signal: it always succeeds, and any
/// degenerate input (empty documents, stopwords only, disjoint
/// vocabularies) yields an empty vector.
pub fn top_lexical_matches(reference: &str, answer: &str, k: usize) -> Vec<TokenMatch> {
    let ref_terms = build_terms(reference);
    let ans_terms = build_terms(answer);
    if ref_terms.is_empty() || ans_terms.is_empty() {
        return Vec::new();
    }

    let ref_counts = term_counts(&ref_terms);
    let ans_counts = term_counts(&ans_terms);

    // Vocabulary: union of both documents, capped by corpus frequency.
    let mut vocabulary: Vec<&str> = ref_counts
        .keys()
        .chain(ans_counts.keys())
        .copied()
        .collect::<HashSet<&str>>()
        .into_iter()
        .collect();
    vocabulary.sort_unstable();
    if vocabulary.len() > MAX_VOCABULARY {
        let total = |term: &str| {
            ref_counts.get(term).copied().unwrap_or(0) + ans_counts.get(term).copied().unwrap_or(0)
        };
        vocabulary.sort_by(|a, b| total(b).cmp(&total(a)).then_with(|| a.cmp(b)));
        vocabulary.truncate(MAX_VOCABULARY);
        vocabulary.sort_unstable();
    }

    // Smooth idf over a two-document corpus: ln((1+n)/(1+df)) + 1.
    let idf = |term: &str| {
        let df = usize::from(ref_counts.contains_key(term))
            + usize::from(ans_counts.contains_key(term));
        ((1.0 + 2.0) / (1.0 + df as f64)).ln() + 1.0
    };

    let weigh = |counts: &HashMap<&str, usize>| -> Vec<f64> {
        let raw: Vec<f64> = vocabulary
            .iter()
            .map(|term| counts.get(term).copied().unwrap_or(0) as f64 * idf(term))
            .collect();
        let norm = raw.iter().map(|w| w * w).sum::<f64>().sqrt();
        if norm == 0.0 {
            raw
        } else {
            raw.into_iter().map(|w| w / norm).collect()
        }
    };

    let ref_weights = weigh(&ref_counts);
    let ans_weights = weigh(&ans_counts);

    let mut matches: Vec<(&str, f64)> = vocabulary
        .iter()
        .zip(ref_weights.iter().zip(ans_weights.iter()))
        .filter(|(_, (rw, aw))| **rw > 0.0 && **aw > 0.0)
        .map(|(term, (rw, _))| (*term, *rw))
        .collect();

    matches.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(b.0))
    });
    matches.truncate(k);

    matches
        .into_iter()
        .map(|(token, weight)| TokenMatch {
            token: token.to_string(),
            ref_tfidf: round_to(weight, WEIGHT_DECIMALS),
        })
        .collect()
}
