//! Heuristic enrichment on top of the basic extractor.
//!
//! Name: first non-empty line made of 2–4 capitalized alphabetic words.
//! Organizations: capitalized phrases after "at". Locations: after "in".
//! Education: any line mentioning a degree or institution keyword.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::fields::basic::{find_email, find_phone};
use crate::fields::{CandidateProfile, FieldExtractor};

const EDUCATION_KEYWORDS: &[&str] = &[
    "bachelor",
    "master",
    "phd",
    "degree",
    "university",
    "college",
    "institute",
];

// Words on the same line only.
const CAPITALIZED_PHRASE: &str = r"[A-Z][A-Za-z&.'-]*(?:[ \t]+[A-Z][A-Za-z&.'-]*)*";

static ORGANIZATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"\bat[ \t]+({CAPITALIZED_PHRASE})")).expect("valid organization regex")
});

static LOCATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"\bin[ \t]+({CAPITALIZED_PHRASE})")).expect("valid location regex")
});

pub struct EnrichedFieldExtractor;

impl FieldExtractor for EnrichedFieldExtractor {
    fn extract(&self, text: &str) -> CandidateProfile {
        CandidateProfile {
            email: find_email(text),
            phone: find_phone(text),
            name: find_name(text),
            organizations: capture_phrases(&ORGANIZATION_RE, text),
            locations: capture_phrases(&LOCATION_RE, text),
            education: education_lines(text),
        }
    }

    fn name(&self) -> &'static str {
        "enriched"
    }
}

/// Trimmed lines that mention an education keyword, in document order.
pub fn education_lines(text: &str) -> Vec<String> {
    text.lines()
        .filter(|line| {
            let lower = line.to_lowercase();
            EDUCATION_KEYWORDS.iter().any(|k| lower.contains(k))
        })
        .map(|line| line.trim().to_string())
        .collect()
}

fn find_name(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(5)
        .find(|line| looks_like_name(line))
        .map(str::to_string)
        .unwrap_or_default()
}

fn looks_like_name(line: &str) -> bool {
    let words: Vec<&str> = line.split_whitespace().collect();
    (2..=4).contains(&words.len())
        && words.iter().all(|w| {
            let mut chars = w.chars();
            chars.next().is_some_and(|c| c.is_uppercase())
                && chars.all(|c| c.is_alphabetic() || c == '-' || c == '\'' || c == '.')
        })
}

/// First capture of every match, deduplicated in first-seen order.
fn capture_phrases(re: &Regex, text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    re.captures_iter(text)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().trim_end_matches(['.', ',']).to_string())
        .filter(|s| !s.is_empty() && seen.insert(s.clone()))
        .collect()
}
