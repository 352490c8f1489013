use once_cell::sync::Lazy;
use regex::Regex;

use crate::fields::{CandidateProfile, FieldExtractor};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("valid email regex")
});

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[+(]?[1-9][0-9 .\-()]{8,}[0-9]").expect("valid phone regex"));

/// First email-like substring, or empty.
pub fn find_email(text: &str) -> String {
    EMAIL_RE
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// First phone-like substring, or empty.
pub fn find_phone(text: &str) -> String {
    PHONE_RE
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Regex-only extractor: email and phone.
pub struct BasicFieldExtractor;

impl FieldExtractor for BasicFieldExtractor {
    fn extract(&self, text: &str) -> CandidateProfile {
        CandidateProfile {
            email: find_email(text),
            phone: find_phone(text),
            ..Default::default()
        }
    }

    fn name(&self) -> &'static str {
        "basic"
    }
}
