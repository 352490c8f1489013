//! Skill extraction: finds which vocabulary tokens occur in a document.
//!
//! A token matches when it appears in the lowercased text and is neither
//! preceded nor followed by a word character (alphanumeric or `_`). Tokens
//! are escaped, so "c++", "c#" and "node.js" match only their literal text.

use regex::Regex;
use tracing::debug;

use crate::matching::vocabulary::SkillVocabulary;

/// Skills found in one document, in vocabulary order.
pub type SkillSet = Vec<String>;

/// A vocabulary with one compiled whole-word pattern per token.
#[derive(Debug, Clone)]
pub struct SkillExtractor {
    patterns: Vec<(String, Regex)>,
}

impl SkillExtractor {
    pub fn new(vocabulary: &SkillVocabulary) -> Self {
        let patterns = vocabulary
            .all_skills()
            .iter()
            .map(|skill| (skill.clone(), whole_word_pattern(skill)))
            .collect();
        Self { patterns }
    }

    /// Returns the vocabulary tokens present in `text`, in vocabulary order.
    pub fn extract(&self, text: &str) -> SkillSet {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let lowered = text.to_lowercase();
        let found: SkillSet = self
            .patterns
            .iter()
            .filter(|(_, pattern)| pattern.is_match(&lowered))
            .map(|(skill, _)| skill.clone())
            .collect();

        debug!(found = found.len(), vocabulary = self.patterns.len(), "extracted skills");
        found
    }
}

fn whole_word_pattern(skill: &str) -> Regex {
    let source = format!(r"(?:^|\W){}(?:\W|$)", regex::escape(skill));
    // An escaped literal between fixed groups is always a valid pattern.
    Regex::new(&source).unwrap_or_else(|_| unreachable!("escaped skill pattern: {source}"))
}
