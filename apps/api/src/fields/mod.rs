//! Candidate field extraction: pluggable, trait-based extractors for display data.
//!
//! Default: `BasicFieldExtractor` (email + phone via regex).
//! Optional: `EnrichedFieldExtractor` (adds name, organizations, locations, education).
//!
//! `AppState` holds an `Arc<dyn FieldExtractor>`, chosen at startup via config.
//! Nothing here feeds the skill matcher.

pub mod basic;
pub mod enriched;

use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub use basic::BasicFieldExtractor;
pub use enriched::EnrichedFieldExtractor;

/// Fields pulled from a resume for display and export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub email: String,
    pub phone: String,
    pub name: String,
    pub organizations: Vec<String>,
    pub locations: Vec<String>,
    pub education: Vec<String>,
}

impl CandidateProfile {
    /// Display name: extracted name, else the email local part, else `fallback`.
    pub fn display_name(&self, fallback: &str) -> String {
        if !self.name.is_empty() {
            return self.name.clone();
        }
        match self.email.split_once('@') {
            Some((local, _)) if !local.is_empty() => local.to_string(),
            _ => fallback.to_string(),
        }
    }
}

/// Implement this to swap field extraction without touching callers.
pub trait FieldExtractor: Send + Sync {
    fn extract(&self, text: &str) -> CandidateProfile;

    /// Backend label, for transparency in logs and responses.
    fn name(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldExtractorKind {
    #[default]
    Basic,
    Enriched,
}

impl FromStr for FieldExtractorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(FieldExtractorKind::Basic),
            "enriched" => Ok(FieldExtractorKind::Enriched),
            other => Err(format!("unknown field extractor '{other}' (expected basic|enriched)")),
        }
    }
}

pub fn build_field_extractor(kind: FieldExtractorKind) -> Arc<dyn FieldExtractor> {
    match kind {
        FieldExtractorKind::Basic => Arc::new(BasicFieldExtractor),
        FieldExtractorKind::Enriched => Arc::new(EnrichedFieldExtractor),
    }
}
