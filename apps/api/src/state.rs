use std::sync::Arc;

use anyhow::Result;

use crate::config::Config;
use crate::fields::{build_field_extractor, FieldExtractor};
use crate::matching::matcher::SkillMatcher;
use crate::matching::vocabulary::VocabularySet;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Immutable after startup; shared read-only across requests and batch workers.
    pub matcher: Arc<SkillMatcher>,
    /// Pluggable field extractor. Default: BasicFieldExtractor. Swap via FIELD_EXTRACTOR env.
    pub field_extractor: Arc<dyn FieldExtractor>,
}

impl AppState {
    /// Loads vocabularies (built-ins plus any configured overrides) and builds the state.
    pub fn from_config(config: Config) -> Result<Self> {
        let vocabularies = VocabularySet::load(
            config.resume_vocabulary_file.as_deref(),
            config.jd_vocabulary_file.as_deref(),
        )?;

        Ok(AppState {
            matcher: Arc::new(SkillMatcher::new(vocabularies)),
            field_extractor: build_field_extractor(config.field_extractor),
            config,
        })
    }
}
