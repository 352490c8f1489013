// Skill matching engine
// Implements: vocabularies, whole-word extraction, overlap scoring, explanations.
// Pure and synchronous; handlers are the only module here that touches HTTP.

pub mod explain;
pub mod extractor;
pub mod handlers;
pub mod matcher;
pub mod scoring;
pub mod vocabulary;
