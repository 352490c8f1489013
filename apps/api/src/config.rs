use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

use crate::documents::text::DEFAULT_ENCODINGS;
use crate::fields::FieldExtractorKind;

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Everything has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub resume_vocabulary_file: Option<PathBuf>,
    pub jd_vocabulary_file: Option<PathBuf>,
    /// Encoding labels tried in order when decoding plain-text uploads.
    pub text_encodings: Vec<String>,
    pub field_extractor: FieldExtractorKind,
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            resume_vocabulary_file: None,
            jd_vocabulary_file: None,
            text_encodings: DEFAULT_ENCODINGS.iter().map(|s| s.to_string()).collect(),
            field_extractor: FieldExtractorKind::default(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup, so tests need not touch the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            None => defaults.port,
        };

        let text_encodings = match lookup("TEXT_ENCODINGS") {
            Some(raw) => parse_encodings(&raw)?,
            None => defaults.text_encodings,
        };

        let field_extractor = match lookup("FIELD_EXTRACTOR") {
            Some(raw) => raw
                .parse::<FieldExtractorKind>()
                .map_err(|e| anyhow!(e))
                .context("FIELD_EXTRACTOR is invalid")?,
            None => defaults.field_extractor,
        };

        let max_upload_bytes = match lookup("MAX_UPLOAD_BYTES") {
            Some(raw) => raw
                .parse::<usize>()
                .context("MAX_UPLOAD_BYTES must be a byte count")?,
            None => defaults.max_upload_bytes,
        };

        Ok(Config {
            port,
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
            resume_vocabulary_file: lookup("RESUME_VOCABULARY_FILE").map(PathBuf::from),
            jd_vocabulary_file: lookup("JD_VOCABULARY_FILE").map(PathBuf::from),
            text_encodings,
            field_extractor,
            max_upload_bytes,
        })
    }
}

fn parse_encodings(raw: &str) -> Result<Vec<String>> {
    let labels: Vec<String> = raw
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if labels.is_empty() {
        return Err(anyhow!("TEXT_ENCODINGS must list at least one encoding"));
    }
    for label in &labels {
        if encoding_rs::Encoding::for_label(label.as_bytes()).is_none() {
            return Err(anyhow!("TEXT_ENCODINGS contains unknown encoding '{label}'"));
        }
    }
    Ok(labels)
}
