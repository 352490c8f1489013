//! Axum route handlers for the Matching API.

use axum::{
    extract::{Multipart, Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::documents::{extract_text, text::decode_text, DocumentKind};
use crate::errors::AppError;
use crate::fields::CandidateProfile;
use crate::matching::matcher::MatchResult;
use crate::matching::vocabulary::{SkillVocabulary, VocabularySet};
use crate::ranking::csv_export::rankings_to_csv;
use crate::ranking::{rank_documents, BatchFailure, NamedText};
use crate::state::AppState;

pub const CSV_FILE_NAME: &str = "resume_rankings.csv";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    #[serde(default)]
    pub resume_text: String,
    pub jd_text: String,
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    #[serde(flatten)]
    pub result: MatchResult,
    pub candidate: CandidateProfile,
    pub field_extractor: &'static str,
}

#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
}

#[derive(Debug, Default, Deserialize)]
pub struct BatchQuery {
    #[serde(default)]
    pub format: OutputFormat,
}

/// A resume upload as received, before text extraction.
struct Upload {
    file_name: String,
    bytes: bytes::Bytes,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/vocabularies
///
/// Lists the resume and JD vocabularies in matching order.
pub async fn handle_vocabularies(State(state): State<AppState>) -> Json<VocabularySet> {
    Json(state.matcher.vocabularies().clone())
}

/// GET /api/v1/vocabularies/:role
pub async fn handle_vocabulary(
    State(state): State<AppState>,
    Path(role): Path<String>,
) -> Result<Json<SkillVocabulary>, AppError> {
    let vocabularies = state.matcher.vocabularies();
    match role.as_str() {
        "resume" => Ok(Json(vocabularies.resume.clone())),
        "jd" => Ok(Json(vocabularies.jd.clone())),
        _ => Err(AppError::NotFound(format!("vocabulary '{role}'"))),
    }
}

/// POST /api/v1/match
///
/// Matches one resume text against one job description text.
pub async fn handle_match(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<MatchResponse>, AppError> {
    if request.jd_text.trim().is_empty() {
        return Err(AppError::Validation("jd_text cannot be empty".to_string()));
    }

    let result = state
        .matcher
        .match_resume_to_jd(&request.resume_text, &request.jd_text);
    let candidate = state.field_extractor.extract(&request.resume_text);

    debug!(score = result.match_score, "single match scored");

    Ok(Json(MatchResponse {
        result,
        candidate,
        field_extractor: state.field_extractor.name(),
    }))
}

/// POST /api/v1/match/batch[?format=csv]
///
/// Multipart form: `jd_text` (text) or `jd_file` (upload), plus one or more
/// `resumes` uploads (.pdf, .docx, .txt). Per-file extraction failures are
/// reported in `failures` while the remaining resumes are still ranked.
pub async fn handle_batch_match(
    State(state): State<AppState>,
    Query(query): Query<BatchQuery>,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let mut jd: Option<NamedText> = None;
    let mut uploads = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        match name.as_str() {
            "jd_text" => {
                let text = field.text().await?;
                jd = Some(NamedText::new("job_description", text));
            }
            "jd_file" => {
                let bytes = field.bytes().await?;
                let text = decode_text(&bytes, &state.config.text_encodings);
                jd = Some(NamedText::new(
                    file_name.unwrap_or_else(|| "job_description".to_string()),
                    text,
                ));
            }
            "resumes" => {
                let position = uploads.len() + 1;
                let bytes = field.bytes().await?;
                uploads.push(Upload {
                    file_name: file_name.unwrap_or_else(|| format!("resume_{position}")),
                    bytes,
                });
            }
            other => debug!("Ignoring unexpected multipart field '{other}'"),
        }
    }

    let jd = jd
        .filter(|jd| !jd.text.trim().is_empty())
        .ok_or_else(|| AppError::Validation("a job description is required".to_string()))?;
    if uploads.is_empty() {
        return Err(AppError::Validation(
            "at least one resume file is required".to_string(),
        ));
    }

    info!("Ranking {} resumes against {}", uploads.len(), jd.name);

    let matcher = state.matcher.clone();
    let fields = state.field_extractor.clone();
    let encodings = state.config.text_encodings.clone();

    // PDF/DOCX parsing and scoring are CPU-bound.
    let report = tokio::task::spawn_blocking(move || {
        let mut resumes = Vec::with_capacity(uploads.len());
        let mut unsupported = Vec::new();

        for upload in uploads {
            match DocumentKind::from_file_name(&upload.file_name) {
                Some(kind) => resumes.push(NamedText::new(
                    upload.file_name,
                    extract_text(kind, &upload.bytes, &encodings),
                )),
                None => unsupported.push(BatchFailure {
                    resume_file: upload.file_name,
                    jd_file: jd.name.clone(),
                    error: "unsupported file type (expected .pdf, .docx or .txt)".to_string(),
                }),
            }
        }

        let mut report = rank_documents(&matcher, fields.as_ref(), &resumes, &[jd]);
        report.failures.extend(unsupported);
        report
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("batch ranking task failed: {e}")))?;

    match query.format {
        OutputFormat::Json => Ok(Json(report).into_response()),
        OutputFormat::Csv => {
            let csv = rankings_to_csv(&report.rows)?;
            Ok((
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{CSV_FILE_NAME}\""),
                    ),
                ],
                csv,
            )
                .into_response())
        }
    }
}
