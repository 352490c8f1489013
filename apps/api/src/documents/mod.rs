//! Document readers: turn uploaded or on-disk resumes into plain text.
//!
//! Readers never fail toward the matcher: unreadable or corrupt input logs a
//! warning and yields an empty string. Callers decide whether an empty
//! document is a per-item failure.

pub mod docx;
pub mod pdf;
pub mod text;

use std::path::Path;

use serde::Serialize;

/// Supported document formats, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Pdf,
    Docx,
    Text,
}

impl DocumentKind {
    pub fn from_file_name(name: &str) -> Option<Self> {
        let ext = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())?
            .to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(DocumentKind::Pdf),
            "docx" => Some(DocumentKind::Docx),
            "txt" => Some(DocumentKind::Text),
            _ => None,
        }
    }
}

/// Extracts text from in-memory document bytes.
pub fn extract_text(kind: DocumentKind, bytes: &[u8], encodings: &[String]) -> String {
    match kind {
        DocumentKind::Pdf => pdf::pdf_text(bytes),
        DocumentKind::Docx => docx::docx_text(bytes),
        DocumentKind::Text => text::decode_text(bytes, encodings),
    }
}

/// Extracts text from a file on disk.
pub fn read_document(kind: DocumentKind, path: &Path, encodings: &[String]) -> String {
    match kind {
        DocumentKind::Pdf => pdf::read_pdf(path),
        DocumentKind::Docx => docx::read_docx(path),
        DocumentKind::Text => text::read_text(path, encodings),
    }
}
