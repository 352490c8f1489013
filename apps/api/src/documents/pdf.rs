use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::Path;

use tracing::warn;

/// Best-effort PDF text extraction from bytes. Empty on failure.
///
/// `pdf-extract` can panic on malformed files; that is treated as a failure too.
pub fn pdf_text(bytes: &[u8]) -> String {
    match catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(bytes))) {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            warn!("Error reading PDF: {e}");
            String::new()
        }
        Err(_) => {
            warn!("PDF extractor panicked on malformed input");
            String::new()
        }
    }
}

/// Best-effort PDF text extraction from a file. Empty on failure.
pub fn read_pdf(path: &Path) -> String {
    match std::fs::read(path) {
        Ok(bytes) => pdf_text(&bytes),
        Err(e) => {
            warn!("Error reading PDF {}: {e}", path.display());
            String::new()
        }
    }
}
