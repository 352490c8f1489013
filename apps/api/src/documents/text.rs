use std::path::Path;

use encoding_rs::Encoding;
use tracing::{debug, warn};

/// Default decode order for plain-text uploads.
pub const DEFAULT_ENCODINGS: &[&str] = &["utf-8", "windows-1252"];

/// Decodes `bytes` with the first encoding (by WHATWG label) that decodes
/// without errors. Falls back to lossy UTF-8 when none does.
///
/// Unknown labels are skipped with a warning.
pub fn decode_text(bytes: &[u8], encodings: &[String]) -> String {
    for label in encodings {
        let Some(encoding) = Encoding::for_label(label.trim().as_bytes()) else {
            warn!("Unknown text encoding label '{label}', skipping");
            continue;
        };

        let bytes = strip_bom(bytes, encoding);
        if let Some(text) = encoding.decode_without_bom_handling_and_without_replacement(bytes) {
            debug!(encoding = encoding.name(), "decoded text");
            return text.into_owned();
        }
    }

    warn!("All encoding attempts failed, decoding with replacement characters");
    String::from_utf8_lossy(bytes).into_owned()
}

/// Reads a text file with the encoding fallback chain. Empty if unreadable.
pub fn read_text(path: &Path, encodings: &[String]) -> String {
    match std::fs::read(path) {
        Ok(bytes) => decode_text(&bytes, encodings),
        Err(e) => {
            warn!("Error reading text file {}: {e}", path.display());
            String::new()
        }
    }
}

fn strip_bom<'a>(bytes: &'a [u8], encoding: &'static Encoding) -> &'a [u8] {
    match Encoding::for_bom(bytes) {
        Some((bom_encoding, len)) if bom_encoding == encoding => &bytes[len..],
        _ => bytes,
    }
}
