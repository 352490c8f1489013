//! DOCX text extraction: paragraphs of `word/document.xml`, blank ones skipped.

use std::io::{Cursor, Read};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::warn;
use xmltree::{Element, XMLNode};

const DOCUMENT_PART: &str = "word/document.xml";

/// Best-effort DOCX text extraction from bytes. Empty on failure.
pub fn docx_text(bytes: &[u8]) -> String {
    match paragraphs(bytes) {
        Ok(paragraphs) => paragraphs.join("\n"),
        Err(e) => {
            warn!("Error reading DOCX: {e:#}");
            String::new()
        }
    }
}

/// Best-effort DOCX text extraction from a file. Empty on failure.
pub fn read_docx(path: &Path) -> String {
    match std::fs::read(path) {
        Ok(bytes) => docx_text(&bytes),
        Err(e) => {
            warn!("Error reading DOCX {}: {e}", path.display());
            String::new()
        }
    }
}

fn paragraphs(bytes: &[u8]) -> Result<Vec<String>> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).context("not a zip archive")?;
    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .context("missing word/document.xml")?
        .read_to_string(&mut xml)
        .context("unreadable word/document.xml")?;

    let root = Element::parse(Cursor::new(xml.as_bytes())).context("malformed document XML")?;

    let mut out = Vec::new();
    collect_paragraphs(&root, &mut out);
    Ok(out
        .into_iter()
        .filter(|p| !p.trim().is_empty())
        .collect())
}

fn collect_paragraphs(element: &Element, out: &mut Vec<String>) {
    for child in &element.children {
        if let XMLNode::Element(el) = child {
            if el.name == "p" {
                let mut text = String::new();
                collect_runs(el, &mut text);
                out.push(text);
            } else {
                collect_paragraphs(el, out);
            }
        }
    }
}

fn collect_runs(element: &Element, text: &mut String) {
    for child in &element.children {
        if let XMLNode::Element(el) = child {
            match el.name.as_str() {
                "t" => {
                    if let Some(t) = el.get_text() {
                        text.push_str(&t);
                    }
                }
                "tab" => text.push('\t'),
                _ => collect_runs(el, text),
            }
        }
    }
}
