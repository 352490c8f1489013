use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rayon::prelude::*;
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::documents::{read_document, DocumentKind};
use crate::fields::FieldExtractor;
use crate::matching::matcher::SkillMatcher;
use crate::ranking::csv_export::write_rankings_csv;
use crate::ranking::{rank_documents, BatchReport, NamedText};

#[derive(Parser)]
#[command(name = "skillmatch")]
#[command(about = "Rule-based resume to job description skill matcher", long_about = None)]
pub struct Cli {
    /// Defaults to `serve`.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API
    Serve,

    /// Rank every resume in a folder against every job description in another
    Rank {
        /// Folder of resumes (.pdf, .docx, .txt)
        #[arg(long, default_value = "data/resumes")]
        resumes: PathBuf,

        /// Folder of job descriptions (.txt)
        #[arg(long, default_value = "data/jds")]
        jds: PathBuf,

        /// Output CSV path
        #[arg(short, long, default_value = "output/ranking_results.csv")]
        output: PathBuf,
    },
}

/// A file picked up by a folder scan.
#[derive(Debug, Clone)]
pub struct ScannedFile {
    pub path: PathBuf,
    pub file_name: String,
    pub kind: DocumentKind,
}

/// Lists supported files directly inside `folder`, sorted by file name.
pub fn scan_folder(folder: &Path, accept: &[DocumentKind]) -> Result<Vec<ScannedFile>> {
    if !folder.is_dir() {
        bail!("Folder not found: {}", folder.display());
    }

    let mut files: Vec<ScannedFile> = WalkDir::new(folder)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| {
            let file_name = e.file_name().to_string_lossy().to_string();
            let kind = DocumentKind::from_file_name(&file_name)?;
            accept.contains(&kind).then(|| ScannedFile {
                path: e.path().to_path_buf(),
                file_name,
                kind,
            })
        })
        .collect();

    files.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    Ok(files)
}

/// Reads scanned files in parallel. Unreadable files come back with empty text.
fn read_all(files: &[ScannedFile], encodings: &[String]) -> Vec<NamedText> {
    files
        .par_iter()
        .map(|f| NamedText::new(f.file_name.clone(), read_document(f.kind, &f.path, encodings)))
        .collect()
}

/// `skillmatch rank`: scans both folders, ranks, and writes the CSV.
pub fn run_rank(
    matcher: &SkillMatcher,
    fields: &dyn FieldExtractor,
    encodings: &[String],
    resumes_dir: &Path,
    jds_dir: &Path,
    output: &Path,
) -> Result<BatchReport> {
    let resume_files = scan_folder(
        resumes_dir,
        &[DocumentKind::Pdf, DocumentKind::Docx, DocumentKind::Text],
    )?;
    let jd_files = scan_folder(jds_dir, &[DocumentKind::Text])?;

    if resume_files.is_empty() {
        warn!("No resume files found in {}", resumes_dir.display());
    }
    if jd_files.is_empty() {
        warn!("No JD files found in {}", jds_dir.display());
    }
    info!(
        "Found {} resume files and {} JD files",
        resume_files.len(),
        jd_files.len()
    );

    let resumes = read_all(&resume_files, encodings);
    let jds = read_all(&jd_files, encodings);
    let report = rank_documents(matcher, fields, &resumes, &jds);

    write_csv_atomically(&report, output)?;
    info!("Results saved to {}", output.display());

    for row in report.rows.iter().take(5) {
        info!(
            "{:>6.2}%  {} ({}) vs {} | {}",
            row.match_score, row.candidate_name, row.resume_file, row.jd_file, row.reasons
        );
    }
    for failure in &report.failures {
        warn!(
            "Skipped {} vs {}: {}",
            failure.resume_file, failure.jd_file, failure.error
        );
    }

    Ok(report)
}

fn write_csv_atomically(report: &BatchReport, output: &Path) -> Result<()> {
    let dir = match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    let tmp = tempfile::NamedTempFile::new_in(&dir)
        .with_context(|| format!("Failed to create temp file in {}", dir.display()))?;
    write_rankings_csv(&report.rows, BufWriter::new(tmp.as_file()))?;
    tmp.persist(output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    Ok(())
}
