use std::io::Write;

use anyhow::{Context, Result};

use crate::ranking::RankingRow;

/// Writes ranking rows as CSV with a header row. Column order follows
/// `RankingRow` field order.
pub fn write_rankings_csv<W: Write>(rows: &[RankingRow], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    if rows.is_empty() {
        // serde only emits headers alongside the first record
        csv_writer
            .write_record(HEADERS)
            .context("Failed to write CSV header")?;
    }
    for row in rows {
        csv_writer
            .serialize(row)
            .with_context(|| format!("Failed to write CSV row for {}", row.resume_file))?;
    }

    csv_writer.flush().context("Failed to flush CSV output")?;
    Ok(())
}

/// Renders ranking rows to an in-memory CSV string.
pub fn rankings_to_csv(rows: &[RankingRow]) -> Result<String> {
    let mut buf = Vec::new();
    write_rankings_csv(rows, &mut buf)?;
    String::from_utf8(buf).context("CSV output was not UTF-8")
}

const HEADERS: [&str; 12] = [
    "resume_file",
    "jd_file",
    "candidate_name",
    "email",
    "phone",
    "organizations",
    "education",
    "match_score",
    "resume_skills_count",
    "jd_skills_count",
    "matched_skills_count",
    "reasons",
];
