//! Batch ranking: scores many resumes against one or more job descriptions.
//!
//! Every (JD, resume) pair is independent, so pairs are scored in parallel
//! with rayon and sorted afterwards. A resume that yields no text becomes a
//! `BatchFailure`; the rest of the batch still runs.

pub mod csv_export;

use std::path::Path;

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::fields::FieldExtractor;
use crate::matching::matcher::SkillMatcher;

const LISTED_ORGANIZATIONS: usize = 3;
const LISTED_EDUCATION: usize = 2;

/// A named document whose text has already been extracted.
#[derive(Debug, Clone)]
pub struct NamedText {
    pub name: String,
    pub text: String,
}

impl NamedText {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// One (resume, JD) line of a ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingRow {
    pub resume_file: String,
    pub jd_file: String,
    pub candidate_name: String,
    pub email: String,
    pub phone: String,
    /// First few organizations, ", "-joined. Empty unless the extractor finds any.
    pub organizations: String,
    pub education: String,
    pub match_score: f64,
    pub resume_skills_count: usize,
    pub jd_skills_count: usize,
    pub matched_skills_count: usize,
    pub reasons: String, // joined with " | "
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchFailure {
    pub resume_file: String,
    pub jd_file: String,
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub rows: Vec<RankingRow>,
    pub failures: Vec<BatchFailure>,
    pub generated_at: DateTime<Utc>,
}

/// Ranks every resume against every JD.
///
/// Rows come back sorted by `match_score` descending; ties keep JD-then-resume
/// input order.
pub fn rank_documents(
    matcher: &SkillMatcher,
    fields: &dyn FieldExtractor,
    resumes: &[NamedText],
    jds: &[NamedText],
) -> BatchReport {
    let jd_skills: Vec<Vec<String>> = jds
        .par_iter()
        .map(|jd| matcher.jd_skills(&jd.text))
        .collect();

    let pairs: Vec<(&NamedText, &[String], &NamedText)> = jds
        .iter()
        .zip(&jd_skills)
        .flat_map(|(jd, skills)| resumes.iter().map(move |resume| (jd, skills.as_slice(), resume)))
        .collect();

    let outcomes: Vec<Result<RankingRow, BatchFailure>> = pairs
        .into_par_iter()
        .map(|(jd, skills, resume)| rank_one(matcher, fields, resume, jd, skills))
        .collect();

    let mut rows = Vec::new();
    let mut failures = Vec::new();
    for outcome in outcomes {
        match outcome {
            Ok(row) => rows.push(row),
            Err(failure) => failures.push(failure),
        }
    }

    // Stable sort keeps input order among equal scores.
    rows.sort_by(|a, b| b.match_score.total_cmp(&a.match_score));

    info!(
        rows = rows.len(),
        failures = failures.len(),
        field_extractor = fields.name(),
        "batch ranking complete"
    );

    BatchReport {
        rows,
        failures,
        generated_at: Utc::now(),
    }
}

fn rank_one(
    matcher: &SkillMatcher,
    fields: &dyn FieldExtractor,
    resume: &NamedText,
    jd: &NamedText,
    jd_skills: &[String],
) -> Result<RankingRow, BatchFailure> {
    if resume.text.trim().is_empty() {
        warn!("No text extracted from {}, skipping", resume.name);
        return Err(BatchFailure {
            resume_file: resume.name.clone(),
            jd_file: jd.name.clone(),
            error: "no text extracted".to_string(),
        });
    }

    let profile = fields.extract(&resume.text);
    let result = matcher.match_skills(matcher.resume_skills(&resume.text), jd_skills.to_vec());

    Ok(RankingRow {
        resume_file: resume.name.clone(),
        jd_file: jd.name.clone(),
        candidate_name: profile.display_name(&file_stem(&resume.name)),
        organizations: join_first(&profile.organizations, LISTED_ORGANIZATIONS),
        education: join_first(&profile.education, LISTED_EDUCATION),
        email: profile.email,
        phone: profile.phone,
        match_score: result.match_score,
        resume_skills_count: result.resume_skills_count,
        jd_skills_count: result.jd_skills_count,
        matched_skills_count: result.matched_count,
        reasons: result.reasons.join(" | "),
    })
}

fn join_first(items: &[String], n: usize) -> String {
    items[..items.len().min(n)].join(", ")
}

fn file_stem(name: &str) -> String {
    Path::new(name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(name)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{BasicFieldExtractor, EnrichedFieldExtractor};

    const JD: &str = "Required: Python, Django, SQL, AWS, Docker, Kubernetes, MongoDB";

    fn resumes() -> Vec<NamedText> {
        vec![
            NamedText::new("weak.txt", "I know SQL."),
            NamedText::new("strong.txt", "Python Django SQL AWS Docker Kubernetes\njane@corp.io"),
            NamedText::new("empty.pdf", "   "),
            NamedText::new("mid.docx", "Python, SQL, AWS, Docker"),
        ]
    }

    #[test]
    fn test_rows_sorted_by_score_descending() {
        let report = rank_documents(
            &SkillMatcher::default(),
            &BasicFieldExtractor,
            &resumes(),
            &[NamedText::new("jd.txt", JD)],
        );

        let order: Vec<_> = report.rows.iter().map(|r| r.resume_file.as_str()).collect();
        assert_eq!(order, vec!["strong.txt", "mid.docx", "weak.txt"]);
        assert_eq!(report.rows[0].match_score, 85.71);
        assert!(report
            .rows
            .windows(2)
            .all(|w| w[0].match_score >= w[1].match_score));
    }

    #[test]
    fn test_empty_resume_is_failure_not_abort() {
        let report = rank_documents(
            &SkillMatcher::default(),
            &BasicFieldExtractor,
            &resumes(),
            &[NamedText::new("jd.txt", JD)],
        );
        assert_eq!(report.rows.len(), 3);
        assert_eq!(
            report.failures,
            vec![BatchFailure {
                resume_file: "empty.pdf".to_string(),
                jd_file: "jd.txt".to_string(),
                error: "no text extracted".to_string(),
            }]
        );
    }

    #[test]
    fn test_every_jd_resume_pair_is_ranked() {
        let jds = vec![
            NamedText::new("backend.txt", JD),
            NamedText::new("frontend.txt", "React, TypeScript, CSS, HTML"),
        ];
        let report = rank_documents(&SkillMatcher::default(), &BasicFieldExtractor, &resumes(), &jds);
        assert_eq!(report.rows.len(), 6);
        assert_eq!(report.failures.len(), 2);
        assert!(report.rows.iter().any(|r| r.jd_file == "frontend.txt"));
    }

    #[test]
    fn test_candidate_name_fallbacks() {
        let report = rank_documents(
            &SkillMatcher::default(),
            &BasicFieldExtractor,
            &resumes(),
            &[NamedText::new("jd.txt", JD)],
        );
        let strong = report.rows.iter().find(|r| r.resume_file == "strong.txt").unwrap();
        assert_eq!(strong.candidate_name, "jane");
        assert_eq!(strong.email, "jane@corp.io");

        let mid = report.rows.iter().find(|r| r.resume_file == "mid.docx").unwrap();
        assert_eq!(mid.candidate_name, "mid");
    }

    #[test]
    fn test_enriched_extractor_supplies_name() {
        let resumes = vec![NamedText::new("a.txt", "Jane Roe\nPython engineer")];
        let report = rank_documents(
            &SkillMatcher::default(),
            &EnrichedFieldExtractor,
            &resumes,
            &[NamedText::new("jd.txt", JD)],
        );
        assert_eq!(report.rows[0].candidate_name, "Jane Roe");
    }

    #[test]
    fn test_enriched_fields_reach_csv() {
        let resumes = vec![NamedText::new(
            "a.txt",
            "Jane Roe\nEngineer at Google\nIntern at Acme Labs\nContractor at Initech\nSupport at Hooli\n\
             Bachelor of Science, MIT University\nMaster of Data, Stanford University\n\
             PhD candidate\nPython",
        )];
        let report = rank_documents(
            &SkillMatcher::default(),
            &EnrichedFieldExtractor,
            &resumes,
            &[NamedText::new("jd.txt", "Python")],
        );

        let row = &report.rows[0];
        assert_eq!(row.organizations, "Google, Acme Labs, Initech");
        assert_eq!(
            row.education,
            "Bachelor of Science, MIT University, Master of Data, Stanford University"
        );

        let csv = crate::ranking::csv_export::rankings_to_csv(&report.rows).unwrap();
        let line = csv.lines().nth(1).unwrap();
        assert!(line.starts_with(
            "a.txt,jd.txt,Jane Roe,,,\"Google, Acme Labs, Initech\",\"Bachelor of Science, MIT University, Master of Data, Stanford University\",100.0,"
        ));
    }

    #[test]
    fn test_basic_extractor_leaves_enriched_columns_empty() {
        let report = rank_documents(
            &SkillMatcher::default(),
            &BasicFieldExtractor,
            &[NamedText::new("a.txt", "Engineer at Google\nBachelor of Science\nPython")],
            &[NamedText::new("jd.txt", "Python")],
        );
        assert_eq!(report.rows[0].organizations, "");
        assert_eq!(report.rows[0].education, "");
    }

    #[test]
    fn test_tied_scores_keep_jd_then_resume_order() {
        let resumes: Vec<NamedText> = (0..40)
            .map(|i| NamedText::new(format!("r{i:02}.txt"), "Python and SQL"))
            .collect();
        let jds = vec![
            NamedText::new("a.txt", "Python, SQL, Docker"),
            NamedText::new("b.txt", "Docker, SQL, Python"),
        ];
        let report = rank_documents(&SkillMatcher::default(), &BasicFieldExtractor, &resumes, &jds);

        assert_eq!(report.rows.len(), 80);
        assert!(report.rows.iter().all(|r| r.match_score == 66.67));
        let order: Vec<(String, String)> = report
            .rows
            .iter()
            .map(|r| (r.jd_file.clone(), r.resume_file.clone()))
            .collect();
        let expected: Vec<(String, String)> = ["a.txt", "b.txt"]
            .iter()
            .flat_map(|jd| (0..40).map(move |i| (jd.to_string(), format!("r{i:02}.txt"))))
            .collect();
        assert_eq!(order, expected);
    }

    #[test]
    fn test_reasons_joined_with_pipes() {
        let report = rank_documents(
            &SkillMatcher::default(),
            &BasicFieldExtractor,
            &[NamedText::new("weak.txt", "I know SQL.")],
            &[NamedText::new("jd.txt", JD)],
        );
        assert_eq!(
            report.rows[0].reasons,
            "Found: sql | Missing: python, aws, docker, kubernetes, django... | Very poor match"
        );
    }

    #[test]
    fn test_empty_inputs_produce_empty_report() {
        let report = rank_documents(&SkillMatcher::default(), &BasicFieldExtractor, &[], &[]);
        assert!(report.rows.is_empty());
        assert!(report.failures.is_empty());
    }
}
