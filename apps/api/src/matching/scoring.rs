//! Overlap scoring between resume skills and JD skills.

use std::collections::HashSet;

use crate::matching::extractor::SkillSet;

/// Result of comparing two skill sets. `matched` and `missing` partition the
/// JD skills and keep their order.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillOverlap {
    pub score: f64,
    pub matched: SkillSet,
    pub missing: SkillSet,
}

/// Percentage of `jd_skills` present in `resume_skills`, rounded to two decimals.
///
/// An empty JD yields a zero score with empty lists regardless of the resume.
pub fn score(resume_skills: &[String], jd_skills: &[String]) -> SkillOverlap {
    if jd_skills.is_empty() {
        return SkillOverlap {
            score: 0.0,
            matched: vec![],
            missing: vec![],
        };
    }

    let resume: HashSet<&str> = resume_skills.iter().map(String::as_str).collect();
    let (matched, missing): (SkillSet, SkillSet) = jd_skills
        .iter()
        .cloned()
        .partition(|skill| resume.contains(skill.as_str()));

    let ratio = matched.len() as f64 / jd_skills.len() as f64;

    SkillOverlap {
        score: round_to_hundredths(ratio * 100.0),
        matched,
        missing,
    }
}

/// Rounds to two decimals, half away from zero, on the decimal reading of
/// `value`: 33.335 becomes 33.34 and 3.125 becomes 3.13.
///
/// The value is first snapped to nine decimals so that binary noise such as
/// 33.334999999... is treated as the decimal 33.335.
pub fn round_to_hundredths(value: f64) -> f64 {
    let nanos = (value * 1e9).round() as i64;
    let half = 5_000_000_i64;
    let step = 10_000_000_i64;
    let hundredths = if nanos >= 0 {
        (nanos + half) / step
    } else {
        (nanos - half) / step
    };
    hundredths as f64 / 100.0
}
