//! Resume ↔ JD matching: composes extraction, scoring and explanation.

use serde::{Deserialize, Serialize};

use crate::matching::explain::explain;
use crate::matching::extractor::{SkillExtractor, SkillSet};
use crate::matching::scoring::score;
use crate::matching::vocabulary::VocabularySet;

/// Outcome of matching one resume against one job description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub match_score: f64, // 0 – 100, two decimals
    pub resume_skills: SkillSet,
    pub jd_skills: SkillSet,
    pub matched_skills: SkillSet, // jd order
    pub missing_skills: SkillSet, // jd order
    pub reasons: Vec<String>,
    pub resume_skills_count: usize,
    pub jd_skills_count: usize,
    pub matched_count: usize,
}

/// Deterministic keyword matcher. Holds compiled extractors for both roles;
/// cheap to share behind an `Arc`.
#[derive(Debug, Clone)]
pub struct SkillMatcher {
    vocabularies: VocabularySet,
    resume_extractor: SkillExtractor,
    jd_extractor: SkillExtractor,
}

impl Default for SkillMatcher {
    fn default() -> Self {
        Self::new(VocabularySet::default())
    }
}

impl SkillMatcher {
    pub fn new(vocabularies: VocabularySet) -> Self {
        let resume_extractor = SkillExtractor::new(&vocabularies.resume);
        let jd_extractor = SkillExtractor::new(&vocabularies.jd);
        Self {
            vocabularies,
            resume_extractor,
            jd_extractor,
        }
    }

    pub fn vocabularies(&self) -> &VocabularySet {
        &self.vocabularies
    }

    pub fn resume_skills(&self, resume_text: &str) -> SkillSet {
        self.resume_extractor.extract(resume_text)
    }

    pub fn jd_skills(&self, jd_text: &str) -> SkillSet {
        self.jd_extractor.extract(jd_text)
    }

    /// Matches a resume against a job description. Never fails: empty input
    /// just produces empty skill sets and a zero score.
    pub fn match_resume_to_jd(&self, resume_text: &str, jd_text: &str) -> MatchResult {
        let resume_skills = self.resume_skills(resume_text);
        let jd_skills = self.jd_skills(jd_text);
        self.match_skills(resume_skills, jd_skills)
    }

    /// Same as `match_resume_to_jd` with the JD side already extracted, for
    /// batches that score many resumes against one JD.
    pub fn match_skills(&self, resume_skills: SkillSet, jd_skills: SkillSet) -> MatchResult {
        let overlap = score(&resume_skills, &jd_skills);
        let reasons = explain(&overlap.matched, &overlap.missing, overlap.score);

        MatchResult {
            match_score: overlap.score,
            resume_skills_count: resume_skills.len(),
            jd_skills_count: jd_skills.len(),
            matched_count: overlap.matched.len(),
            resume_skills,
            jd_skills,
            matched_skills: overlap.matched,
            missing_skills: overlap.missing,
            reasons,
        }
    }
}
