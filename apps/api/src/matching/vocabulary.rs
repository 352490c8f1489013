//! Skill vocabularies: named, versioned, ordered lists of lowercase skill tokens.
//!
//! Two built-in vocabularies exist: a smaller one for job descriptions and a
//! larger one for resumes. The resume list is a superset of the JD list, so a
//! resume can mention skills (e.g. "rust", "ci/cd") that the JD side never
//! extracts. Callers that want symmetric matching can inject the same
//! vocabulary for both roles through `VocabularySet`.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// Tokens extracted from job descriptions.
pub const JD_SKILLS: &[&str] = &[
    "python",
    "java",
    "javascript",
    "sql",
    "aws",
    "docker",
    "kubernetes",
    "react",
    "node.js",
    "django",
    "flask",
    "mongodb",
    "mysql",
    "postgresql",
    "git",
    "jenkins",
    "linux",
    "html",
    "css",
    "typescript",
    "angular",
    "vue",
];

/// Tokens appended to `JD_SKILLS` to form the resume vocabulary.
pub const RESUME_EXTRA_SKILLS: &[&str] = &[
    "c++",
    "c#",
    "php",
    "ruby",
    "go",
    "rust",
    "swift",
    "kotlin",
    "azure",
    "gcp",
    "cloud",
    "machine learning",
    "ml",
    "ai",
    "tensorflow",
    "pytorch",
    "pandas",
    "numpy",
    "scikit-learn",
    "data analysis",
    "rest api",
    "graphql",
    "microservices",
    "ci/cd",
    "devops",
];

pub const BUILTIN_VERSION: u32 = 1;

/// Ordered, duplicate-free set of lowercase skill tokens.
///
/// Order is significant: extraction output and display truncation both follow it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillVocabulary {
    name: String,
    version: u32,
    skills: Vec<String>,
}

/// On-disk form of a vocabulary override.
#[derive(Debug, Deserialize)]
struct VocabularyFile {
    name: String,
    #[serde(default = "default_file_version")]
    version: u32,
    skills: Vec<String>,
}

fn default_file_version() -> u32 {
    1
}

impl SkillVocabulary {
    /// Builds a vocabulary, lowercasing and trimming tokens. Empty tokens are
    /// dropped and repeats keep their first position.
    pub fn new<I, S>(name: impl Into<String>, version: u32, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let skills = skills
            .into_iter()
            .map(|s| s.as_ref().trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .filter(|s| seen.insert(s.clone()))
            .collect();

        Self {
            name: name.into(),
            version,
            skills,
        }
    }

    pub fn builtin_jd() -> Self {
        Self::new("jd", BUILTIN_VERSION, JD_SKILLS.iter())
    }

    pub fn builtin_resume() -> Self {
        Self::new(
            "resume",
            BUILTIN_VERSION,
            JD_SKILLS.iter().chain(RESUME_EXTRA_SKILLS.iter()),
        )
    }

    /// Loads a vocabulary from a JSON file of the form
    /// `{"name": "...", "version": 2, "skills": ["..."]}`.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read vocabulary file {}", path.display()))?;
        let file: VocabularyFile = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid vocabulary file {}", path.display()))?;
        let vocabulary = Self::new(file.name, file.version, file.skills);
        if vocabulary.is_empty() {
            bail!("Vocabulary file {} lists no skills", path.display());
        }
        Ok(vocabulary)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn all_skills(&self) -> &[String] {
        &self.skills
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

/// Per-role vocabularies handed to the matcher.
#[derive(Debug, Clone, Serialize)]
pub struct VocabularySet {
    pub resume: SkillVocabulary,
    pub jd: SkillVocabulary,
}

impl Default for VocabularySet {
    fn default() -> Self {
        Self {
            resume: SkillVocabulary::builtin_resume(),
            jd: SkillVocabulary::builtin_jd(),
        }
    }
}

impl VocabularySet {
    /// Built-ins, with either role optionally replaced from a JSON file.
    pub fn load(resume_file: Option<&Path>, jd_file: Option<&Path>) -> Result<Self> {
        let mut set = Self::default();
        if let Some(path) = resume_file {
            set.resume = SkillVocabulary::from_json_file(path)?;
        }
        if let Some(path) = jd_file {
            set.jd = SkillVocabulary::from_json_file(path)?;
        }
        Ok(set)
    }
}
