//! Human-readable reasons for a match score.

/// How many skills a "Found:"/"Missing:" line lists before truncating.
pub const MAX_LISTED_SKILLS: usize = 5;

/// Qualitative band for a rounded score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assessment {
    Excellent,
    Good,
    Moderate,
    Poor,
    VeryPoor,
}

impl Assessment {
    /// First threshold met wins: 80, 60, 40, 20.
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            Assessment::Excellent
        } else if score >= 60.0 {
            Assessment::Good
        } else if score >= 40.0 {
            Assessment::Moderate
        } else if score >= 20.0 {
            Assessment::Poor
        } else {
            Assessment::VeryPoor
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Assessment::Excellent => "Excellent match!",
            Assessment::Good => "Good match",
            Assessment::Moderate => "Moderate match",
            Assessment::Poor => "Poor match",
            Assessment::VeryPoor => "Very poor match",
        }
    }
}

/// Builds `[found?, missing?, assessment]`. The assessment line is always last.
pub fn explain(matched: &[String], missing: &[String], score: f64) -> Vec<String> {
    let mut reasons = Vec::with_capacity(3);

    if !matched.is_empty() {
        reasons.push(format!("Found: {}", list_skills(matched)));
    }
    if !missing.is_empty() {
        reasons.push(format!("Missing: {}", list_skills(missing)));
    }
    reasons.push(Assessment::from_score(score).label().to_string());

    reasons
}

fn list_skills(skills: &[String]) -> String {
    let shown = skills
        .iter()
        .take(MAX_LISTED_SKILLS)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");

    if skills.len() > MAX_LISTED_SKILLS {
        format!("{shown}...")
    } else {
        shown
    }
}
