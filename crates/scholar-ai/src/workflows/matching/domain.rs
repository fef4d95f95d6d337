use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Identifier wrapper for students.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StudentId(pub String);

/// Identifier wrapper for scholarship offers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScholarshipId(pub String);

/// Identifier wrapper for submitted scholarship applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

/// Assessment snapshot for one student. Immutable per submission; a
/// re-submission replaces the active profile wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentProfile {
    pub course: String,
    pub year_level: String,
    #[serde(default, deserialize_with = "coerce_numeric")]
    pub gpa: f64,
    pub income_range: String,
    #[serde(default)]
    pub skills: String,
    #[serde(default)]
    pub extracurriculars: String,
    #[serde(default)]
    pub preferred_type: String,
    #[serde(default)]
    pub essay: String,
}

/// Published scholarship offer with its selection criteria.
///
/// Empty course/year lists mean every course or year level is eligible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScholarshipCriteria {
    pub scholarship_id: ScholarshipId,
    pub name: String,
    pub organization: String,
    pub scholarship_type: String,
    #[serde(default, deserialize_with = "coerce_numeric")]
    pub min_gpa: f64,
    #[serde(default)]
    pub eligible_courses: Vec<String>,
    #[serde(default)]
    pub eligible_year_levels: Vec<String>,
    #[serde(default, deserialize_with = "coerce_optional_numeric")]
    pub income_ceiling: Option<f64>,
    #[serde(default)]
    pub required_skills: Vec<String>,
    pub slots_total: u32,
    #[serde(default)]
    pub slots_filled: u32,
}

impl ScholarshipCriteria {
    /// Never negative, never above the total.
    pub fn slots_remaining(&self) -> u32 {
        self.slots_total
            .saturating_sub(self.slots_filled.min(self.slots_total))
    }
}

/// Application snapshot as seen by sponsors when ranking applicants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantProfile {
    pub application_id: ApplicationId,
    pub student_name: String,
    #[serde(default, deserialize_with = "coerce_numeric")]
    pub gpa: f64,
    pub income_range: String,
    #[serde(default)]
    pub skills: String,
    #[serde(default)]
    pub essay: String,
}

/// Which individual criteria a student satisfied. Only the GPA and course
/// flags gate eligibility; the rest shape the score and explanation text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchDetails {
    pub gpa_match: bool,
    pub course_match: bool,
    pub year_level_match: bool,
    pub income_match: bool,
    pub skills_match: bool,
}

/// Recommendation tiers in ascending order of fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RecommendationTier {
    #[serde(rename = "Not Recommended")]
    NotRecommended,
    #[serde(rename = "Consider")]
    Consider,
    #[serde(rename = "Recommended")]
    Recommended,
    #[serde(rename = "Highly Recommended")]
    HighlyRecommended,
}

impl RecommendationTier {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            Self::HighlyRecommended
        } else if score >= 60.0 {
            Self::Recommended
        } else if score >= 40.0 {
            Self::Consider
        } else {
            Self::NotRecommended
        }
    }

    pub(crate) fn parse_label(label: &str) -> Option<Self> {
        match label.trim() {
            "Highly Recommended" => Some(Self::HighlyRecommended),
            "Recommended" => Some(Self::Recommended),
            "Consider" => Some(Self::Consider),
            "Not Recommended" => Some(Self::NotRecommended),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::NotRecommended => "Not Recommended",
            Self::Consider => "Consider",
            Self::Recommended => "Recommended",
            Self::HighlyRecommended => "Highly Recommended",
        }
    }
}

/// Provenance tag for a generated result, kept for diagnostics only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultSource {
    Ai,
    Fallback,
}

impl ResultSource {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ai => "ai",
            Self::Fallback => "fallback",
        }
    }
}

/// One student-to-scholarship match. Every scholarship supplied to the
/// matcher produces exactly one of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub scholarship_id: ScholarshipId,
    pub scholarship_name: String,
    pub score: f64,
    pub eligible: bool,
    pub details: MatchDetails,
    pub explanation: String,
    pub recommendation: RecommendationTier,
    pub source: ResultSource,
}

/// Sub-scores backing one applicant's rank, each on a 0-100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub academic: f64,
    pub financial_need: f64,
    pub skills: f64,
    pub essay: f64,
    pub overall_fit: f64,
}

/// One applicant's standing within a ranking run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankResult {
    pub application_id: ApplicationId,
    pub student_name: String,
    pub rank_score: f64,
    pub rank: u32,
    pub eligible: bool,
    pub breakdown: ScoreBreakdown,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub recommendation: String,
    pub source: ResultSource,
}

/// Sorts by descending rank score (stable, so tied scores keep their input
/// order) and reassigns 1-based positions with no gaps or duplicates.
pub(crate) fn assign_rank_positions(results: &mut [RankResult]) {
    results.sort_by(|a, b| {
        b.rank_score
            .partial_cmp(&a.rank_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    for (index, result) in results.iter_mut().enumerate() {
        result.rank = index as u32 + 1;
    }
}

/// Persisted matching output for one student, replaced on regeneration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub student_id: StudentId,
    pub generated_at: DateTime<Utc>,
    pub results: Vec<MatchResult>,
}

/// Persisted ranking output for one scholarship, replaced on regeneration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingRun {
    pub scholarship_id: ScholarshipId,
    pub generated_at: DateTime<Utc>,
    pub results: Vec<RankResult>,
}

/// Accepts a JSON number or a numeric string; anything else becomes 0.0 so
/// malformed assessment data degrades instead of failing the request.
pub(crate) fn coerce_numeric<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<NumericOrText>::deserialize(deserializer)?;
    Ok(raw.map(NumericOrText::into_f64).unwrap_or(0.0))
}

pub(crate) fn coerce_optional_numeric<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<NumericOrText>::deserialize(deserializer)?;
    Ok(raw.map(NumericOrText::into_f64))
}

#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum NumericOrText {
    Number(f64),
    Text(String),
}

impl NumericOrText {
    fn into_f64(self) -> f64 {
        match self {
            NumericOrText::Number(value) if value.is_finite() => value,
            NumericOrText::Number(_) => 0.0,
            NumericOrText::Text(value) => value.trim().parse::<f64>().unwrap_or(0.0),
        }
    }
}
