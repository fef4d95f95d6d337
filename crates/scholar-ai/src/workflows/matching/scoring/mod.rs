mod rules;

pub(crate) use rules::{bracket_within_ceiling, financial_need_score, skills_covered};

use super::domain::{
    ApplicantProfile, MatchDetails, RecommendationTier, ScholarshipCriteria, ScoreBreakdown,
    StudentProfile,
};
use rules::{course_permits, safe_numeric, year_level_permits};

/// Sub-score used when a dimension has no deterministic signal (skills and
/// essay quality are judged qualitatively on the model path only).
pub(crate) const NEUTRAL_SUB_SCORE: f64 = 50.0;

/// Fit of one student against one scholarship's criteria.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchScore {
    pub score: f64,
    pub eligible: bool,
    pub details: MatchDetails,
}

impl MatchScore {
    pub fn recommendation(&self) -> RecommendationTier {
        RecommendationTier::from_score(self.score)
    }
}

/// Scores a student profile against a scholarship, starting from a neutral
/// base of 50 and adjusting per criterion. Total over well-formed input;
/// non-numeric GPA fields have already been coerced to 0 at the edge.
pub fn score_match(student: &StudentProfile, scholarship: &ScholarshipCriteria) -> MatchScore {
    let gpa = safe_numeric(student.gpa);
    let min_gpa = safe_numeric(scholarship.min_gpa);

    let mut score: f64 = 50.0;

    let gpa_match = gpa >= min_gpa;
    score += if gpa_match { 15.0 } else { -20.0 };

    let course_match = if scholarship.eligible_courses.is_empty() {
        // No course restriction: every course qualifies.
        score += 10.0;
        true
    } else if course_permits(&scholarship.eligible_courses, &student.course) {
        score += 15.0;
        true
    } else {
        score -= 15.0;
        false
    };

    let year_level_match = if scholarship.eligible_year_levels.is_empty() {
        score += 5.0;
        true
    } else if year_level_permits(&scholarship.eligible_year_levels, &student.year_level) {
        score += 10.0;
        true
    } else {
        score -= 10.0;
        false
    };

    let preference = student.preferred_type.trim();
    if !preference.is_empty() && preference.eq_ignore_ascii_case(scholarship.scholarship_type.trim())
    {
        score += 10.0;
    }

    let details = MatchDetails {
        gpa_match,
        course_match,
        year_level_match,
        income_match: bracket_within_ceiling(&student.income_range, scholarship.income_ceiling),
        skills_match: skills_covered(&scholarship.required_skills, &student.skills),
    };

    MatchScore {
        score: score.clamp(0.0, 100.0),
        // Year level, income, and skills shape the score only; they never
        // gate eligibility.
        eligible: gpa_match && course_match,
        details,
    }
}

/// Strength of one applicant against a scholarship's selection criteria.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApplicantScore {
    pub rank_score: f64,
    pub eligible: bool,
    pub breakdown: ScoreBreakdown,
}

/// Scores an applicant for ranking. Academic performance carries 40% of the
/// weight but contributes nothing when the applicant misses the GPA
/// minimum; financial need carries 20%; skills and essay stay at the
/// neutral placeholder on this deterministic path.
pub fn score_applicant(
    application: &ApplicantProfile,
    scholarship: &ScholarshipCriteria,
) -> ApplicantScore {
    let gpa = safe_numeric(application.gpa);
    let min_gpa = safe_numeric(scholarship.min_gpa);

    let academic = ((gpa / 4.0) * 100.0).clamp(0.0, 100.0);
    let eligible = gpa >= min_gpa;
    let financial_need = financial_need_score(&application.income_range);

    let academic_contribution = if eligible { academic * 0.4 } else { 0.0 };
    let total = academic_contribution
        + financial_need * 0.2
        + NEUTRAL_SUB_SCORE * 0.2
        + NEUTRAL_SUB_SCORE * 0.2;
    let rank_score = total.round().clamp(0.0, 100.0);

    ApplicantScore {
        rank_score,
        eligible,
        breakdown: ScoreBreakdown {
            academic,
            financial_need,
            skills: NEUTRAL_SUB_SCORE,
            essay: NEUTRAL_SUB_SCORE,
            overall_fit: rank_score,
        },
    }
}
