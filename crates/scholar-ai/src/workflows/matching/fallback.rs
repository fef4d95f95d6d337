//! Deterministic rule-based scoring used whenever the model path fails.
//!
//! Output matches the model path shape exactly, so callers only see the
//! provenance tag change. This engine is total: identical inputs always
//! produce identical results, and no scholarship or application is dropped.

use super::domain::{
    assign_rank_positions, ApplicantProfile, MatchDetails, MatchResult, RankResult, ResultSource,
    ScholarshipCriteria, StudentProfile,
};
use super::scoring::{score_applicant, score_match};

/// Scores every supplied scholarship and returns results sorted by
/// descending score, one per scholarship.
pub(crate) fn fallback_matches(
    student: &StudentProfile,
    scholarships: &[ScholarshipCriteria],
) -> Vec<MatchResult> {
    let mut results: Vec<MatchResult> = scholarships
        .iter()
        .map(|scholarship| {
            let fit = score_match(student, scholarship);
            MatchResult {
                scholarship_id: scholarship.scholarship_id.clone(),
                scholarship_name: scholarship.name.clone(),
                score: fit.score,
                eligible: fit.eligible,
                details: fit.details,
                explanation: build_explanation(student, scholarship, fit.score, &fit.details),
                recommendation: fit.recommendation(),
                source: ResultSource::Fallback,
            }
        })
        .collect();

    results.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    results
}

/// Scores every supplied application, sorts by descending rank score, and
/// assigns dense 1-based positions.
pub(crate) fn fallback_rankings(
    applications: &[ApplicantProfile],
    scholarship: &ScholarshipCriteria,
) -> Vec<RankResult> {
    let mut results: Vec<RankResult> = applications
        .iter()
        .map(|application| {
            let strength = score_applicant(application, scholarship);

            let strengths = if application.gpa >= 3.5 {
                vec!["Strong academic performance".to_string()]
            } else {
                Vec::new()
            };
            let weaknesses = if !strength.eligible {
                vec!["GPA below requirement".to_string()]
            } else {
                Vec::new()
            };
            let recommendation = if strength.rank_score >= 70.0 {
                "Recommended for Approval".to_string()
            } else {
                "Needs Review".to_string()
            };

            RankResult {
                application_id: application.application_id.clone(),
                student_name: application.student_name.clone(),
                rank_score: strength.rank_score,
                rank: 0,
                eligible: strength.eligible,
                breakdown: strength.breakdown,
                strengths,
                weaknesses,
                recommendation,
                source: ResultSource::Fallback,
            }
        })
        .collect();

    assign_rank_positions(&mut results);
    results
}

/// Assembles a short natural-language explanation from the criterion flags:
/// a strong match leads with its best reason, everything else leads with
/// the primary shortfall and adds one mitigating positive when available.
fn build_explanation(
    student: &StudentProfile,
    scholarship: &ScholarshipCriteria,
    score: f64,
    details: &MatchDetails,
) -> String {
    let mut positives = Vec::new();
    if details.gpa_match {
        positives.push(format!(
            "your GPA of {:.2} clears the {:.2} minimum",
            student.gpa, scholarship.min_gpa
        ));
    }
    if details.course_match {
        if scholarship.eligible_courses.is_empty() {
            positives.push("the scholarship is open to all courses".to_string());
        } else {
            positives.push(format!("{} is an eligible course", student.course));
        }
    }
    if details.year_level_match && !scholarship.eligible_year_levels.is_empty() {
        positives.push("your year level qualifies".to_string());
    }
    if details.skills_match && !scholarship.required_skills.is_empty() {
        positives.push("your skills cover the requirements".to_string());
    }

    let mut negatives = Vec::new();
    if !details.gpa_match {
        negatives.push(format!(
            "your GPA of {:.2} is below the {:.2} minimum",
            student.gpa, scholarship.min_gpa
        ));
    }
    if !details.course_match {
        negatives.push(format!(
            "{} is not among the eligible courses",
            student.course
        ));
    }
    if !details.year_level_match {
        negatives.push("your year level is outside the eligible range".to_string());
    }

    if score >= 80.0 {
        return format!("Excellent fit for {}: {}.", scholarship.name, positives.join(", "));
    }

    match (negatives.first(), positives.first()) {
        (Some(negative), Some(positive)) => {
            format!("Limited fit for {}: {}, but {}.", scholarship.name, negative, positive)
        }
        (Some(negative), None) => format!("Poor fit for {}: {}.", scholarship.name, negative),
        (None, Some(_)) => format!(
            "Reasonable fit for {}: {}.",
            scholarship.name,
            positives.join(", ")
        ),
        (None, None) => format!("Partial fit for {}.", scholarship.name),
    }
}
