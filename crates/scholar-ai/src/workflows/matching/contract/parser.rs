use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::super::domain::{
    assign_rank_positions, ApplicantProfile, ApplicationId, MatchDetails, MatchResult, RankResult,
    RecommendationTier, ResultSource, ScholarshipCriteria, ScholarshipId, ScoreBreakdown,
};

/// Violations of the model response contract. Any of these aborts the AI
/// path wholesale; there is no partial acceptance.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ContractError {
    #[error("response is not a parseable JSON array: {0}")]
    Malformed(String),
    #[error("response omitted scholarship '{0}'")]
    MissingScholarship(String),
    #[error("response omitted application '{0}'")]
    MissingApplication(String),
}

/// Parses a matching completion into one result per supplied scholarship,
/// in the supplied order.
pub(crate) fn parse_match_response(
    body: &str,
    scholarships: &[ScholarshipCriteria],
) -> Result<Vec<MatchResult>, ContractError> {
    let rows: Vec<AiMatchRow> = parse_array(body)?;
    let mut by_id: HashMap<String, AiMatchRow> = rows
        .into_iter()
        .map(|row| (row.scholarship_id.clone(), row))
        .collect();

    let mut results = Vec::with_capacity(scholarships.len());
    for scholarship in scholarships {
        let row = by_id.remove(&scholarship.scholarship_id.0).ok_or_else(|| {
            ContractError::MissingScholarship(scholarship.scholarship_id.0.clone())
        })?;
        results.push(row.into_result());
    }
    Ok(results)
}

/// Parses a ranking completion into one result per supplied application.
/// The model's own rank field is discarded: positions are reassigned dense
/// and 1-based after sorting by descending score.
pub(crate) fn parse_rank_response(
    body: &str,
    applications: &[ApplicantProfile],
) -> Result<Vec<RankResult>, ContractError> {
    let rows: Vec<AiRankRow> = parse_array(body)?;
    let mut by_id: HashMap<String, AiRankRow> = rows
        .into_iter()
        .map(|row| (row.application_id.clone(), row))
        .collect();

    let mut results = Vec::with_capacity(applications.len());
    for application in applications {
        let row = by_id.remove(&application.application_id.0).ok_or_else(|| {
            ContractError::MissingApplication(application.application_id.0.clone())
        })?;
        results.push(row.into_result());
    }

    assign_rank_positions(&mut results);
    Ok(results)
}

/// Strict whole-body parse first; failing that, the first bracket-matched
/// JSON array substring. Anything else is a contract violation.
fn parse_array<T: DeserializeOwned>(body: &str) -> Result<Vec<T>, ContractError> {
    match serde_json::from_str::<Vec<T>>(body.trim()) {
        Ok(rows) => Ok(rows),
        Err(strict_err) => {
            let slice = extract_json_array(body)
                .ok_or_else(|| ContractError::Malformed(strict_err.to_string()))?;
            serde_json::from_str::<Vec<T>>(slice)
                .map_err(|err| ContractError::Malformed(err.to_string()))
        }
    }
}

/// Returns the first balanced `[...]` substring, tracking JSON string and
/// escape state so brackets inside string literals do not count.
fn extract_json_array(body: &str) -> Option<&str> {
    let start = body.find('[')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in body[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&body[start..start + offset + ch.len_utf8()]);
                }
            }
            _ => {}
        }
    }
    None
}

#[derive(Debug, Deserialize)]
struct AiMatchRow {
    #[serde(rename = "scholarshipId")]
    scholarship_id: String,
    #[serde(rename = "scholarshipName")]
    scholarship_name: String,
    #[serde(rename = "matchScore")]
    match_score: f64,
    eligible: bool,
    #[serde(rename = "matchDetails")]
    match_details: AiMatchDetails,
    explanation: String,
    recommendation: String,
}

impl AiMatchRow {
    fn into_result(self) -> MatchResult {
        let score = clamp_score(self.match_score);
        let recommendation = RecommendationTier::parse_label(&self.recommendation)
            .unwrap_or_else(|| RecommendationTier::from_score(score));

        MatchResult {
            scholarship_id: ScholarshipId(self.scholarship_id),
            scholarship_name: self.scholarship_name,
            score,
            eligible: self.eligible,
            details: MatchDetails {
                gpa_match: self.match_details.gpa_match,
                course_match: self.match_details.course_match,
                year_level_match: self.match_details.year_level_match,
                income_match: self.match_details.income_match,
                skills_match: self.match_details.skills_match,
            },
            explanation: self.explanation,
            recommendation,
            source: ResultSource::Ai,
        }
    }
}

#[derive(Debug, Deserialize)]
struct AiMatchDetails {
    #[serde(rename = "gpaMatch")]
    gpa_match: bool,
    #[serde(rename = "courseMatch")]
    course_match: bool,
    #[serde(rename = "yearLevelMatch")]
    year_level_match: bool,
    #[serde(rename = "incomeMatch")]
    income_match: bool,
    #[serde(rename = "skillsMatch")]
    skills_match: bool,
}

#[derive(Debug, Deserialize)]
struct AiRankRow {
    #[serde(rename = "applicationId")]
    application_id: String,
    #[serde(rename = "studentName")]
    student_name: String,
    #[serde(rename = "rankScore")]
    rank_score: f64,
    // Present per the contract but untrusted; positions are reassigned.
    #[serde(rename = "rank", default)]
    _rank: f64,
    eligible: bool,
    #[serde(rename = "scoreBreakdown")]
    score_breakdown: AiScoreBreakdown,
    strengths: Vec<String>,
    weaknesses: Vec<String>,
    recommendation: String,
}

impl AiRankRow {
    fn into_result(self) -> RankResult {
        RankResult {
            application_id: ApplicationId(self.application_id),
            student_name: self.student_name,
            rank_score: clamp_score(self.rank_score),
            rank: 0,
            eligible: self.eligible,
            breakdown: ScoreBreakdown {
                academic: clamp_score(self.score_breakdown.academic),
                financial_need: clamp_score(self.score_breakdown.financial_need),
                skills: clamp_score(self.score_breakdown.skills),
                essay: clamp_score(self.score_breakdown.essay),
                overall_fit: clamp_score(self.score_breakdown.overall_fit),
            },
            strengths: self.strengths,
            weaknesses: self.weaknesses,
            recommendation: self.recommendation,
            source: ResultSource::Ai,
        }
    }
}

#[derive(Debug, Deserialize)]
struct AiScoreBreakdown {
    academic: f64,
    #[serde(rename = "financialNeed")]
    financial_need: f64,
    skills: f64,
    essay: f64,
    #[serde(rename = "overallFit")]
    overall_fit: f64,
}

fn clamp_score(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        0.0
    }
}
