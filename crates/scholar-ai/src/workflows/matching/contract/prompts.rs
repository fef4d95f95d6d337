use serde_json::json;

use super::super::client::ModelRequest;
use super::super::domain::{ApplicantProfile, ScholarshipCriteria, StudentProfile};

const MATCHING_SYSTEM: &str = "\
You are a scholarship matching assistant for a student financial aid platform. \
You compare one student's assessment profile against a list of scholarships and \
score how well the student fits each one. \
You MUST respond with a valid JSON array only — no markdown fences, no prose.";

const RANKING_SYSTEM: &str = "\
You are an applicant ranking assistant for scholarship sponsors. \
You assess every submitted application against the scholarship's selection \
criteria and score each applicant's overall strength. \
You MUST respond with a valid JSON array only — no markdown fences, no prose.";

pub(crate) fn matching_request(
    student: &StudentProfile,
    scholarships: &[ScholarshipCriteria],
) -> ModelRequest {
    let student_payload = json!({
        "course": student.course,
        "yearLevel": student.year_level,
        "gpa": student.gpa,
        "incomeRange": student.income_range,
        "skills": student.skills,
        "extracurriculars": student.extracurriculars,
        "preferredType": student.preferred_type,
        "essay": student.essay,
    });

    let scholarship_payload: Vec<_> = scholarships
        .iter()
        .map(|scholarship| {
            json!({
                "scholarshipId": scholarship.scholarship_id.0,
                "name": scholarship.name,
                "organization": scholarship.organization,
                "type": scholarship.scholarship_type,
                "minGpa": scholarship.min_gpa,
                "eligibleCourses": scholarship.eligible_courses,
                "eligibleYearLevels": scholarship.eligible_year_levels,
                "incomeCeiling": scholarship.income_ceiling,
                "requiredSkills": scholarship.required_skills,
                "slotsRemaining": scholarship.slots_remaining(),
            })
        })
        .collect();

    let user = format!(
        "STUDENT PROFILE:\n{student}\n\nSCHOLARSHIPS:\n{scholarships}\n\n\
OUTPUT SCHEMA (JSON array, one element per scholarship above):\n\
[{{\n\
  \"scholarshipId\": \"string\",\n\
  \"scholarshipName\": \"string\",\n\
  \"matchScore\": 0-100,\n\
  \"eligible\": true | false,\n\
  \"matchDetails\": {{\"gpaMatch\": bool, \"courseMatch\": bool, \"yearLevelMatch\": bool, \"incomeMatch\": bool, \"skillsMatch\": bool}},\n\
  \"explanation\": \"one or two sentences a student can act on\",\n\
  \"recommendation\": \"Highly Recommended\" | \"Recommended\" | \"Consider\" | \"Not Recommended\"\n\
}}]\n\n\
RULES:\n\
1. Include every scholarship exactly once, even poor fits.\n\
2. eligible means the student clears the GPA minimum and course restriction.\n\
3. Return ONLY the JSON array — nothing else, no code fences.",
        student = student_payload,
        scholarships = json!(scholarship_payload),
    );

    ModelRequest {
        system: MATCHING_SYSTEM.to_string(),
        user,
    }
}

pub(crate) fn ranking_request(
    applications: &[ApplicantProfile],
    scholarship: &ScholarshipCriteria,
) -> ModelRequest {
    let scholarship_payload = json!({
        "name": scholarship.name,
        "organization": scholarship.organization,
        "type": scholarship.scholarship_type,
        "minGpa": scholarship.min_gpa,
        "requiredSkills": scholarship.required_skills,
        "incomeCeiling": scholarship.income_ceiling,
        "slotsRemaining": scholarship.slots_remaining(),
    });

    let application_payload: Vec<_> = applications
        .iter()
        .map(|application| {
            json!({
                "applicationId": application.application_id.0,
                "studentName": application.student_name,
                "gpa": application.gpa,
                "incomeRange": application.income_range,
                "skills": application.skills,
                "essay": application.essay,
            })
        })
        .collect();

    let user = format!(
        "SCHOLARSHIP:\n{scholarship}\n\nAPPLICATIONS:\n{applications}\n\n\
OUTPUT SCHEMA (JSON array, one element per application above):\n\
[{{\n\
  \"applicationId\": \"string\",\n\
  \"studentName\": \"string\",\n\
  \"rankScore\": 0-100,\n\
  \"rank\": 1-based position,\n\
  \"eligible\": true | false,\n\
  \"scoreBreakdown\": {{\"academic\": 0-100, \"financialNeed\": 0-100, \"skills\": 0-100, \"essay\": 0-100, \"overallFit\": 0-100}},\n\
  \"strengths\": [\"string\"],\n\
  \"weaknesses\": [\"string\"],\n\
  \"recommendation\": \"string\"\n\
}}]\n\n\
RULES:\n\
1. Include every application exactly once.\n\
2. Judge the essay and skills on substance, not length.\n\
3. Return ONLY the JSON array — nothing else, no code fences.",
        scholarship = scholarship_payload,
        applications = json!(application_payload),
    );

    ModelRequest {
        system: RANKING_SYSTEM.to_string(),
        user,
    }
}
