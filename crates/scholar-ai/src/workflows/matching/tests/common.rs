use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::workflows::matching::client::{ModelClient, ModelError, ModelRequest};
use crate::workflows::matching::domain::{
    ApplicantProfile, ApplicationId, MatchSnapshot, RankingRun, ScholarshipCriteria,
    ScholarshipId, StudentId, StudentProfile,
};
use crate::workflows::matching::repository::{RecommendationRepository, RepositoryError};
use crate::workflows::matching::MatchingService;

pub(super) fn student() -> StudentProfile {
    StudentProfile {
        course: "Computer Science".to_string(),
        year_level: "3rd Year".to_string(),
        gpa: 3.8,
        income_range: "10,000 - 20,000".to_string(),
        skills: "Rust, data analysis, public speaking".to_string(),
        extracurriculars: "Robotics club officer".to_string(),
        preferred_type: "Academic".to_string(),
        essay: "I want to give back to my community through technology.".to_string(),
    }
}

pub(super) fn scholarship(id: &str, name: &str) -> ScholarshipCriteria {
    ScholarshipCriteria {
        scholarship_id: ScholarshipId(id.to_string()),
        name: name.to_string(),
        organization: "Lakan Foundation".to_string(),
        scholarship_type: "Academic".to_string(),
        min_gpa: 3.0,
        eligible_courses: vec![
            "Computer Science".to_string(),
            "Information Technology".to_string(),
        ],
        eligible_year_levels: vec!["3rd Year".to_string(), "4th Year".to_string()],
        income_ceiling: None,
        required_skills: Vec::new(),
        slots_total: 10,
        slots_filled: 3,
    }
}

pub(super) fn open_scholarship(id: &str, name: &str) -> ScholarshipCriteria {
    ScholarshipCriteria {
        scholarship_id: ScholarshipId(id.to_string()),
        name: name.to_string(),
        organization: "City Hall".to_string(),
        scholarship_type: "Need-Based".to_string(),
        min_gpa: 2.0,
        eligible_courses: Vec::new(),
        eligible_year_levels: Vec::new(),
        income_ceiling: Some(30_000.0),
        required_skills: Vec::new(),
        slots_total: 50,
        slots_filled: 0,
    }
}

pub(super) fn applicant(id: &str, name: &str, gpa: f64) -> ApplicantProfile {
    ApplicantProfile {
        application_id: ApplicationId(id.to_string()),
        student_name: name.to_string(),
        gpa,
        income_range: "10,000 - 20,000".to_string(),
        skills: "Writing, tutoring".to_string(),
        essay: "Education is the way out for my family.".to_string(),
    }
}

#[derive(Default)]
pub(super) struct MemoryRepository {
    matches: Mutex<HashMap<StudentId, MatchSnapshot>>,
    rankings: Mutex<HashMap<ScholarshipId, RankingRun>>,
}

impl MemoryRepository {
    pub(super) fn stored_matches(&self, student_id: &StudentId) -> Option<MatchSnapshot> {
        self.matches
            .lock()
            .expect("repository mutex poisoned")
            .get(student_id)
            .cloned()
    }

    pub(super) fn stored_rankings(&self, scholarship_id: &ScholarshipId) -> Option<RankingRun> {
        self.rankings
            .lock()
            .expect("repository mutex poisoned")
            .get(scholarship_id)
            .cloned()
    }
}

impl RecommendationRepository for MemoryRepository {
    fn replace_matches(&self, snapshot: MatchSnapshot) -> Result<(), RepositoryError> {
        self.matches
            .lock()
            .expect("repository mutex poisoned")
            .insert(snapshot.student_id.clone(), snapshot);
        Ok(())
    }

    fn fetch_matches(
        &self,
        student_id: &StudentId,
    ) -> Result<Option<MatchSnapshot>, RepositoryError> {
        Ok(self.stored_matches(student_id))
    }

    fn replace_rankings(&self, run: RankingRun) -> Result<(), RepositoryError> {
        self.rankings
            .lock()
            .expect("repository mutex poisoned")
            .insert(run.scholarship_id.clone(), run);
        Ok(())
    }

    fn fetch_rankings(
        &self,
        scholarship_id: &ScholarshipId,
    ) -> Result<Option<RankingRun>, RepositoryError> {
        Ok(self.stored_rankings(scholarship_id))
    }
}

pub(super) struct UnavailableRepository;

impl RecommendationRepository for UnavailableRepository {
    fn replace_matches(&self, _snapshot: MatchSnapshot) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch_matches(
        &self,
        _student_id: &StudentId,
    ) -> Result<Option<MatchSnapshot>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn replace_rankings(&self, _run: RankingRun) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch_rankings(
        &self,
        _scholarship_id: &ScholarshipId,
    ) -> Result<Option<RankingRun>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

/// Client returning a canned completion body, counting calls.
pub(super) struct StaticModelClient {
    body: String,
    pub(super) calls: Arc<AtomicUsize>,
}

impl StaticModelClient {
    pub(super) fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl ModelClient for StaticModelClient {
    async fn complete(&self, _request: &ModelRequest) -> Result<String, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.body.clone())
    }
}

#[derive(Debug, Clone, Copy)]
pub(super) enum FailureMode {
    MissingCredential,
    Transport,
    Status,
    Timeout,
}

/// Client failing every call with the configured error kind.
pub(super) struct FailingModelClient {
    mode: FailureMode,
    pub(super) calls: Arc<AtomicUsize>,
}

impl FailingModelClient {
    pub(super) fn new(mode: FailureMode) -> Self {
        Self {
            mode,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl ModelClient for FailingModelClient {
    async fn complete(&self, _request: &ModelRequest) -> Result<String, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(match self.mode {
            FailureMode::MissingCredential => ModelError::MissingCredential,
            FailureMode::Transport => ModelError::Transport("connection refused".to_string()),
            FailureMode::Status => ModelError::Status(503),
            FailureMode::Timeout => ModelError::Timeout(Duration::from_secs(20)),
        })
    }
}

pub(super) fn build_service<C>(
    client: C,
) -> (MatchingService<C, MemoryRepository>, Arc<MemoryRepository>)
where
    C: ModelClient + 'static,
{
    let repository = Arc::new(MemoryRepository::default());
    let service = MatchingService::new(Arc::new(client), repository.clone());
    (service, repository)
}

/// Well-formed matching completion covering the given scholarships.
pub(super) fn ai_match_body(scholarships: &[ScholarshipCriteria]) -> String {
    let rows: Vec<Value> = scholarships
        .iter()
        .enumerate()
        .map(|(index, scholarship)| {
            serde_json::json!({
                "scholarshipId": scholarship.scholarship_id.0,
                "scholarshipName": scholarship.name,
                "matchScore": 90 - (index as i64) * 10,
                "eligible": true,
                "matchDetails": {
                    "gpaMatch": true,
                    "courseMatch": true,
                    "yearLevelMatch": true,
                    "incomeMatch": true,
                    "skillsMatch": true
                },
                "explanation": format!("{} aligns with your profile.", scholarship.name),
                "recommendation": "Highly Recommended"
            })
        })
        .collect();
    serde_json::json!(rows).to_string()
}

/// Well-formed ranking completion covering the given applications.
pub(super) fn ai_rank_body(applications: &[ApplicantProfile]) -> String {
    let rows: Vec<Value> = applications
        .iter()
        .enumerate()
        .map(|(index, application)| {
            serde_json::json!({
                "applicationId": application.application_id.0,
                "studentName": application.student_name,
                "rankScore": 85 - (index as i64) * 15,
                "rank": applications.len() - index,
                "eligible": true,
                "scoreBreakdown": {
                    "academic": 90,
                    "financialNeed": 75,
                    "skills": 70,
                    "essay": 80,
                    "overallFit": 85
                },
                "strengths": ["Consistent academic record"],
                "weaknesses": [],
                "recommendation": "Recommended for Approval"
            })
        })
        .collect();
    serde_json::json!(rows).to_string()
}

pub(super) async fn read_json_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
