use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::client::ModelClient;
use super::domain::{ApplicantProfile, ScholarshipCriteria, ScholarshipId, StudentId, StudentProfile};
use super::repository::RecommendationRepository;
use super::service::MatchingService;

/// Matching request as submitted by the student-facing pages. The student
/// id is optional: anonymous assessments still get scored, they just skip
/// the cache and snapshot store.
#[derive(Debug, Deserialize)]
pub struct MatchRecommendationRequest {
    #[serde(default)]
    pub student_id: Option<StudentId>,
    pub profile: StudentProfile,
    pub scholarships: Vec<ScholarshipCriteria>,
}

/// Ranking request as submitted by sponsor review pages.
#[derive(Debug, Deserialize)]
pub struct ApplicantRankingRequest {
    pub scholarship: ScholarshipCriteria,
    pub applications: Vec<ApplicantProfile>,
}

/// Router builder exposing HTTP endpoints for matching and ranking.
pub fn matching_router<C, R>(service: Arc<MatchingService<C, R>>) -> Router
where
    C: ModelClient + 'static,
    R: RecommendationRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/matching/recommendations",
            post(recommend_handler::<C, R>),
        )
        .route(
            "/api/v1/matching/recommendations/:student_id",
            get(stored_recommendations_handler::<C, R>),
        )
        .route("/api/v1/matching/rankings", post(rank_handler::<C, R>))
        .route(
            "/api/v1/matching/rankings/:scholarship_id",
            get(stored_rankings_handler::<C, R>),
        )
        .with_state(service)
}

pub(crate) async fn recommend_handler<C, R>(
    State(service): State<Arc<MatchingService<C, R>>>,
    axum::Json(request): axum::Json<MatchRecommendationRequest>,
) -> Response
where
    C: ModelClient + 'static,
    R: RecommendationRepository + 'static,
{
    let results = service
        .match_student(
            &request.profile,
            &request.scholarships,
            request.student_id.as_ref(),
        )
        .await;
    (StatusCode::OK, axum::Json(results)).into_response()
}

pub(crate) async fn rank_handler<C, R>(
    State(service): State<Arc<MatchingService<C, R>>>,
    axum::Json(request): axum::Json<ApplicantRankingRequest>,
) -> Response
where
    C: ModelClient + 'static,
    R: RecommendationRepository + 'static,
{
    let results = service
        .rank_applicants(&request.applications, &request.scholarship)
        .await;
    (StatusCode::OK, axum::Json(results)).into_response()
}

pub(crate) async fn stored_recommendations_handler<C, R>(
    State(service): State<Arc<MatchingService<C, R>>>,
    Path(student_id): Path<String>,
) -> Response
where
    C: ModelClient + 'static,
    R: RecommendationRepository + 'static,
{
    let id = StudentId(student_id);
    match service.recommendations_for(&id) {
        Ok(Some(snapshot)) => (StatusCode::OK, axum::Json(snapshot)).into_response(),
        Ok(None) => {
            let payload = json!({
                "error": "no recommendations generated yet",
                "student_id": id.0,
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(err) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn stored_rankings_handler<C, R>(
    State(service): State<Arc<MatchingService<C, R>>>,
    Path(scholarship_id): Path<String>,
) -> Response
where
    C: ModelClient + 'static,
    R: RecommendationRepository + 'static,
{
    let id = ScholarshipId(scholarship_id);
    match service.rankings_for(&id) {
        Ok(Some(run)) => (StatusCode::OK, axum::Json(run)).into_response(),
        Ok(None) => {
            let payload = json!({
                "error": "no ranking run recorded yet",
                "scholarship_id": id.0,
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(err) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
