//! Integration specifications for the matching and ranking workflow.
//!
//! Scenarios run through the public service facade with swapped model
//! clients so we can validate the cache, fallback, and persistence behavior
//! without reaching into private modules.

mod common {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use scholar_ai::workflows::matching::{
        ApplicantProfile, ApplicationId, MatchSnapshot, ModelClient, ModelError, ModelRequest,
        RankingRun, RecommendationRepository, RepositoryError, ScholarshipCriteria, ScholarshipId,
        StudentId, StudentProfile,
    };

    pub(super) fn student() -> StudentProfile {
        StudentProfile {
            course: "Information Technology".to_string(),
            year_level: "2nd Year".to_string(),
            gpa: 3.4,
            income_range: "Below 10,000".to_string(),
            skills: "Networking, web development".to_string(),
            extracurriculars: "Student council".to_string(),
            preferred_type: "Need-Based".to_string(),
            essay: "A scholarship would let me stop working night shifts.".to_string(),
        }
    }

    pub(super) fn scholarships() -> Vec<ScholarshipCriteria> {
        vec![
            ScholarshipCriteria {
                scholarship_id: ScholarshipId("sch-tech".to_string()),
                name: "Tech Leaders Grant".to_string(),
                organization: "Bayan Tech Council".to_string(),
                scholarship_type: "Academic".to_string(),
                min_gpa: 3.0,
                eligible_courses: vec![
                    "Information Technology".to_string(),
                    "Computer Science".to_string(),
                ],
                eligible_year_levels: Vec::new(),
                income_ceiling: None,
                required_skills: vec!["web development".to_string()],
                slots_total: 5,
                slots_filled: 1,
            },
            ScholarshipCriteria {
                scholarship_id: ScholarshipId("sch-need".to_string()),
                name: "Community Uplift Fund".to_string(),
                organization: "City Hall".to_string(),
                scholarship_type: "Need-Based".to_string(),
                min_gpa: 2.5,
                eligible_courses: Vec::new(),
                eligible_year_levels: Vec::new(),
                income_ceiling: Some(20_000.0),
                required_skills: Vec::new(),
                slots_total: 30,
                slots_filled: 12,
            },
        ]
    }

    pub(super) fn applications() -> Vec<ApplicantProfile> {
        vec![
            ApplicantProfile {
                application_id: ApplicationId("app-1".to_string()),
                student_name: "Ana Reyes".to_string(),
                gpa: 3.9,
                income_range: "Below 10,000".to_string(),
                skills: "Writing, debate".to_string(),
                essay: "I tutor neighborhood kids every weekend.".to_string(),
            },
            ApplicantProfile {
                application_id: ApplicationId("app-2".to_string()),
                student_name: "Ben Cruz".to_string(),
                gpa: 2.4,
                income_range: "20,001 - 30,000".to_string(),
                skills: "Basketball".to_string(),
                essay: "Sports taught me discipline.".to_string(),
            },
        ]
    }

    #[derive(Default)]
    pub(super) struct MemoryRepository {
        matches: Mutex<HashMap<StudentId, MatchSnapshot>>,
        rankings: Mutex<HashMap<ScholarshipId, RankingRun>>,
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
            Ok(self
                .matches
                .lock()
                .expect("repository mutex poisoned")
                .get(student_id)
                .cloned())
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
            Ok(self
                .rankings
                .lock()
                .expect("repository mutex poisoned")
                .get(scholarship_id)
                .cloned())
        }
    }

    /// Model client standing in for an unreachable endpoint.
    pub(super) struct OfflineModelClient;

    #[async_trait]
    impl ModelClient for OfflineModelClient {
        async fn complete(&self, _request: &ModelRequest) -> Result<String, ModelError> {
            Err(ModelError::Transport("connection refused".to_string()))
        }
    }

    pub(super) fn build_service(
    ) -> scholar_ai::workflows::matching::MatchingService<OfflineModelClient, MemoryRepository>
    {
        scholar_ai::workflows::matching::MatchingService::new(
            Arc::new(OfflineModelClient),
            Arc::new(MemoryRepository::default()),
        )
    }
}

use common::*;
use scholar_ai::workflows::matching::{RecommendationTier, ResultSource, StudentId};

#[tokio::test]
async fn outage_still_delivers_complete_ranked_recommendations() {
    let service = build_service();
    let student_id = StudentId("student-42".to_string());

    let results = service
        .match_student(&student(), &scholarships(), Some(&student_id))
        .await;

    assert_eq!(results.len(), 2);
    assert!(results
        .iter()
        .all(|result| result.source == ResultSource::Fallback));
    assert!(results.windows(2).all(|pair| pair[0].score >= pair[1].score));

    // The need-based fund matches the student's preference and has no
    // course restriction, so it should surface on top.
    assert_eq!(results[0].scholarship_id.0, "sch-need");
    assert_eq!(
        results[0].recommendation,
        RecommendationTier::HighlyRecommended
    );

    let snapshot = service
        .recommendations_for(&student_id)
        .expect("repository reachable")
        .expect("snapshot stored");
    assert_eq!(snapshot.results, results);
}

#[tokio::test]
async fn regeneration_replaces_the_stored_snapshot() {
    let service = build_service();
    let student_id = StudentId("student-42".to_string());
    let scholarships = scholarships();

    service
        .match_student(&student(), &scholarships, Some(&student_id))
        .await;

    let mut improved = student();
    improved.gpa = 4.0;
    service.invalidate_cache();
    let results = service
        .match_student(&improved, &scholarships, Some(&student_id))
        .await;

    let snapshot = service
        .recommendations_for(&student_id)
        .expect("repository reachable")
        .expect("snapshot stored");
    assert_eq!(snapshot.results, results, "old snapshot fully replaced");
}

#[tokio::test]
async fn sponsor_ranking_flow_orders_and_stores_applicants() {
    let service = build_service();
    let scholarship = &scholarships()[0];

    let results = service
        .rank_applicants(&applications(), scholarship)
        .await;

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].student_name, "Ana Reyes");
    assert_eq!(results[0].rank, 1);
    assert!(results[0].eligible);
    assert_eq!(results[1].student_name, "Ben Cruz");
    assert_eq!(results[1].rank, 2);
    assert!(!results[1].eligible);

    let run = service
        .rankings_for(&scholarship.scholarship_id)
        .expect("repository reachable")
        .expect("run stored");
    assert_eq!(run.results, results);
}
