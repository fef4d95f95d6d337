use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};

use super::cache::RecommendationCache;
use super::client::{ModelClient, ModelError, ModelRequest};
use super::contract::{self, ContractError};
use super::domain::{
    ApplicantProfile, MatchResult, MatchSnapshot, RankResult, RankingRun, ScholarshipCriteria,
    ScholarshipId, StudentId, StudentProfile,
};
use super::fallback;
use super::repository::{RecommendationRepository, RepositoryError};

/// Why the model path was abandoned for a fallback run. Never escapes the
/// service; logged for diagnostics only.
#[derive(Debug, thiserror::Error)]
enum ModelPathError {
    #[error(transparent)]
    Call(#[from] ModelError),
    #[error(transparent)]
    Contract(#[from] ContractError),
}

/// Service composing the model client, recommendation cache, and snapshot
/// repository. Both entry points always return a fully populated result
/// set: every model-path failure degrades silently to the deterministic
/// fallback and is only observable through the provenance tag.
pub struct MatchingService<C, R> {
    client: Arc<C>,
    repository: Arc<R>,
    cache: RecommendationCache,
}

impl<C, R> MatchingService<C, R>
where
    C: ModelClient + 'static,
    R: RecommendationRepository + 'static,
{
    pub fn new(client: Arc<C>, repository: Arc<R>) -> Self {
        Self::with_cache(client, repository, RecommendationCache::default())
    }

    pub fn with_cache(client: Arc<C>, repository: Arc<R>, cache: RecommendationCache) -> Self {
        Self {
            client,
            repository,
            cache,
        }
    }

    /// Matches a student against every supplied scholarship, producing
    /// exactly one result per scholarship sorted by descending score.
    ///
    /// With a student id the cache is consulted first and the generated
    /// snapshot is persisted; without one the run is anonymous and neither
    /// cached nor stored.
    pub async fn match_student(
        &self,
        profile: &StudentProfile,
        scholarships: &[ScholarshipCriteria],
        student_id: Option<&StudentId>,
    ) -> Vec<MatchResult> {
        if scholarships.is_empty() {
            return Vec::new();
        }

        let scholarship_ids: Vec<ScholarshipId> = scholarships
            .iter()
            .map(|scholarship| scholarship.scholarship_id.clone())
            .collect();

        if let Some(student_id) = student_id {
            if let Some(results) = self.cache.get(student_id, &scholarship_ids) {
                debug!(student = %student_id.0, "serving cached match results");
                return results;
            }
        }

        let request = contract::matching_request(profile, scholarships);
        let mut results = match self.complete_and_parse_matches(&request, scholarships).await {
            Ok(results) => results,
            Err(reason) => {
                warn!(error = %reason, "model matching failed, serving rule-based results");
                fallback::fallback_matches(profile, scholarships)
            }
        };

        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        if let Some(student_id) = student_id {
            // Fallback output is cached too, so an outage does not hammer
            // the model endpoint within the TTL window.
            self.cache
                .set(student_id, &scholarship_ids, results.clone());
            self.persist_matches(student_id, &results);
        }

        results
    }

    /// Ranks every supplied application for a scholarship. Rank positions
    /// are always dense and 1-based in descending score order, whichever
    /// path produced them. An empty application list short-circuits without
    /// touching the model.
    pub async fn rank_applicants(
        &self,
        applications: &[ApplicantProfile],
        scholarship: &ScholarshipCriteria,
    ) -> Vec<RankResult> {
        if applications.is_empty() {
            return Vec::new();
        }

        let request = contract::ranking_request(applications, scholarship);
        let results = match self.complete_and_parse_ranks(&request, applications).await {
            Ok(results) => results,
            Err(reason) => {
                warn!(error = %reason, "model ranking failed, serving rule-based results");
                fallback::fallback_rankings(applications, scholarship)
            }
        };

        self.persist_rankings(&scholarship.scholarship_id, &results);
        results
    }

    /// Stored matching snapshot for a student, if one has been generated.
    pub fn recommendations_for(
        &self,
        student_id: &StudentId,
    ) -> Result<Option<MatchSnapshot>, RepositoryError> {
        self.repository.fetch_matches(student_id)
    }

    /// Stored ranking run for a scholarship, if one has been generated.
    pub fn rankings_for(
        &self,
        scholarship_id: &ScholarshipId,
    ) -> Result<Option<RankingRun>, RepositoryError> {
        self.repository.fetch_rankings(scholarship_id)
    }

    /// Drops all cached match results. Exposed for collaborators that edit
    /// scholarship data; the service never decides this on its own.
    pub fn invalidate_cache(&self) {
        self.cache.clear();
    }

    async fn complete_and_parse_matches(
        &self,
        request: &ModelRequest,
        scholarships: &[ScholarshipCriteria],
    ) -> Result<Vec<MatchResult>, ModelPathError> {
        let body = self.client.complete(request).await?;
        Ok(contract::parse_match_response(&body, scholarships)?)
    }

    async fn complete_and_parse_ranks(
        &self,
        request: &ModelRequest,
        applications: &[ApplicantProfile],
    ) -> Result<Vec<RankResult>, ModelPathError> {
        let body = self.client.complete(request).await?;
        Ok(contract::parse_rank_response(&body, applications)?)
    }

    fn persist_matches(&self, student_id: &StudentId, results: &[MatchResult]) {
        let snapshot = MatchSnapshot {
            student_id: student_id.clone(),
            generated_at: Utc::now(),
            results: results.to_vec(),
        };
        if let Err(err) = self.repository.replace_matches(snapshot) {
            // The caller still gets its results; the snapshot is best-effort.
            warn!(error = %err, student = %student_id.0, "failed to persist match snapshot");
        }
    }

    fn persist_rankings(&self, scholarship_id: &ScholarshipId, results: &[RankResult]) {
        let run = RankingRun {
            scholarship_id: scholarship_id.clone(),
            generated_at: Utc::now(),
            results: results.to_vec(),
        };
        if let Err(err) = self.repository.replace_rankings(run) {
            warn!(error = %err, scholarship = %scholarship_id.0, "failed to persist ranking run");
        }
    }
}
