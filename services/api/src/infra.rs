use async_trait::async_trait;
use metrics_exporter_prometheus::PrometheusHandle;
use scholar_ai::workflows::matching::{
    MatchSnapshot, ModelClient, ModelError, ModelRequest, RankingRun, RecommendationRepository,
    RepositoryError, ScholarshipId, StudentId,
};
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Snapshot store backing the service until the document database adapter
/// is wired in. Replacement semantics match the real store: regeneration
/// overwrites, never merges.
#[derive(Default)]
pub(crate) struct InMemoryRecommendationRepository {
    matches: Mutex<HashMap<StudentId, MatchSnapshot>>,
    rankings: Mutex<HashMap<ScholarshipId, RankingRun>>,
}

impl RecommendationRepository for InMemoryRecommendationRepository {
    fn replace_matches(&self, snapshot: MatchSnapshot) -> Result<(), RepositoryError> {
        let mut guard = self.matches.lock().expect("repository mutex poisoned");
        guard.insert(snapshot.student_id.clone(), snapshot);
        Ok(())
    }

    fn fetch_matches(
        &self,
        student_id: &StudentId,
    ) -> Result<Option<MatchSnapshot>, RepositoryError> {
        let guard = self.matches.lock().expect("repository mutex poisoned");
        Ok(guard.get(student_id).cloned())
    }

    fn replace_rankings(&self, run: RankingRun) -> Result<(), RepositoryError> {
        let mut guard = self.rankings.lock().expect("repository mutex poisoned");
        guard.insert(run.scholarship_id.clone(), run);
        Ok(())
    }

    fn fetch_rankings(
        &self,
        scholarship_id: &ScholarshipId,
    ) -> Result<Option<RankingRun>, RepositoryError> {
        let guard = self.rankings.lock().expect("repository mutex poisoned");
        Ok(guard.get(scholarship_id).cloned())
    }
}

/// Client used by the offline demo: every call fails like an unconfigured
/// deployment, which exercises the deterministic fallback path end to end.
pub(crate) struct OfflineModelClient;

#[async_trait]
impl ModelClient for OfflineModelClient {
    async fn complete(&self, _request: &ModelRequest) -> Result<String, ModelError> {
        Err(ModelError::MissingCredential)
    }
}
