use super::domain::{MatchSnapshot, RankingRun, ScholarshipId, StudentId};

/// Storage abstraction for generated snapshots so the service module can be
/// exercised in isolation. Snapshots are full replacements, never merges.
pub trait RecommendationRepository: Send + Sync {
    fn replace_matches(&self, snapshot: MatchSnapshot) -> Result<(), RepositoryError>;
    fn fetch_matches(&self, student_id: &StudentId)
        -> Result<Option<MatchSnapshot>, RepositoryError>;
    fn replace_rankings(&self, run: RankingRun) -> Result<(), RepositoryError>;
    fn fetch_rankings(
        &self,
        scholarship_id: &ScholarshipId,
    ) -> Result<Option<RankingRun>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
