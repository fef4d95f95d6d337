//! Student-to-scholarship matching and applicant ranking.
//!
//! The orchestration service tries the external language model first and
//! falls back to the deterministic scoring rules on any failure, so every
//! caller always receives a complete result set. Matching results are
//! cached per student and scholarship set; rankings always run fresh.

pub mod cache;
pub mod client;
pub(crate) mod contract;
pub mod domain;
pub(crate) mod fallback;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use cache::RecommendationCache;
pub use client::{HttpModelClient, ModelClient, ModelError, ModelRequest};
pub use domain::{
    ApplicantProfile, ApplicationId, MatchDetails, MatchResult, MatchSnapshot, RankResult,
    RankingRun, RecommendationTier, ResultSource, ScholarshipCriteria, ScholarshipId,
    ScoreBreakdown, StudentId, StudentProfile,
};
pub use repository::{RecommendationRepository, RepositoryError};
pub use router::{matching_router, ApplicantRankingRequest, MatchRecommendationRequest};
pub use scoring::{score_applicant, score_match, ApplicantScore, MatchScore};
pub use service::MatchingService;
