//! Core library for the scholarship platform: student-to-scholarship
//! matching and applicant ranking, with an AI-backed path and a
//! deterministic rule-based fallback.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
