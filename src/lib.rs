//! College Picker - college recommendation engine and service
//!
//! This library ranks colleges for a student profile. Colleges are filtered
//! for eligibility, scored on academics, cost, major and location, and
//! returned best fit first with plain-language match reasons. The service
//! layer acquires colleges from the College Scorecard API and falls back to
//! a bundled dataset when that is not possible.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{recommend, render_export, Matcher, RecommendResult};
pub use models::{CollegeRecord, ScoredResult, ScoringWeights, UserProfile, RecommendRequest, RecommendResponse};
