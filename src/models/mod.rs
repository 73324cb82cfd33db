// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    BudgetPreference, CollegeLabels, CollegeRecord, CommunityCollege, DataSource, InstitutionType,
    LocationPreference, Region, ScoreBreakdown, ScoredResult, ScoringWeights, SubScores,
    UserProfile,
};
pub use requests::{MajorSearchQuery, RecommendRequest};
pub use responses::{ErrorResponse, HealthResponse, MajorSearchResponse, RecommendResponse};
