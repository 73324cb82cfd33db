use serde::{Deserialize, Serialize};
use crate::models::domain::{DataSource, ScoredResult};

/// Response for the recommendations endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub results: Vec<ScoredResult>,
    #[serde(rename = "totalEligible")]
    pub total_eligible: usize,
    #[serde(rename = "dataSource")]
    pub data_source: DataSource,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "collegeCount")]
    pub college_count: usize,
    /// Absent while the first catalog load is still running
    #[serde(rename = "dataSource", default, skip_serializing_if = "Option::is_none")]
    pub data_source: Option<DataSource>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}

/// Major search response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MajorSearchResponse {
    pub majors: Vec<String>,
}
