use crate::core::{fallback::fallback_colleges, filters::is_eligible, scoring::score_college};
use crate::models::{CollegeRecord, ScoredResult, ScoringWeights, UserProfile};

/// Result of one recommendation pass
#[derive(Debug, Clone)]
pub struct RecommendResult {
    pub results: Vec<ScoredResult>,
    /// Colleges that survived the eligibility filter, before truncation
    pub eligible: usize,
    /// Whether the bundled dataset replaced an empty input
    pub used_fallback: bool,
}

/// Recommendation orchestrator - filter, score, rank
///
/// # Pipeline Stages
/// 1. Fallback substitution (empty input → bundled dataset)
/// 2. Eligibility filtering
/// 3. Per-college scoring
/// 4. Stable ranking and truncation
///
/// The matcher holds no mutable state; one instance can serve any number of
/// concurrent calls.
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
}

impl Matcher {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Rank colleges for a profile
    ///
    /// # Arguments
    /// * `colleges` - Candidate colleges; `None` or empty selects the bundled dataset
    /// * `profile` - The student's profile and preferences
    /// * `top_n` - Maximum number of results; zero or negative yields none
    ///
    /// # Returns
    /// RecommendResult with results sorted by fit score, highest first. Ties
    /// keep the order the colleges were given in.
    pub fn recommend(
        &self,
        colleges: Option<&[CollegeRecord]>,
        profile: &UserProfile,
        top_n: i64,
    ) -> RecommendResult {
        let (colleges, used_fallback) = match colleges {
            Some(list) if !list.is_empty() => (list, false),
            _ => (fallback_colleges(), true),
        };

        let mut scored: Vec<ScoredResult> = colleges
            .iter()
            // Stage 2: Eligibility filtering
            .filter(|college| is_eligible(college, profile))
            // Stage 3: Scoring
            .map(|college| score_college(college, profile, &self.weights))
            .collect();

        let eligible = scored.len();

        // Stable sort: equal scores stay in input order
        scored.sort_by(|a, b| b.fit_score.cmp(&a.fit_score));

        let limit = usize::try_from(top_n).unwrap_or(0);
        scored.truncate(limit);

        tracing::debug!(
            "Ranked {} eligible of {} colleges, returning {} (fallback: {})",
            eligible,
            colleges.len(),
            scored.len(),
            used_fallback
        );

        RecommendResult {
            results: scored,
            eligible,
            used_fallback,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

/// Top `top_n` colleges for a profile, using the standard weights
pub fn recommend(
    colleges: Option<&[CollegeRecord]>,
    profile: &UserProfile,
    top_n: i64,
) -> Vec<ScoredResult> {
    Matcher::with_default_weights()
        .recommend(colleges, profile, top_n)
        .results
}
