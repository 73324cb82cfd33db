use crate::core::scoring::round_half_up;
use crate::models::{BudgetPreference, CollegeRecord, SubScores, UserProfile};

pub const STATS_REASON: &str = "Your stats align well with admitted students.";
pub const BUDGET_FLEXIBILITY_REASON: &str = "Budget flexibility opens more options.";
pub const LOCATION_REASON: &str = "Location matches your preference.";
pub const SELECTIVE_REASON: &str = "Selective school — competitive but achievable.";
pub const LIKELY_ADMISSION_REASON: &str = "Strong chance of admission based on your profile.";
pub const FALLBACK_REASON: &str = "Worth considering based on your profile.";

/// Explain a score in plain language
///
/// Every applicable reason is included, always in the same order: stats,
/// budget, major, location, then selectivity. Acceptance-rate reasons only
/// fire for colleges that actually report a rate. When nothing applies a
/// single generic reason is returned, so the list is never empty.
pub fn build_match_reasons(
    college: &CollegeRecord,
    profile: &UserProfile,
    scores: &SubScores,
) -> Vec<String> {
    let mut reasons = Vec::new();

    if scores.stats >= 70.0 {
        reasons.push(STATS_REASON.to_string());
    }

    if scores.cost >= 80.0 {
        if let Some(cost) = college.cost {
            reasons.push(format!(
                "Fits your budget (est. ${}k/year).",
                round_half_up(cost / 1000.0)
            ));
        } else if profile.budget == BudgetPreference::Any {
            reasons.push(BUDGET_FLEXIBILITY_REASON.to_string());
        }
    }

    if scores.major >= 80.0 {
        if let Some(major) = profile.major.as_deref().filter(|m| !m.is_empty()) {
            reasons.push(format!("Strong program in {}.", major));
        }
    }

    if scores.location >= 80.0 {
        reasons.push(LOCATION_REASON.to_string());
    }

    if let Some(rate) = college.acceptance_rate {
        if rate < 30.0 {
            reasons.push(SELECTIVE_REASON.to_string());
        }
        if rate >= 70.0 {
            reasons.push(LIKELY_ADMISSION_REASON.to_string());
        }
    }

    if reasons.is_empty() {
        reasons.push(FALLBACK_REASON.to_string());
    }

    reasons
}
