use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::domain::{
    BudgetPreference, CommunityCollege, InstitutionType, LocationPreference, UserProfile,
};

/// Request to rank colleges for a student profile
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_profile_submission"))]
pub struct RecommendRequest {
    #[validate(range(min = 0.0, max = 4.2))]
    #[serde(default)]
    pub gpa: Option<f64>,
    #[validate(range(min = 400, max = 1600))]
    #[serde(default)]
    pub sat: Option<u16>,
    #[validate(range(min = 1, max = 36))]
    #[serde(default)]
    pub act: Option<u8>,
    #[serde(default)]
    pub major: Option<String>,
    #[serde(default)]
    pub location: LocationPreference,
    #[serde(default)]
    pub budget: BudgetPreference,
    #[serde(alias = "home_state", rename = "homeState", default)]
    pub home_state: Option<String>,
    #[serde(alias = "community_college", rename = "communityCollege", default)]
    pub community_college: CommunityCollege,
    #[serde(alias = "institution_type", rename = "institutionType", default)]
    pub institution_type: InstitutionType,
    /// Result count; the service's configured default applies when absent
    #[validate(range(min = 1, max = 100))]
    #[serde(default)]
    pub limit: Option<u16>,
}

/// Cross-field checks the derive attributes cannot express.
///
/// A submission needs at least one usable academic signal (GPA of 3.0 or
/// more, an SAT score, or an ACT score), and a home state, when given, must
/// be a two-letter code.
fn validate_profile_submission(req: &RecommendRequest) -> Result<(), ValidationError> {
    let has_gpa = req.gpa.is_some_and(|gpa| gpa >= 3.0);
    let has_sat = req.sat.is_some_and(|sat| sat >= 400);
    let has_act = req.act.is_some_and(|act| act >= 1);
    if !has_gpa && !has_sat && !has_act {
        let mut err = ValidationError::new("missing_academics");
        err.message = Some("Please enter your GPA and/or SAT or ACT score.".into());
        return Err(err);
    }

    if let Some(state) = req.home_state.as_deref().map(str::trim) {
        if !state.is_empty()
            && (state.len() != 2 || !state.chars().all(|c| c.is_ascii_alphabetic()))
        {
            let mut err = ValidationError::new("invalid_home_state");
            err.message = Some("Home state must be a two-letter code.".into());
            return Err(err);
        }
    }

    Ok(())
}

impl RecommendRequest {
    /// Build the immutable profile used for one scoring pass.
    ///
    /// Blank majors are dropped, and the home state is only kept when the
    /// student asked for in-state schools.
    pub fn to_profile(&self) -> UserProfile {
        let major = self
            .major
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string);

        let home_state = if self.location == LocationPreference::InState {
            self.home_state
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_ascii_uppercase)
        } else {
            None
        };

        UserProfile {
            gpa: self.gpa,
            sat: self.sat,
            act: self.act,
            major,
            location: self.location,
            budget: self.budget.clone(),
            home_state,
            community_college: self.community_college,
            institution_type: self.institution_type,
        }
    }
}

/// Query string for the major search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MajorSearchQuery {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
}
