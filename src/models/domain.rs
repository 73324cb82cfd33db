use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::regions::{
    degree_label, ownership_label, region_for_state, DEFAULT_BUDGET_CEILING,
};

/// One institution, as acquired from College Scorecard or the bundled dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollegeRecord {
    #[serde(default)]
    pub id: Option<u64>,
    pub name: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(rename = "acceptanceRate", default)]
    pub acceptance_rate: Option<f64>,
    #[serde(rename = "avgGPA", default)]
    pub avg_gpa: Option<f64>,
    #[serde(rename = "avgSAT", default)]
    pub avg_sat: Option<f64>,
    #[serde(rename = "avgACT", default)]
    pub avg_act: Option<f64>,
    #[serde(default)]
    pub cost: Option<f64>,
    #[serde(default)]
    pub majors: Vec<String>,
    #[serde(default)]
    pub ownership: Option<u8>,
    #[serde(rename = "predominantDegree", default)]
    pub predominant_degree: Option<u8>,
    #[serde(default)]
    pub enrollment: Option<u64>,
    #[serde(rename = "graduationRate", default)]
    pub graduation_rate: Option<f64>,
}

impl CollegeRecord {
    /// Minimal record carrying only a name; every optional field is absent
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            state: None,
            city: None,
            website: None,
            acceptance_rate: None,
            avg_gpa: None,
            avg_sat: None,
            avg_act: None,
            cost: None,
            majors: Vec::new(),
            ownership: None,
            predominant_degree: None,
            enrollment: None,
            graduation_rate: None,
        }
    }

    /// Region the college's state belongs to
    pub fn region(&self) -> Region {
        region_for_state(self.state.as_deref())
    }

    /// Human label for the ownership code, `None` when the code is absent
    pub fn ownership_label(&self) -> Option<&'static str> {
        self.ownership.map(|code| ownership_label(code).unwrap_or("Unknown"))
    }

    /// Human label for the predominant degree code, `None` when the code is absent
    pub fn degree_label(&self) -> Option<&'static str> {
        self.predominant_degree
            .map(|code| degree_label(code).unwrap_or("Unknown"))
    }

    /// "City, ST" with whichever parts are known
    pub fn location_line(&self) -> String {
        [self.city.as_deref(), self.state.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// The five fixed geographic buckets, plus `Other` for unmapped states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Northeast,
    Southeast,
    Midwest,
    Southwest,
    West,
    Other,
}

impl Region {
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Northeast => "northeast",
            Region::Southeast => "southeast",
            Region::Midwest => "midwest",
            Region::Southwest => "southwest",
            Region::West => "west",
            Region::Other => "other",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the student wants to study
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LocationPreference {
    #[default]
    Any,
    InState,
    Northeast,
    Southeast,
    Midwest,
    Southwest,
    West,
}

impl LocationPreference {
    /// The region this preference names, if it names one
    pub fn region(&self) -> Option<Region> {
        match self {
            LocationPreference::Any | LocationPreference::InState => None,
            LocationPreference::Northeast => Some(Region::Northeast),
            LocationPreference::Southeast => Some(Region::Southeast),
            LocationPreference::Midwest => Some(Region::Midwest),
            LocationPreference::Southwest => Some(Region::Southwest),
            LocationPreference::West => Some(Region::West),
        }
    }
}

/// Annual budget bracket.
///
/// Unknown wire values are kept rather than rejected; they resolve to the
/// default ceiling when scoring.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BudgetPreference {
    #[default]
    Any,
    Free,
    Under20k,
    Between20kAnd50k,
    Over50k,
    Unrecognized(String),
}

impl BudgetPreference {
    /// Budget ceiling in dollars per year; `None` means cost does not matter
    pub fn ceiling(&self) -> Option<f64> {
        match self {
            BudgetPreference::Any => None,
            BudgetPreference::Free => Some(0.0),
            BudgetPreference::Under20k => Some(20_000.0),
            BudgetPreference::Between20kAnd50k => Some(50_000.0),
            BudgetPreference::Over50k => Some(100_000.0),
            BudgetPreference::Unrecognized(_) => Some(DEFAULT_BUDGET_CEILING),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            BudgetPreference::Any => "any",
            BudgetPreference::Free => "free",
            BudgetPreference::Under20k => "under-20k",
            BudgetPreference::Between20kAnd50k => "20k-50k",
            BudgetPreference::Over50k => "50k-plus",
            BudgetPreference::Unrecognized(raw) => raw,
        }
    }
}

impl From<String> for BudgetPreference {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "any" => BudgetPreference::Any,
            "free" => BudgetPreference::Free,
            "under-20k" | "20k" => BudgetPreference::Under20k,
            "20k-50k" | "50k" => BudgetPreference::Between20kAnd50k,
            "50k-plus" | "50k+" => BudgetPreference::Over50k,
            _ => BudgetPreference::Unrecognized(value),
        }
    }
}

impl From<&str> for BudgetPreference {
    fn from(value: &str) -> Self {
        BudgetPreference::from(value.to_string())
    }
}

impl From<BudgetPreference> for String {
    fn from(value: BudgetPreference) -> Self {
        value.as_str().to_string()
    }
}

/// Whether 2-year institutions are eligible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommunityCollege {
    Yes,
    #[default]
    No,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstitutionType {
    #[default]
    Any,
    Public,
    Private,
}

/// A student's academic profile and preferences for one search
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub gpa: Option<f64>,
    #[serde(default)]
    pub sat: Option<u16>,
    #[serde(default)]
    pub act: Option<u8>,
    #[serde(default)]
    pub major: Option<String>,
    #[serde(default)]
    pub location: LocationPreference,
    #[serde(default)]
    pub budget: BudgetPreference,
    #[serde(rename = "homeState", default)]
    pub home_state: Option<String>,
    #[serde(rename = "communityCollege", default)]
    pub community_college: CommunityCollege,
    #[serde(rename = "institutionType", default)]
    pub institution_type: InstitutionType,
}

/// Unrounded sub-scores, before display rounding
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubScores {
    pub stats: f64,
    pub cost: f64,
    pub major: f64,
    pub location: f64,
}

/// Rounded sub-scores as displayed; not clamped individually
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub stats: i64,
    pub cost: i64,
    pub major: i64,
    pub location: i64,
}

/// Display labels for a college's codes and location
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CollegeLabels {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ownership: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degree: Option<String>,
    #[serde(default)]
    pub location: String,
}

impl CollegeLabels {
    pub fn for_college(college: &CollegeRecord) -> Self {
        Self {
            ownership: college.ownership_label().map(str::to_string),
            degree: college.degree_label().map(str::to_string),
            location: college.location_line(),
        }
    }
}

/// A college paired with its fit for one profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredResult {
    pub college: CollegeRecord,
    #[serde(rename = "fitScore")]
    pub fit_score: u8,
    pub breakdown: ScoreBreakdown,
    #[serde(rename = "matchReasons")]
    pub match_reasons: Vec<String>,
    #[serde(default)]
    pub labels: CollegeLabels,
}

/// Scoring weights
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub stats: f64,
    pub cost: f64,
    pub major: f64,
    pub location: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            stats: 0.35,
            cost: 0.25,
            major: 0.25,
            location: 0.15,
        }
    }
}

/// Where a college list came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Live,
    Fallback,
}
