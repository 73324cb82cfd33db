use crate::models::Region;

/// Acceptance rate assumed when a college does not report one
pub const DEFAULT_ACCEPTANCE_RATE: f64 = 50.0;

/// Annual cost assumed when a college does not report one
pub const DEFAULT_COST: f64 = 40_000.0;

/// Budget ceiling used for budget values we do not recognize
pub const DEFAULT_BUDGET_CEILING: f64 = 50_000.0;

/// Starting point of the stats sub-score before test and GPA adjustments
pub const STATS_BASELINE: f64 = 50.0;

/// Ownership codes used by College Scorecard
pub const OWNERSHIP_PUBLIC: u8 = 1;
pub const OWNERSHIP_PRIVATE_NONPROFIT: u8 = 2;
pub const OWNERSHIP_PRIVATE_FOR_PROFIT: u8 = 3;

/// Predominant degree codes used by College Scorecard
pub const DEGREE_CERTIFICATE: u8 = 1;
pub const DEGREE_ASSOCIATE: u8 = 2;
pub const DEGREE_BACHELOR: u8 = 3;

/// Region to member states
pub static REGION_STATES: [(Region, &[&str]); 5] = [
    (
        Region::Northeast,
        &["CT", "DE", "ME", "MD", "MA", "NH", "NJ", "NY", "PA", "RI", "VT"],
    ),
    (
        Region::Southeast,
        &["AL", "AR", "FL", "GA", "KY", "LA", "MS", "NC", "SC", "TN", "VA", "WV"],
    ),
    (
        Region::Midwest,
        &["IL", "IN", "IA", "KS", "MI", "MN", "MO", "NE", "ND", "OH", "SD", "WI"],
    ),
    (Region::Southwest, &["AZ", "NM", "OK", "TX"]),
    (
        Region::West,
        &["CA", "CO", "ID", "MT", "NV", "OR", "UT", "WA", "WY"],
    ),
];

static OWNERSHIP_LABELS: [(u8, &str); 3] = [
    (OWNERSHIP_PUBLIC, "Public"),
    (OWNERSHIP_PRIVATE_NONPROFIT, "Private nonprofit"),
    (OWNERSHIP_PRIVATE_FOR_PROFIT, "Private for-profit"),
];

static DEGREE_LABELS: [(u8, &str); 3] = [
    (DEGREE_CERTIFICATE, "Certificate"),
    (DEGREE_ASSOCIATE, "Associate (2-year)"),
    (DEGREE_BACHELOR, "Bachelor's (4-year)"),
];

/// Reverse lookup of a state code against the region tables.
///
/// Missing or unmapped states (DC, AK, HI, territories) land in
/// [`Region::Other`]. Codes are matched exactly.
pub fn region_for_state(state: Option<&str>) -> Region {
    let Some(state) = state else {
        return Region::Other;
    };

    REGION_STATES
        .iter()
        .find(|(_, states)| states.contains(&state))
        .map(|(region, _)| *region)
        .unwrap_or(Region::Other)
}

#[inline]
pub fn ownership_label(code: u8) -> Option<&'static str> {
    lookup_label(&OWNERSHIP_LABELS, code)
}

#[inline]
pub fn degree_label(code: u8) -> Option<&'static str> {
    lookup_label(&DEGREE_LABELS, code)
}

fn lookup_label(table: &[(u8, &'static str)], code: u8) -> Option<&'static str> {
    table
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, label)| *label)
}
