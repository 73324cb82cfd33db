use crate::core::reasons::build_match_reasons;
use crate::core::regions::{DEFAULT_ACCEPTANCE_RATE, DEFAULT_COST, STATS_BASELINE};
use crate::models::{
    CollegeLabels, CollegeRecord, LocationPreference, ScoreBreakdown, ScoredResult, ScoringWeights, SubScores,
    UserProfile,
};

/// Largest swing a single stats adjustment (GPA, SAT or ACT) may contribute
const MAX_STAT_ADJUSTMENT: f64 = 25.0;

/// Score a college against a profile
///
/// Scoring formula:
/// fit = round(clamp(0, 100,
///     stats * 0.35 +      # GPA / test scores vs. the college's averages
///     cost * 0.25 +       # Annual cost vs. the budget ceiling
///     major * 0.25 +      # Program availability
///     location * 0.15     # Region or in-state preference
/// ))
pub fn score_college(
    college: &CollegeRecord,
    profile: &UserProfile,
    weights: &ScoringWeights,
) -> ScoredResult {
    let scores = sub_scores(college, profile);

    ScoredResult {
        college: college.clone(),
        fit_score: fit_score(&scores, weights),
        breakdown: breakdown(&scores),
        match_reasons: build_match_reasons(college, profile, &scores),
        labels: CollegeLabels::for_college(college),
    }
}

/// Compute the four unrounded sub-scores
pub fn sub_scores(college: &CollegeRecord, profile: &UserProfile) -> SubScores {
    SubScores {
        stats: stats_score(college, profile),
        cost: cost_score(college, profile),
        major: major_score(college, profile),
        location: location_score(college, profile),
    }
}

/// Weighted total, clamped to 0-100 and rounded
#[inline]
pub fn fit_score(scores: &SubScores, weights: &ScoringWeights) -> u8 {
    let total = scores.stats * weights.stats
        + scores.cost * weights.cost
        + scores.major * weights.major
        + scores.location * weights.location;

    round_half_up(total.clamp(0.0, 100.0)) as u8
}

/// Display form of the sub-scores: rounded, never clamped
#[inline]
pub fn breakdown(scores: &SubScores) -> ScoreBreakdown {
    ScoreBreakdown {
        stats: round_half_up(scores.stats) as i64,
        cost: round_half_up(scores.cost) as i64,
        major: round_half_up(scores.major) as i64,
        location: round_half_up(scores.location) as i64,
    }
}

/// Round to the nearest integer, halves going toward positive infinity
#[inline]
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// SAT equivalent of an ACT composite
#[inline]
pub fn equivalent_sat(act: f64) -> f64 {
    round_half_up(act * 22.5 + 405.0)
}

/// ACT equivalent of an SAT total
#[inline]
pub fn equivalent_act(sat: f64) -> f64 {
    round_half_up((sat - 405.0) / 22.5)
}

#[inline]
fn clamp_adjustment(delta: f64) -> f64 {
    delta.clamp(-MAX_STAT_ADJUSTMENT, MAX_STAT_ADJUSTMENT)
}

/// Stats sub-score
///
/// Starts at the baseline and moves with each known GPA/SAT/ACT pair. When
/// the student gave only one test, the other is derived from it. Very
/// selective schools pull a middling score down; very open schools trim a
/// high one.
pub fn stats_score(college: &CollegeRecord, profile: &UserProfile) -> f64 {
    let user_sat = profile
        .sat
        .map(f64::from)
        .or_else(|| profile.act.map(|act| equivalent_sat(f64::from(act))));
    let user_act = profile
        .act
        .map(f64::from)
        .or_else(|| profile.sat.map(|sat| equivalent_act(f64::from(sat))));

    let mut score = STATS_BASELINE;

    if let (Some(gpa), Some(avg_gpa)) = (profile.gpa, college.avg_gpa) {
        score += clamp_adjustment((avg_gpa - gpa) * 15.0);
    }
    if let (Some(sat), Some(avg_sat)) = (user_sat, college.avg_sat) {
        score += clamp_adjustment((sat - avg_sat) / 40.0 * 5.0);
    }
    if let (Some(act), Some(avg_act)) = (user_act, college.avg_act) {
        score += clamp_adjustment((act - avg_act) * 5.0);
    }

    let acceptance_rate = college.acceptance_rate.unwrap_or(DEFAULT_ACCEPTANCE_RATE);
    if acceptance_rate < 15.0 && score < 60.0 {
        score -= 10.0;
    }
    if acceptance_rate > 80.0 && score > 80.0 {
        score -= 5.0;
    }

    score
}

/// Cost sub-score against the budget ceiling
pub fn cost_score(college: &CollegeRecord, profile: &UserProfile) -> f64 {
    let Some(ceiling) = profile.budget.ceiling() else {
        return 100.0;
    };

    let cost = college.cost.unwrap_or(DEFAULT_COST);

    if ceiling == 0.0 {
        // Full-ride seekers: only near-free schools score well
        if cost <= 5_000.0 {
            100.0
        } else {
            (60.0 - cost / 5_000.0).max(0.0)
        }
    } else if cost <= ceiling {
        100.0
    } else {
        (100.0 - (cost - ceiling) / 1_000.0).max(0.0)
    }
}

/// Major sub-score
///
/// Colleges with a program list are matched by substring in either
/// direction. Colleges without one (most API records) fall back to matching
/// the major's words against the college name.
pub fn major_score(college: &CollegeRecord, profile: &UserProfile) -> f64 {
    let Some(major) = profile
        .major
        .as_deref()
        .map(str::to_lowercase)
        .filter(|m| !m.is_empty())
    else {
        return 70.0;
    };

    if !college.majors.is_empty() {
        let offered = college.majors.iter().map(|m| m.to_lowercase()).any(|m| {
            m.contains(major.as_str()) || major.contains(m.as_str())
        });
        return if offered { 100.0 } else { 30.0 };
    }

    let name = college.name.to_lowercase();
    if major.split_whitespace().any(|keyword| name.contains(keyword)) {
        70.0
    } else {
        50.0
    }
}

/// Location sub-score
pub fn location_score(college: &CollegeRecord, profile: &UserProfile) -> f64 {
    match profile.location {
        LocationPreference::Any => 100.0,
        LocationPreference::InState => {
            let home = profile.home_state.as_deref().filter(|s| !s.is_empty());
            if home.is_some() && college.state.as_deref() == home {
                100.0
            } else {
                20.0
            }
        }
        preference => {
            if preference.region() == Some(college.region()) {
                100.0
            } else {
                40.0
            }
        }
    }
}
