use crate::core::scoring::round_half_up;
use crate::models::ScoredResult;

/// Suggested file name for the downloaded export
pub const EXPORT_FILENAME: &str = "college-recommendations.txt";

const EXPORT_TITLE: &str = "College Picker — Your Recommendations";
const EXPORT_FOOTER: &str = "College Picker";

/// Render ranked results as the plain-text download format
///
/// One line per result, e.g.
/// `1. Example University — 82% fit | 45% acceptance | ~$28k/yr`.
/// The acceptance and cost parts are left out when unknown.
pub fn render_export(results: &[ScoredResult]) -> String {
    let mut lines = Vec::with_capacity(results.len() + 4);
    lines.push(EXPORT_TITLE.to_string());
    lines.push(format!("{}\n", "=".repeat(37)));

    for (i, result) in results.iter().enumerate() {
        lines.push(export_line(i + 1, result));
    }

    lines.push(String::new());
    lines.push(EXPORT_FOOTER.to_string());
    lines.join("\n")
}

fn export_line(rank: usize, result: &ScoredResult) -> String {
    let college = &result.college;
    let mut parts = vec![format!(
        "{}. {} — {}% fit",
        rank, college.name, result.fit_score
    )];

    if let Some(rate) = college.acceptance_rate {
        parts.push(format!("{}% acceptance", rate));
    }
    if let Some(cost) = college.cost {
        parts.push(format!("~${}k/yr", round_half_up(cost / 1000.0)));
    }

    parts.join(" | ")
}
