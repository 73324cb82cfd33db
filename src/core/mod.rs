// Core algorithm exports
pub mod export;
pub mod fallback;
pub mod filters;
pub mod majors;
pub mod matcher;
pub mod reasons;
pub mod regions;
pub mod scoring;

pub use export::{render_export, EXPORT_FILENAME};
pub use fallback::fallback_colleges;
pub use filters::{is_eligible, matches_institution_type};
pub use majors::{search_majors, DEFAULT_SEARCH_LIMIT};
pub use matcher::{recommend, Matcher, RecommendResult};
pub use reasons::build_match_reasons;
pub use regions::region_for_state;
pub use scoring::{fit_score, score_college, sub_scores};
