use std::sync::LazyLock;

use crate::models::CollegeRecord;

/// Reference dataset compiled into the binary
const FALLBACK_JSON: &str = include_str!("../../data/colleges.json");

static FALLBACK_COLLEGES: LazyLock<Vec<CollegeRecord>> =
    LazyLock::new(|| match serde_json::from_str(FALLBACK_JSON) {
        Ok(colleges) => colleges,
        Err(e) => {
            tracing::error!("Bundled college dataset is malformed: {}", e);
            Vec::new()
        }
    });

/// The bundled college dataset, parsed once on first use
pub fn fallback_colleges() -> &'static [CollegeRecord] {
    &FALLBACK_COLLEGES
}
