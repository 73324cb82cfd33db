use crate::core::scoring::round_half_up;
use crate::models::CollegeRecord;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Production College Scorecard schools endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.data.gov/ed/collegescorecard/v1/schools";

/// Fields projected from the Scorecard data dictionary
pub const FIELDS: &[&str] = &[
    "id",
    "school.name",
    "school.state",
    "school.city",
    "school.school_url",
    "school.ownership",
    "school.degrees_awarded.predominant",
    "latest.admissions.admission_rate.overall",
    "latest.admissions.sat_scores.midpoint.critical_reading",
    "latest.admissions.sat_scores.midpoint.math",
    "latest.admissions.act_scores.midpoint.cumulative",
    "latest.cost.avg_net_price.public",
    "latest.cost.avg_net_price.private",
    "latest.student.size",
];

/// Errors that can occur when fetching from College Scorecard
#[derive(Debug, Error)]
pub enum ScorecardError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("College Scorecard API error: {status}")]
    ApiError { status: StatusCode },

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Fetch cancelled")]
    Cancelled,
}

/// Pagination and retry knobs for one fetch sequence
#[derive(Debug, Clone, Copy)]
pub struct FetchOptions {
    pub per_page: u32,
    pub max_pages: u32,
    /// Extra attempts after a 500 response
    pub max_retries: u32,
    /// Base delay; attempt `n` waits `backoff * n`
    pub backoff: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            per_page: 100,
            max_pages: 5,
            max_retries: 2,
            backoff: Duration::from_millis(1000),
        }
    }
}

/// Shared flag that abandons an in-flight fetch sequence
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// College Scorecard API client
///
/// Handles paginated retrieval of 4-year institutions and maps the flat
/// Scorecard field names onto [`CollegeRecord`].
#[derive(Debug, Clone)]
pub struct ScorecardClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl ScorecardClient {
    /// Create a new Scorecard client
    pub fn new(
        base_url: String,
        api_key: String,
        timeout: Duration,
    ) -> Result<Self, ScorecardError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("college-picker/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            base_url,
            api_key,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn page_url(&self, page: u32, per_page: u32) -> String {
        let fields = FIELDS.join(",");
        format!(
            "{}?api_key={}&per_page={}&page={}&fields={}&school.degrees_awarded.predominant=3",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(&self.api_key),
            per_page,
            page,
            urlencoding::encode(&fields)
        )
    }

    /// GET one page, retrying 500 responses with linear backoff
    async fn fetch_page(&self, url: &str, options: &FetchOptions) -> Result<Value, ScorecardError> {
        let mut attempt = 0u32;
        loop {
            let response = self.client.get(url).send().await?;
            let status = response.status();

            if status.is_success() {
                return response
                    .json::<Value>()
                    .await
                    .map_err(|e| ScorecardError::InvalidResponse(e.to_string()));
            }

            if status == StatusCode::INTERNAL_SERVER_ERROR && attempt < options.max_retries {
                attempt += 1;
                let delay = options.backoff * attempt;
                tracing::warn!(
                    "College Scorecard returned {}, retry {}/{} in {:?}",
                    status,
                    attempt,
                    options.max_retries,
                    delay
                );
                tokio::time::sleep(delay).await;
                continue;
            }

            return Err(ScorecardError::ApiError { status });
        }
    }

    /// Fetch colleges page by page until a short page or the page cap
    ///
    /// Pages are appended in request order. Once `cancel` is raised, the
    /// sequence stops and everything fetched so far is discarded. Records
    /// with no admissions or cost data are dropped.
    pub async fn fetch_colleges(
        &self,
        options: &FetchOptions,
        cancel: &CancelFlag,
    ) -> Result<Vec<CollegeRecord>, ScorecardError> {
        let mut colleges = Vec::new();
        let mut page = 0u32;

        while page < options.max_pages {
            if cancel.is_cancelled() {
                return Err(ScorecardError::Cancelled);
            }

            let url = self.page_url(page, options.per_page);
            tracing::debug!("Fetching College Scorecard page {}", page);

            let json = self.fetch_page(&url, options).await?;

            if cancel.is_cancelled() {
                return Err(ScorecardError::Cancelled);
            }

            let items: &[Value] = match json.get("results") {
                Some(Value::Array(items)) => items.as_slice(),
                Some(Value::Null) | None => &[],
                Some(_) => {
                    return Err(ScorecardError::InvalidResponse(
                        "results is not an array".into(),
                    ))
                }
            };

            colleges.extend(items.iter().map(map_school));
            page += 1;

            if items.len() < options.per_page as usize {
                break;
            }
        }

        let before = colleges.len();
        colleges.retain(has_admissions_or_cost);

        tracing::debug!(
            "Fetched {} colleges over {} pages ({} without usable data dropped)",
            colleges.len(),
            page,
            before - colleges.len()
        );

        Ok(colleges)
    }
}

fn has_admissions_or_cost(college: &CollegeRecord) -> bool {
    !college.name.is_empty()
        && (college.avg_sat.is_some()
            || college.avg_act.is_some()
            || college.acceptance_rate.is_some()
            || college.cost.is_some())
}

/// Look up a Scorecard field by its dotted name
///
/// The API returns projected fields as flat dotted keys; nested objects are
/// accepted too.
fn field<'a>(raw: &'a Value, path: &str) -> Option<&'a Value> {
    if let Some(value) = raw.get(path) {
        return Some(value);
    }
    path.split('.').try_fold(raw, |value, key| value.get(key))
}

fn number(raw: &Value, path: &str) -> Option<f64> {
    match field(raw, path)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn text(raw: &Value, path: &str) -> Option<String> {
    match field(raw, path)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Map one raw Scorecard result onto a college record
pub fn map_school(raw: &Value) -> CollegeRecord {
    let sat_reading = number(raw, "latest.admissions.sat_scores.midpoint.critical_reading");
    let sat_math = number(raw, "latest.admissions.sat_scores.midpoint.math");
    let avg_sat = match (sat_reading, sat_math) {
        (Some(reading), Some(math)) => Some(reading + math),
        _ => None,
    };

    let acceptance_rate = number(raw, "latest.admissions.admission_rate.overall")
        .map(|rate| round_half_up(rate * 100.0));

    let ownership = number(raw, "school.ownership").map(|code| code as u8);
    let price_public = number(raw, "latest.cost.avg_net_price.public");
    let price_private = number(raw, "latest.cost.avg_net_price.private");
    // Public schools report only the public net price
    let cost = if ownership == Some(1) {
        price_public
    } else {
        price_private.or(price_public)
    };

    let website = text(raw, "school.school_url").map(|url| {
        let bare = url
            .trim_start_matches("https://")
            .trim_start_matches("http://");
        format!("https://{}", bare)
    });

    CollegeRecord {
        id: number(raw, "id").map(|id| id as u64),
        name: text(raw, "school.name").unwrap_or_else(|| "Unknown".to_string()),
        state: text(raw, "school.state"),
        city: text(raw, "school.city"),
        website,
        acceptance_rate,
        avg_gpa: None,
        avg_sat,
        avg_act: number(raw, "latest.admissions.act_scores.midpoint.cumulative"),
        cost,
        majors: Vec::new(),
        ownership,
        predominant_degree: number(raw, "school.degrees_awarded.predominant").map(|d| d as u8),
        enrollment: number(raw, "latest.student.size").map(|n| n as u64),
        graduation_rate: None,
    }
}
