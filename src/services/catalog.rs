use crate::core::fallback_colleges;
use crate::models::{CollegeRecord, DataSource};
use crate::services::scorecard::{CancelFlag, FetchOptions, ScorecardClient, ScorecardError};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;

const CATALOG_KEY: &str = "catalog";

/// Reasons a live catalog could not be used
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("no College Scorecard API key configured")]
    MissingApiKey,

    #[error("College Scorecard returned no usable colleges")]
    Empty,

    #[error(transparent)]
    Scorecard(#[from] ScorecardError),
}

/// The college list currently served, with where it came from
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    pub colleges: Arc<Vec<CollegeRecord>>,
    pub source: DataSource,
    /// Why the live catalog was not used, when it was not
    pub error: Option<String>,
}

/// College catalog with a time-to-live
///
/// Holds the acquired catalog in a moka cache so concurrent requests share
/// one fetch, and a fetch is repeated only after the entry expires. Any
/// acquisition failure degrades to the bundled dataset; callers always get
/// a snapshot.
///
/// Each load gets its own cancel flag, so cancelling one load never affects
/// later reloads.
pub struct CollegeCatalog {
    client: Option<ScorecardClient>,
    options: FetchOptions,
    cache: moka::future::Cache<&'static str, CatalogSnapshot>,
    in_flight: Mutex<CancelFlag>,
}

impl CollegeCatalog {
    /// Create a new catalog; `client` is `None` when no API key is configured
    pub fn new(client: Option<ScorecardClient>, options: FetchOptions, ttl: Duration) -> Self {
        let cache = moka::future::CacheBuilder::new(1)
            .time_to_live(ttl)
            .build();

        Self {
            client,
            options,
            cache,
            in_flight: Mutex::new(CancelFlag::new()),
        }
    }

    /// Current snapshot, loading it first if absent or expired
    pub async fn snapshot(&self) -> CatalogSnapshot {
        self.cache.get_with(CATALOG_KEY, self.load()).await
    }

    /// Cached snapshot without triggering a load; `None` while loading
    pub async fn current(&self) -> Option<CatalogSnapshot> {
        self.cache.get(&CATALOG_KEY).await
    }

    /// Acquire the catalog, falling back to the bundled dataset on any failure
    pub async fn load(&self) -> CatalogSnapshot {
        match self.fetch_live().await {
            Ok(colleges) => {
                tracing::info!("Loaded {} colleges from College Scorecard", colleges.len());
                CatalogSnapshot {
                    colleges: Arc::new(colleges),
                    source: DataSource::Live,
                    error: None,
                }
            }
            Err(CatalogError::MissingApiKey) => {
                tracing::info!("No College Scorecard API key, using bundled college data");
                Self::fallback(None)
            }
            Err(e) => {
                tracing::warn!("Using bundled college data: {}", e);
                Self::fallback(Some(e.to_string()))
            }
        }
    }

    async fn fetch_live(&self) -> Result<Vec<CollegeRecord>, CatalogError> {
        let client = self.client.as_ref().ok_or(CatalogError::MissingApiKey)?;

        let cancel = CancelFlag::new();
        if let Ok(mut in_flight) = self.in_flight.lock() {
            *in_flight = cancel.clone();
        }

        let colleges = client.fetch_colleges(&self.options, &cancel).await?;
        if colleges.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(colleges)
    }

    fn fallback(error: Option<String>) -> CatalogSnapshot {
        CatalogSnapshot {
            colleges: Arc::new(fallback_colleges().to_vec()),
            source: DataSource::Fallback,
            error,
        }
    }

    /// Start loading the catalog in the background
    ///
    /// Requests arriving before the load finishes wait on the same entry
    /// instead of issuing their own fetch.
    pub fn spawn_refresh(self: &Arc<Self>) -> RefreshHandle {
        let catalog = Arc::clone(self);
        let task = tokio::spawn(async move {
            let snapshot = catalog.snapshot().await;
            tracing::debug!(
                "Catalog ready: {} colleges ({:?})",
                snapshot.colleges.len(),
                snapshot.source
            );
        });

        RefreshHandle {
            task,
            catalog: Arc::clone(self),
        }
    }

    /// Abandon the in-flight fetch sequence, if any
    ///
    /// The load it belongs to serves the bundled dataset. The next load
    /// starts with a fresh flag.
    pub fn cancel(&self) {
        if let Ok(in_flight) = self.in_flight.lock() {
            in_flight.cancel();
        }
    }

    /// Drop the cached snapshot so the next request reloads it
    pub async fn invalidate(&self) {
        self.cache.invalidate(CATALOG_KEY).await;
    }
}

/// Handle on a background catalog load
pub struct RefreshHandle {
    task: JoinHandle<()>,
    catalog: Arc<CollegeCatalog>,
}

impl RefreshHandle {
    /// Abandon the load; nothing it fetched is cached
    pub fn abort(self) {
        self.catalog.cancel();
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}
