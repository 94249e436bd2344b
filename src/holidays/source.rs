//! Holiday data sources
//!
//! Provides a trait-based abstraction over the external holiday API so the
//! provider can be exercised without network access.

use crate::calendar::{CalendarDate, HolidaySet};
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::debug;

/// Public Brazilian national holiday API.
pub const DEFAULT_BASE_URL: &str = "https://brasilapi.com.br/api/feriados/v1";

/// Default bound on a single holiday fetch.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

/// Source of holiday dates for a single calendar year.
///
/// Implementations report every failure as an error; deciding what to do
/// about it is the provider's job.
#[async_trait]
pub trait HolidaySource: Send + Sync {
    async fn fetch_year(&self, year: i32) -> Result<HolidaySet>;
}

/// One element of the upstream payload. Only `date` is required; `name`,
/// `type` and anything else the API adds are ignored.
#[derive(Debug, Deserialize)]
struct HolidayEntry {
    date: String,
}

/// Fetches holidays over HTTP from `GET <base_url>/<year>`.
pub struct HttpHolidaySource {
    client: Client,
    base_url: String,
}

impl HttpHolidaySource {
    /// Create a new source with a bounded per-request timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl HolidaySource for HttpHolidaySource {
    async fn fetch_year(&self, year: i32) -> Result<HolidaySet> {
        let url = format!("{}/{}", self.base_url, year);
        debug!("Fetching holidays from {}", url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(Error::Upstream(format!(
                "holiday API returned status {}",
                response.status()
            )));
        }

        let entries: Vec<HolidayEntry> = response.json().await?;

        entries
            .into_iter()
            .map(|entry| {
                CalendarDate::parse_strict(&entry.date).map_err(|_| {
                    Error::Upstream(format!("malformed holiday date {:?}", entry.date))
                })
            })
            .collect()
    }
}

/// Scripted outcome for one year of a [`MockHolidaySource`].
#[derive(Debug, Clone)]
enum MockResponse {
    Holidays(HolidaySet),
    Failure(String),
}

/// Mock implementation of `HolidaySource` for testing
///
/// Years without a scripted response resolve to an empty set.
#[derive(Debug, Clone, Default)]
pub struct MockHolidaySource {
    responses: Arc<Mutex<HashMap<i32, MockResponse>>>,
    calls: Arc<Mutex<Vec<i32>>>,
}

impl MockHolidaySource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the holidays returned for `year`. Panics on malformed dates.
    pub async fn add_holidays(&self, year: i32, dates: &[&str]) {
        let set = dates
            .iter()
            .map(|d| CalendarDate::parse_strict(d).expect("mock holiday date must be YYYY-MM-DD"))
            .collect();
        self.responses
            .lock()
            .await
            .insert(year, MockResponse::Holidays(set));
    }

    /// Make every fetch of `year` fail with `reason`.
    pub async fn add_failure(&self, year: i32, reason: &str) {
        self.responses
            .lock()
            .await
            .insert(year, MockResponse::Failure(reason.to_string()));
    }

    /// Years fetched so far, in call order.
    pub async fn get_calls(&self) -> Vec<i32> {
        self.calls.lock().await.clone()
    }

    pub async fn call_count(&self, year: i32) -> usize {
        self.calls.lock().await.iter().filter(|&&y| y == year).count()
    }
}

#[async_trait]
impl HolidaySource for MockHolidaySource {
    async fn fetch_year(&self, year: i32) -> Result<HolidaySet> {
        self.calls.lock().await.push(year);

        match self.responses.lock().await.get(&year) {
            Some(MockResponse::Holidays(set)) => Ok(set.clone()),
            Some(MockResponse::Failure(reason)) => Err(Error::Upstream(reason.clone())),
            None => Ok(HolidaySet::new()),
        }
    }
}
