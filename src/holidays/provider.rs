//! Cached, failure-tolerant holiday lookup.

use super::cache::HolidayCache;
use super::source::HolidaySource;
use crate::calendar::HolidaySet;
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::collections::{BTreeSet, VecDeque};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Years fetched from the source at the same time.
pub const MAX_CONCURRENT_FETCHES: usize = 8;

/// Number of degradation records kept for inspection.
const MAX_RECORDED_FAILURES: usize = 100;

/// A year whose holidays could not be fetched and was treated as having none.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FetchFailure {
    pub year: i32,
    pub reason: String,
    pub occurred_at: DateTime<Utc>,
}

/// Resolves holiday sets for calendar years.
///
/// Successful fetches are cached for the life of the cache object. Failed
/// fetches are logged, recorded and answered with an empty set; they are not
/// cached, so the next request for that year tries again. The
/// check-fetch-store sequence is not exclusive: two concurrent requests for
/// the same uncached year may both reach the source, and the last store wins.
pub struct HolidayProvider {
    source: Arc<dyn HolidaySource>,
    cache: HolidayCache,
    failures: Arc<RwLock<VecDeque<FetchFailure>>>,
}

impl HolidayProvider {
    pub fn new(source: Arc<dyn HolidaySource>, cache: HolidayCache) -> Self {
        Self {
            source,
            cache,
            failures: Arc::new(RwLock::new(VecDeque::new())),
        }
    }

    pub fn cache(&self) -> &HolidayCache {
        &self.cache
    }

    /// Holidays for a single year. Never fails.
    pub async fn get_holidays_for_year(&self, year: i32) -> HolidaySet {
        if let Some(cached) = self.cache.get(year).await {
            debug!("Holiday cache hit for {}", year);
            return cached;
        }

        match self.source.fetch_year(year).await {
            Ok(holidays) => {
                info!("Fetched {} holidays for {}", holidays.len(), year);
                self.cache.insert(year, holidays.clone()).await;
                holidays
            }
            Err(e) => {
                warn!(
                    "Failed to fetch holidays for year {}: {}; treating it as holiday-free",
                    year, e
                );
                self.record_failure(year, e.to_string()).await;
                HolidaySet::new()
            }
        }
    }

    /// Union of the holidays of every year in `years`, fetched concurrently
    /// with at most [`MAX_CONCURRENT_FETCHES`] requests in flight.
    pub async fn get_holidays_for_years(&self, years: &BTreeSet<i32>) -> HolidaySet {
        let per_year: Vec<HolidaySet> = stream::iter(years.iter().copied())
            .map(|year| self.get_holidays_for_year(year))
            .buffer_unordered(MAX_CONCURRENT_FETCHES)
            .collect()
            .await;

        per_year
            .iter()
            .fold(HolidaySet::new(), |mut merged, holidays| {
                merged.merge(holidays);
                merged
            })
    }

    /// Degradations recorded so far, oldest first.
    pub async fn failures(&self) -> Vec<FetchFailure> {
        self.failures.read().await.iter().cloned().collect()
    }

    async fn record_failure(&self, year: i32, reason: String) {
        let mut failures = self.failures.write().await;
        if failures.len() == MAX_RECORDED_FAILURES {
            failures.pop_front();
        }
        failures.push_back(FetchFailure {
            year,
            reason,
            occurred_at: Utc::now(),
        });
    }
}
