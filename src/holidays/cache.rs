//! Process-wide holiday cache keyed by year.

use crate::calendar::HolidaySet;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Append-only map from year to that year's holidays.
///
/// Clones share the same storage. Entries are never evicted or invalidated;
/// the key space is small.
#[derive(Debug, Clone, Default)]
pub struct HolidayCache {
    entries: Arc<RwLock<HashMap<i32, HolidaySet>>>,
}

impl HolidayCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, year: i32) -> Option<HolidaySet> {
        self.entries.read().await.get(&year).cloned()
    }

    /// Store `holidays` for `year`. A later insert for the same year replaces
    /// the earlier one.
    pub async fn insert(&self, year: i32, holidays: HolidaySet) {
        self.entries.write().await.insert(year, holidays);
    }

    pub async fn contains(&self, year: i32) -> bool {
        self.entries.read().await.contains_key(&year)
    }

    /// Cached years in ascending order.
    pub async fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.entries.read().await.keys().copied().collect();
        years.sort_unstable();
        years
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
