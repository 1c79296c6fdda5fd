//! In-process TTL cache for the dashboard counters. Dashboard reads are
//! hot and tolerate short staleness; writes never invalidate — entries
//! simply age out.

use moka::future::Cache;
use std::time::Duration;

use crate::reports::DashboardStats;

const DASHBOARD_KEY: &str = "dashboard";

#[derive(Clone)]
pub struct StatsCache {
    inner: Cache<&'static str, DashboardStats>,
}

impl StatsCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(8)
                .time_to_live(ttl)
                .build(),
        }
    }

    pub async fn dashboard(&self) -> Option<DashboardStats> {
        self.inner.get(&DASHBOARD_KEY).await
    }

    pub async fn store_dashboard(&self, stats: DashboardStats) {
        self.inner.insert(DASHBOARD_KEY, stats).await;
    }
}
