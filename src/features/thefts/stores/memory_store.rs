use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::ReportStore;
use crate::core::error::Result;
use crate::features::thefts::models::{NewTheftReport, TheftReport};

#[derive(Default)]
struct MemoryState {
    /// Last id handed out; never decreases, so ids are not reused after purges
    last_id: i64,
    reports: BTreeMap<i64, TheftReport>,
}

/// Process-local report store for development and tests
#[derive(Default)]
pub struct MemoryReportStore {
    state: RwLock<MemoryState>,
}

impl MemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReportStore for MemoryReportStore {
    async fn insert(
        &self,
        report: NewTheftReport,
        reported_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Result<TheftReport> {
        let mut state = self.state.write().await;
        state.last_id += 1;
        let id = state.last_id;

        let stored = report.into_stored(id, reported_at, expires_at);
        state.reports.insert(id, stored.clone());

        Ok(stored)
    }

    async fn list_active(&self, now: DateTime<Utc>) -> Result<Vec<TheftReport>> {
        let state = self.state.read().await;

        let mut active: Vec<TheftReport> = state
            .reports
            .values()
            .filter(|r| r.is_active_at(now))
            .cloned()
            .collect();
        active.sort_by(|a, b| {
            b.reported_at
                .cmp(&a.reported_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        Ok(active)
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64> {
        let mut state = self.state.write().await;
        let before = state.reports.len();
        state.reports.retain(|_, r| r.is_active_at(now));

        Ok((before - state.reports.len()) as u64)
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::thefts::models::TheftDetails;
    use crate::shared::test_helpers::test_start;
    use chrono::TimeDelta;
    use tokio_test::assert_ok;

    fn report(zone: &str) -> NewTheftReport {
        NewTheftReport {
            latitude: 10.0,
            longitude: 20.0,
            zone: zone.to_string(),
            details: TheftDetails::default(),
            photo_urls: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_ids_are_monotonic_and_not_reused_after_purge() {
        let store = MemoryReportStore::new();
        let t0 = test_start();
        let short = t0 + TimeDelta::minutes(1);

        let a = assert_ok!(store.insert(report("A"), t0, short).await);
        let b = assert_ok!(store.insert(report("B"), t0, short).await);
        assert_eq!((a.id, b.id), (1, 2));

        let purged = assert_ok!(store.purge_expired(short).await);
        assert_eq!(purged, 2);

        let c = assert_ok!(store.insert(report("C"), short, short + TimeDelta::minutes(1)).await);
        assert_eq!(c.id, 3);
    }

    #[tokio::test]
    async fn test_expiry_boundary_is_exclusive() {
        let store = MemoryReportStore::new();
        let t0 = test_start();
        let expires = t0 + TimeDelta::minutes(30);
        assert_ok!(store.insert(report("A"), t0, expires).await);

        let just_before = expires - TimeDelta::milliseconds(1);
        assert_eq!(assert_ok!(store.list_active(just_before).await).len(), 1);
        assert_eq!(assert_ok!(store.purge_expired(just_before).await), 0);

        assert!(assert_ok!(store.list_active(expires).await).is_empty());
        assert_eq!(assert_ok!(store.purge_expired(expires).await), 1);
    }

    #[tokio::test]
    async fn test_list_active_is_newest_first() {
        let store = MemoryReportStore::new();
        let t0 = test_start();
        let ttl = TimeDelta::minutes(30);

        assert_ok!(store.insert(report("A"), t0, t0 + ttl).await);
        let t1 = t0 + TimeDelta::seconds(5);
        assert_ok!(store.insert(report("B"), t1, t1 + ttl).await);
        // Same instant as B: the later id wins
        assert_ok!(store.insert(report("C"), t1, t1 + ttl).await);

        let zones: Vec<String> = assert_ok!(store.list_active(t1).await)
            .into_iter()
            .map(|r| r.zone)
            .collect();
        assert_eq!(zones, vec!["C", "B", "A"]);
    }

    #[tokio::test]
    async fn test_concurrent_inserts_get_distinct_ids() {
        let store = std::sync::Arc::new(MemoryReportStore::new());
        let t0 = test_start();

        let handles: Vec<_> = (0..32)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .insert(report(&format!("Z{}", i)), t0, t0 + TimeDelta::minutes(30))
                        .await
                        .unwrap()
                        .id
                })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 32);
    }
}
