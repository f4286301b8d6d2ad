use std::sync::Arc;

use chrono::TimeDelta;

use crate::core::error::{AppError, Result};
use crate::features::thefts::models::{NewTheftReport, TheftReport};
use crate::features::thefts::stores::ReportStore;
use crate::shared::clock::Clock;

/// Service for submitting theft reports and reading the active set
pub struct TheftService {
    store: Arc<dyn ReportStore>,
    clock: Arc<dyn Clock>,
    ttl: TimeDelta,
}

impl TheftService {
    pub fn new(store: Arc<dyn ReportStore>, clock: Arc<dyn Clock>, ttl: TimeDelta) -> Self {
        Self { store, clock, ttl }
    }

    /// Store a validated report; it stays active for exactly one TTL.
    pub async fn submit(&self, report: NewTheftReport) -> Result<TheftReport> {
        let reported_at = self.clock.now();
        let expires_at = reported_at.checked_add_signed(self.ttl).ok_or_else(|| {
            AppError::Internal(format!(
                "report expiry overflows: reported_at={}, ttl_minutes={}",
                reported_at,
                self.ttl.num_minutes()
            ))
        })?;

        let stored = self.store.insert(report, reported_at, expires_at).await?;

        tracing::info!(
            "Theft report stored: id={}, zone={:?}, photos={}, expires_at={}",
            stored.id,
            stored.zone,
            stored.photo_urls.len(),
            stored.expires_at
        );

        Ok(stored)
    }

    /// Purge expired reports, then return the rest newest first.
    ///
    /// Both steps use the same `now`, so a report expiring exactly at `now`
    /// is removed and never returned.
    pub async fn list_active(&self) -> Result<Vec<TheftReport>> {
        let now = self.clock.now();

        let purged = self.store.purge_expired(now).await?;
        if purged > 0 {
            tracing::debug!(
                "Purged {} expired theft reports from {} store",
                purged,
                self.store.backend()
            );
        }

        self.store.list_active(now).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::thefts::models::TheftDetails;
    use crate::features::thefts::stores::MemoryReportStore;
    use crate::shared::test_helpers::{memory_service, ManualClock};
    use chrono::{DateTime, Utc};

    fn report(lat: f64, lng: f64) -> NewTheftReport {
        NewTheftReport {
            latitude: lat,
            longitude: lng,
            zone: "Centro".to_string(),
            details: TheftDetails::default(),
            photo_urls: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_expiry_is_exactly_one_ttl_after_report() {
        let (service, clock) = memory_service();

        let first = service.submit(report(10.0, 20.0)).await.unwrap();
        clock.advance(TimeDelta::seconds(97));
        let second = service.submit(report(11.0, 21.0)).await.unwrap();

        for stored in [first, second] {
            assert_eq!(stored.expires_at - stored.reported_at, TimeDelta::minutes(30));
        }
    }

    #[tokio::test]
    async fn test_expiry_overflow_is_an_error_not_a_panic() {
        let clock = Arc::new(ManualClock::new(DateTime::<Utc>::MAX_UTC - TimeDelta::minutes(1)));
        let service = TheftService::new(
            Arc::new(MemoryReportStore::new()),
            clock,
            TimeDelta::minutes(30),
        );

        let err = service.submit(report(10.0, 20.0)).await.unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
        assert!(service.list_active().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_report_visible_until_ttl_elapses() {
        let (service, clock) = memory_service();
        service.submit(report(10.0, 20.0)).await.unwrap();

        clock.advance(TimeDelta::minutes(29));
        let active = service.list_active().await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!((active[0].latitude, active[0].longitude), (10.0, 20.0));

        clock.advance(TimeDelta::minutes(2));
        assert!(service.list_active().await.unwrap().is_empty());

        // Expired reports never come back
        clock.advance(TimeDelta::minutes(30));
        assert!(service.list_active().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_report_expiring_now_is_excluded() {
        let (service, clock) = memory_service();
        service.submit(report(10.0, 20.0)).await.unwrap();

        clock.advance(TimeDelta::minutes(30));
        assert!(service.list_active().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let (service, clock) = memory_service();
        let a = service.submit(report(1.0, 1.0)).await.unwrap();
        clock.advance(TimeDelta::seconds(1));
        let b = service.submit(report(2.0, 2.0)).await.unwrap();

        let ids: Vec<i64> = service
            .list_active()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![b.id, a.id]);
    }

    #[tokio::test]
    async fn test_repeated_listing_is_stable() {
        let (service, clock) = memory_service();
        service.submit(report(1.0, 1.0)).await.unwrap();
        clock.advance(TimeDelta::minutes(20));
        service.submit(report(2.0, 2.0)).await.unwrap();
        clock.advance(TimeDelta::minutes(15));

        let first = service.list_active().await.unwrap();
        let second = service.list_active().await.unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(first, second);
    }
}
