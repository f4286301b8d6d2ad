//! Storage backends for theft reports.
//!
//! Both backends treat a report as active while `expires_at > now`;
//! `now` is always supplied by the caller.

mod memory_store;
mod postgres_store;

pub use memory_store::MemoryReportStore;
pub use postgres_store::PostgresReportStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::core::error::Result;
use crate::features::thefts::models::{NewTheftReport, TheftReport};

#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Persist a report and assign it a fresh id.
    async fn insert(
        &self,
        report: NewTheftReport,
        reported_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Result<TheftReport>;

    /// Reports still active at `now`, most recently reported first.
    async fn list_active(&self, now: DateTime<Utc>) -> Result<Vec<TheftReport>>;

    /// Delete reports with `expires_at <= now`, returning how many were removed.
    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64>;

    /// Backend name for logs
    fn backend(&self) -> &'static str;
}
