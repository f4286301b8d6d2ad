use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::ReportStore;
use crate::core::error::{AppError, Result};
use crate::features::thefts::models::{NewTheftReport, TheftReport};

/// Report store backed by the `theft_reports` table
pub struct PostgresReportStore {
    pool: PgPool,
}

impl PostgresReportStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportStore for PostgresReportStore {
    async fn insert(
        &self,
        report: NewTheftReport,
        reported_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Result<TheftReport> {
        let d = report.details;
        let stored = sqlx::query_as::<_, TheftReport>(
            r#"
            INSERT INTO theft_reports (
                latitude, longitude, zone,
                time_of_day, theft_type, theft_date,
                bike_type, bike_brand, bike_model, bike_year, serial_number, color,
                bike_description, reporter_name, reporter_email, reporter_phone,
                photo_urls, reported_at, expires_at
            ) VALUES (
                $1, $2, $3,
                $4, $5, $6,
                $7, $8, $9, $10, $11, $12,
                $13, $14, $15, $16,
                $17, $18, $19
            )
            RETURNING *
            "#,
        )
        .bind(report.latitude)
        .bind(report.longitude)
        .bind(report.zone)
        .bind(d.time_of_day)
        .bind(d.theft_type)
        .bind(d.theft_date)
        .bind(d.bike_type)
        .bind(d.bike_brand)
        .bind(d.bike_model)
        .bind(d.bike_year)
        .bind(d.serial_number)
        .bind(d.color)
        .bind(d.bike_description)
        .bind(d.reporter_name)
        .bind(d.reporter_email)
        .bind(d.reporter_phone)
        .bind(report.photo_urls)
        .bind(reported_at)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::debug!("Failed to insert theft report: {:?}", e);
            AppError::StorageUnavailable(e)
        })?;

        Ok(stored)
    }

    async fn list_active(&self, now: DateTime<Utc>) -> Result<Vec<TheftReport>> {
        let reports = sqlx::query_as::<_, TheftReport>(
            r#"
            SELECT * FROM theft_reports
            WHERE expires_at > $1
            ORDER BY reported_at DESC, id DESC
            "#,
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::debug!("Failed to list active theft reports: {:?}", e);
            AppError::StorageUnavailable(e)
        })?;

        Ok(reports)
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64> {
        let result = sqlx::query("DELETE FROM theft_reports WHERE expires_at <= $1")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::debug!("Failed to purge expired theft reports: {:?}", e);
                AppError::StorageUnavailable(e)
            })?;

        Ok(result.rows_affected())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
