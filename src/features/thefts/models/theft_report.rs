use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Descriptive metadata attached to a report, stored verbatim
#[derive(Debug, Clone, Default, PartialEq, FromRow)]
pub struct TheftDetails {
    pub time_of_day: Option<String>,
    pub theft_type: Option<String>,
    pub theft_date: Option<String>,
    pub bike_type: Option<String>,
    pub bike_brand: Option<String>,
    pub bike_model: Option<String>,
    pub bike_year: Option<String>,
    pub serial_number: Option<String>,
    pub color: Option<String>,
    pub bike_description: Option<String>,
    pub reporter_name: Option<String>,
    pub reporter_email: Option<String>,
    pub reporter_phone: Option<String>,
}

/// Database model for a stored theft report
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct TheftReport {
    pub id: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub zone: String,
    #[sqlx(flatten)]
    pub details: TheftDetails,
    pub photo_urls: Vec<String>,
    pub reported_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl TheftReport {
    /// Active reports are those whose expiry is still ahead of `now`
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

/// Validated report ready to be stored
#[derive(Debug, Clone, PartialEq)]
pub struct NewTheftReport {
    pub latitude: f64,
    pub longitude: f64,
    pub zone: String,
    pub details: TheftDetails,
    pub photo_urls: Vec<String>,
}

impl NewTheftReport {
    /// Attach the system-assigned id and lifetime window
    pub fn into_stored(
        self,
        id: i64,
        reported_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> TheftReport {
        TheftReport {
            id,
            latitude: self.latitude,
            longitude: self.longitude,
            zone: self.zone,
            details: self.details,
            photo_urls: self.photo_urls,
            reported_at,
            expires_at,
        }
    }
}
