#[cfg(test)]
use crate::features::thefts::{MemoryReportStore, TheftService};
#[cfg(test)]
use crate::shared::clock::Clock;
#[cfg(test)]
use chrono::{DateTime, TimeDelta, TimeZone, Utc};
#[cfg(test)]
use std::sync::{Arc, Mutex};

/// Clock that only moves when a test tells it to
#[cfg(test)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

#[cfg(test)]
impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn advance(&self, by: TimeDelta) {
        let mut now = self.now.lock().unwrap();
        *now += by;
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

/// Fixed starting instant so expiry assertions are exact
#[cfg(test)]
pub fn test_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 18, 0, 0).unwrap()
}

/// Service over an empty in-memory store with a 30 minute TTL
#[cfg(test)]
pub fn memory_service() -> (Arc<TheftService>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(test_start()));
    let service = Arc::new(TheftService::new(
        Arc::new(MemoryReportStore::new()),
        clock.clone(),
        TimeDelta::minutes(30),
    ));
    (service, clock)
}
