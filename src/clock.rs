use chrono::{DateTime, NaiveDate, Utc};
use parking_lot::RwLock;
use std::sync::Arc;

/// Source of the current time. All calendar days are UTC.
pub trait Clock: Send + Sync {
    /// Milliseconds since the Unix epoch
    fn now_ms(&self) -> i64;

    fn today(&self) -> NaiveDate {
        DateTime::<Utc>::from_timestamp_millis(self.now_ms())
            .map(|dt| dt.date_naive())
            .unwrap_or(NaiveDate::MIN)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }

    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// Manually driven clock for tests and replays
#[derive(Debug, Clone)]
pub struct FixedClock {
    now_ms: Arc<RwLock<i64>>,
}

impl FixedClock {
    pub fn new(now_ms: i64) -> Self {
        FixedClock {
            now_ms: Arc::new(RwLock::new(now_ms)),
        }
    }

    /// Clock set to midnight UTC of `date`
    pub fn at_date(date: NaiveDate) -> Self {
        let ms = date
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc().timestamp_millis())
            .unwrap_or_default();
        Self::new(ms)
    }

    pub fn set(&self, now_ms: i64) {
        *self.now_ms.write() = now_ms;
    }

    pub fn advance_days(&self, days: i64) {
        let mut now = self.now_ms.write();
        *now = now.saturating_add(days.saturating_mul(crate::scheduler::MS_PER_DAY));
    }
}

impl Clock for FixedClock {
    fn now_ms(&self) -> i64 {
        *self.now_ms.read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_reports_utc_day() {
        let date: NaiveDate = "2024-05-10".parse().unwrap();
        let clock = FixedClock::at_date(date);
        assert_eq!(clock.today(), date);
        clock.advance_days(2);
        assert_eq!(clock.today(), "2024-05-12".parse::<NaiveDate>().unwrap());
    }

    #[test]
    fn late_evening_is_still_same_day() {
        let date: NaiveDate = "2024-05-10".parse().unwrap();
        let clock = FixedClock::at_date(date);
        clock.set(clock.now_ms() + 23 * 3_600_000);
        assert_eq!(clock.today(), date);
    }
}
