//! Timestamp formatting and the per-instance diff tracker

use chrono::{DateTime, Utc};

/// Render a timestamp as ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
#[must_use]
pub fn format_timestamp(datetime: &DateTime<Utc>) -> String {
    datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// Elapsed milliseconds between consecutive emitted records.
///
/// `last_ms == 0` means no record has been emitted since construction or
/// the last [`reset`](Self::reset).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimestampTracker {
    last_ms: i64,
}

impl TimestampTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one tick against the wall clock
    pub fn tick(&mut self) -> i64 {
        self.tick_at(Utc::now().timestamp_millis())
    }

    /// Consume one tick at `now_ms`.
    ///
    /// A reading older than the stored one yields 0 and leaves the stored
    /// value in place.
    pub fn tick_at(&mut self, now_ms: i64) -> i64 {
        if self.last_ms == 0 {
            self.last_ms = now_ms;
            return 0;
        }
        let diff = (now_ms - self.last_ms).max(0);
        self.last_ms = self.last_ms.max(now_ms);
        diff
    }

    pub fn reset(&mut self) {
        self.last_ms = 0;
    }

    pub fn last_ms(&self) -> i64 {
        self.last_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_iso8601_millis_format() {
        let datetime = Utc
            .with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime")
            + chrono::Duration::microseconds(123456);
        assert_eq!(format_timestamp(&datetime), "2025-01-08T10:30:45.123Z");
    }

    #[test]
    fn test_first_tick_is_zero() {
        let mut tracker = TimestampTracker::new();
        assert_eq!(tracker.tick_at(1_000), 0);
        assert_eq!(tracker.last_ms(), 1_000);
    }

    #[test]
    fn test_subsequent_ticks_report_delta() {
        let mut tracker = TimestampTracker::new();
        tracker.tick_at(1_000);
        assert_eq!(tracker.tick_at(1_250), 250);
        assert_eq!(tracker.tick_at(1_260), 10);
    }

    #[test]
    fn test_reset_restarts_at_zero() {
        let mut tracker = TimestampTracker::new();
        tracker.tick_at(1_000);
        tracker.tick_at(2_000);
        tracker.reset();
        assert_eq!(tracker.last_ms(), 0);
        assert_eq!(tracker.tick_at(5_000), 0);
    }

    #[test]
    fn test_clock_going_backwards_never_rewinds() {
        let mut tracker = TimestampTracker::new();
        tracker.tick_at(2_000);
        assert_eq!(tracker.tick_at(1_500), 0);
        assert_eq!(tracker.last_ms(), 2_000);
        assert_eq!(tracker.tick_at(2_100), 100);
    }

    #[test]
    fn test_wall_clock_tick() {
        let mut tracker = TimestampTracker::new();
        assert_eq!(tracker.tick(), 0);
        std::thread::sleep(std::time::Duration::from_millis(5));
        assert!(tracker.tick() >= 5);
    }
}
