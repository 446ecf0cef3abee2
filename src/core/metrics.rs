//! Logger metrics for observability
//!
//! Counts emitted records, calls rejected by the level gate and appender
//! write failures.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for one logger instance
///
/// # Example
///
/// ```
/// use context_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
/// metrics.record_emitted();
/// metrics.record_suppressed();
///
/// assert_eq!(metrics.emitted(), 1);
/// assert_eq!(metrics.suppressed(), 1);
/// ```
#[derive(Debug, Default)]
pub struct LoggerMetrics {
    /// Records handed to the appender
    emitted: AtomicU64,

    /// Calls rejected by the level gate
    suppressed: AtomicU64,

    /// Appender writes that returned an error
    write_failures: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            emitted: AtomicU64::new(0),
            suppressed: AtomicU64::new(0),
            write_failures: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn emitted(&self) -> u64 {
        self.emitted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn suppressed(&self) -> u64 {
        self.suppressed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn write_failures(&self) -> u64 {
        self.write_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_emitted(&self) -> u64 {
        self.emitted.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_suppressed(&self) -> u64 {
        self.suppressed.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_write_failure(&self) -> u64 {
        self.write_failures.fetch_add(1, Ordering::Relaxed)
    }

    /// Share of calls rejected by the level gate, as a percentage (0.0 - 100.0)
    ///
    /// Returns 0.0 if no calls have been made.
    pub fn suppression_rate(&self) -> f64 {
        let suppressed = self.suppressed() as f64;
        let total = self.emitted() as f64 + suppressed;
        if total == 0.0 {
            0.0
        } else {
            (suppressed / total) * 100.0
        }
    }

    /// Reset all counters to zero
    pub fn reset(&self) {
        self.emitted.store(0, Ordering::Relaxed);
        self.suppressed.store(0, Ordering::Relaxed);
        self.write_failures.store(0, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let metrics = LoggerMetrics::new();
        metrics.record_emitted();
        metrics.record_emitted();
        metrics.record_write_failure();
        assert_eq!(metrics.emitted(), 2);
        assert_eq!(metrics.write_failures(), 1);
        assert_eq!(metrics.suppressed(), 0);
    }

    #[test]
    fn test_suppression_rate() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.suppression_rate(), 0.0);

        for _ in 0..90 {
            metrics.record_emitted();
        }
        for _ in 0..10 {
            metrics.record_suppressed();
        }

        let rate = metrics.suppression_rate();
        assert!((9.9..=10.1).contains(&rate), "Suppression rate was {}", rate);
    }

    #[test]
    fn test_reset() {
        let metrics = LoggerMetrics::new();
        metrics.record_emitted();
        metrics.record_suppressed();
        metrics.reset();
        assert_eq!(metrics.emitted(), 0);
        assert_eq!(metrics.suppressed(), 0);
    }
}
