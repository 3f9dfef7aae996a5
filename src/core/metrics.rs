//! Logger metrics for observability
//!
//! Counters describing what happened to log calls: how many reached the
//! writers, how many were dropped by the level gate or the filter chain,
//! and how many writer invocations failed.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use rust_logger_facade::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_dispatched();
/// metrics.record_filtered();
///
/// assert_eq!(metrics.dispatched(), 1);
/// assert_eq!(metrics.dropped_by_filter(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Messages handed to the writers
    dispatched: AtomicU64,

    /// Calls whose level was not enabled
    dropped_by_level: AtomicU64,

    /// Messages vetoed by a filter
    dropped_by_filter: AtomicU64,

    /// Writer invocations that panicked
    writer_failures: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            dispatched: AtomicU64::new(0),
            dropped_by_level: AtomicU64::new(0),
            dropped_by_filter: AtomicU64::new(0),
            writer_failures: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn dispatched(&self) -> u64 {
        self.dispatched.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn dropped_by_level(&self) -> u64 {
        self.dropped_by_level.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn dropped_by_filter(&self) -> u64 {
        self.dropped_by_filter.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn writer_failures(&self) -> u64 {
        self.writer_failures.load(Ordering::Relaxed)
    }

    /// Total of level and filter drops
    #[inline]
    pub fn dropped_count(&self) -> u64 {
        self.dropped_by_level() + self.dropped_by_filter()
    }

    #[inline]
    pub fn record_dispatched(&self) -> u64 {
        self.dispatched.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_level_drop(&self) -> u64 {
        self.dropped_by_level.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_filtered(&self) -> u64 {
        self.dropped_by_filter.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_writer_failure(&self) -> u64 {
        self.writer_failures.fetch_add(1, Ordering::Relaxed)
    }

    /// Get drop rate as a percentage (0.0 - 100.0)
    ///
    /// Returns 0.0 if no calls have been seen.
    pub fn drop_rate(&self) -> f64 {
        let dropped = self.dropped_count() as f64;
        let total = self.dispatched() as f64 + dropped;
        if total == 0.0 {
            0.0
        } else {
            (dropped / total) * 100.0
        }
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.dispatched.store(0, Ordering::Relaxed);
        self.dropped_by_level.store(0, Ordering::Relaxed);
        self.dropped_by_filter.store(0, Ordering::Relaxed);
        self.writer_failures.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            dispatched: AtomicU64::new(self.dispatched()),
            dropped_by_level: AtomicU64::new(self.dropped_by_level()),
            dropped_by_filter: AtomicU64::new(self.dropped_by_filter()),
            writer_failures: AtomicU64::new(self.writer_failures()),
        }
    }
}
