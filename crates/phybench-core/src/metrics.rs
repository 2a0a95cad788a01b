//! Global atomic counters for leaderboard observability.
//!
//! Counters are incremented silently at the call site. Call
//! [`Metrics::flush`] to emit current values as a single
//! `tracing::info!` event (e.g. when a view unmounts).

use std::sync::atomic::{AtomicU64, Ordering};

/// Global metrics singleton.
pub static METRICS: Metrics = Metrics::new();

/// Atomic counters without locking.
pub struct Metrics {
    loads_succeeded: AtomicU64,
    loads_failed: AtomicU64,
    reranks: AtomicU64,
    details_opened: AtomicU64,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub const fn new() -> Self {
        Self {
            loads_succeeded: AtomicU64::new(0),
            loads_failed: AtomicU64::new(0),
            reranks: AtomicU64::new(0),
            details_opened: AtomicU64::new(0),
        }
    }

    pub fn inc_loads_succeeded(&self) {
        self.loads_succeeded.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "loads_succeeded", "counter incremented");
    }

    pub fn inc_loads_failed(&self) {
        self.loads_failed.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "loads_failed", "counter incremented");
    }

    /// Increment the selector-driven recompute counter.
    pub fn inc_reranks(&self) {
        self.reranks.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "reranks", "counter incremented");
    }

    pub fn inc_details_opened(&self) {
        self.details_opened.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "details_opened", "counter incremented");
    }

    /// Emit all current counter values as a single `info!` event.
    pub fn flush(&self) {
        tracing::info!(
            metric = "flush",
            loads_succeeded = self.loads_succeeded(),
            loads_failed = self.loads_failed(),
            reranks = self.reranks(),
            details_opened = self.details_opened(),
        );
    }

    pub fn loads_succeeded(&self) -> u64 {
        self.loads_succeeded.load(Ordering::Relaxed)
    }

    pub fn loads_failed(&self) -> u64 {
        self.loads_failed.load(Ordering::Relaxed)
    }

    pub fn reranks(&self) -> u64 {
        self.reranks.load(Ordering::Relaxed)
    }

    pub fn details_opened(&self) -> u64 {
        self.details_opened.load(Ordering::Relaxed)
    }

    /// Reset all counters to zero (useful in tests).
    pub fn reset(&self) {
        self.loads_succeeded.store(0, Ordering::Relaxed);
        self.loads_failed.store(0, Ordering::Relaxed);
        self.reranks.store(0, Ordering::Relaxed);
        self.details_opened.store(0, Ordering::Relaxed);
    }
}
