//! Metrics registry for vet
//!
//! - Counters only
//! - Monotonic increase, reset only on process start
//! - Thread-safe, lock-free

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Request gate counters
///
/// Relaxed ordering is enough: counters are independent and only read
/// for reporting.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    /// Request bodies that passed validation
    requests_validated: AtomicU64,
    /// Request bodies that failed validation
    requests_rejected: AtomicU64,
    /// Total validation errors reported
    validation_errors: AtomicU64,
    /// Schemas loaded at startup
    schemas_loaded: AtomicU64,
}

impl MetricsRegistry {
    /// Create a new metrics registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_validated(&self) {
        self.requests_validated.fetch_add(1, Ordering::Relaxed);
    }

    /// Counts one rejected request carrying `errors` violations
    pub fn record_rejected(&self, errors: usize) {
        self.requests_rejected.fetch_add(1, Ordering::Relaxed);
        self.validation_errors
            .fetch_add(errors as u64, Ordering::Relaxed);
    }

    pub fn set_schemas_loaded(&self, count: usize) {
        self.schemas_loaded.store(count as u64, Ordering::Relaxed);
    }

    /// Get all metrics as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            requests_validated: self.requests_validated.load(Ordering::Relaxed),
            requests_rejected: self.requests_rejected.load(Ordering::Relaxed),
            validation_errors: self.validation_errors.load(Ordering::Relaxed),
            schemas_loaded: self.schemas_loaded.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time snapshot of all metrics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub requests_validated: u64,
    pub requests_rejected: u64,
    pub validation_errors: u64,
    pub schemas_loaded: u64,
}
