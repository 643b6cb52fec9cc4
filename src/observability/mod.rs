//! Observability subsystem for vet
//!
//! - Structured logging (JSON lines)
//! - Typed lifecycle and request events
//! - Lock-free counters
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. The validation engine stays pure; only the layers around it log
//! 3. No async or background threads
//!
//! # Usage
//!
//! ```ignore
//! use vet::observability::{log_event_with_fields, Event, MetricsRegistry};
//!
//! log_event_with_fields(Event::SchemasLoaded, &[("count", "3")]);
//!
//! let metrics = MetricsRegistry::new();
//! metrics.increment_validated();
//! ```

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};

/// Log a lifecycle event
pub fn log_event(event: Event) {
    log_event_with_fields(event, &[]);
}

/// Log a lifecycle event with fields
///
/// Fatal events are logged at FATAL (stderr), everything else at INFO.
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    let severity = if event.is_fatal() {
        Severity::Fatal
    } else {
        Severity::Info
    };
    Logger::log(severity, event.as_str(), fields);
}
