//! Observability events for vet
//!
//! Events are explicit and typed. The validation engine itself emits
//! none; they are logged by the CLI and the HTTP gate around it.

use std::fmt;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Startup begins
    BootStart,
    /// Startup complete, ready to serve
    BootComplete,
    /// Configuration loaded
    ConfigLoaded,

    // Schemas
    /// All schema files loaded and checked
    SchemasLoaded,
    /// A schema definition failed its check (FATAL)
    SchemaRejected,

    // Requests
    /// Request body passed validation
    RequestValidated,
    /// Request body failed validation
    RequestRejected,

    // Server
    /// HTTP listener bound
    ServerListening,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "VET_STARTUP_BEGIN",
            Event::BootComplete => "VET_STARTUP_COMPLETE",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::SchemasLoaded => "SCHEMAS_LOADED",
            Event::SchemaRejected => "SCHEMA_REJECTED",
            Event::RequestValidated => "REQUEST_VALIDATED",
            Event::RequestRejected => "REQUEST_REJECTED",
            Event::ServerListening => "VET_SERVING",
        }
    }

    /// Returns true if this event indicates a fatal condition
    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::SchemaRejected)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
