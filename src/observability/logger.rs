//! Structured JSON logger for vet
//!
//! Each call writes exactly one line: a JSON object with `event` and
//! `severity` first and the remaining fields sorted by key. Errors and
//! fatal events go to stderr so that stdout stays machine-readable.

use std::io::{self, Write};

use serde_json::{Map, Value};

/// Log severity levels, least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Trace,
    Info,
    Warn,
    Error,
    /// The process cannot continue
    Fatal,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }

    fn to_stderr(self) -> bool {
        self >= Severity::Error
    }
}

/// Line-oriented JSON logger
pub struct Logger;

impl Logger {
    /// Writes one record, choosing stdout or stderr by severity.
    pub fn log(severity: Severity, event: &str, fields: &[(&str, &str)]) {
        let line = Self::render(severity, event, fields);
        if severity.to_stderr() {
            Self::write_line(&mut io::stderr().lock(), &line);
        } else {
            Self::write_line(&mut io::stdout().lock(), &line);
        }
    }

    /// Renders a record without the trailing newline.
    pub fn render(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
        let mut sorted = fields.to_vec();
        sorted.sort_by(|a, b| a.0.cmp(b.0));

        let mut record = Map::with_capacity(sorted.len() + 2);
        record.insert("event".into(), Value::from(event));
        record.insert("severity".into(), Value::from(severity.as_str()));
        for (key, value) in sorted {
            record.insert(key.into(), Value::from(value));
        }

        Value::Object(record).to_string()
    }

    fn write_line<W: Write>(writer: &mut W, line: &str) {
        // a failed log write is dropped, never surfaced
        let _ = writeln!(writer, "{}", line).and_then(|_| writer.flush());
    }
}
