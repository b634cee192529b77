//! Log sink abstraction
//!
//! The host framework owns log formatting and transport; this core only
//! emits (message, detail, severity) triples through the `LogSink` seam.
//! `TracingSink` is the default production sink; `MemorySink` captures
//! records for tests and host diagnostics.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Severity of a sink record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Routine milestone (config loaded, vehicle name, ...)
    Informational,
    /// Positive state change (recording started/stopped)
    Success,
    /// Anomaly or error; never fatal to the host
    Failure,
}

/// One delivered (message, detail, severity) triple
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogRecord {
    pub message: String,
    pub detail: String,
    pub severity: Severity,
}

/// Receiver for anomalies and informational milestones
pub trait LogSink: Send + Sync {
    fn log(&self, message: &str, detail: &str, severity: Severity);
}

/// Sink that forwards records to the `tracing` subscriber
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&self, message: &str, detail: &str, severity: Severity) {
        match severity {
            Severity::Informational => tracing::info!(detail, "{message}"),
            Severity::Success => tracing::info!(detail, "{message}"),
            Severity::Failure => tracing::warn!(detail, "{message}"),
        }
    }
}

/// Sink that retains every record in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<LogRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all records delivered so far
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().clone()
    }

    /// Whether any record's message contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.records
            .lock()
            .iter()
            .any(|r| r.message.contains(needle) || r.detail.contains(needle))
    }
}

impl LogSink for MemorySink {
    fn log(&self, message: &str, detail: &str, severity: Severity) {
        self.records.lock().push(LogRecord {
            message: message.to_string(),
            detail: detail.to_string(),
            severity,
        });
    }
}
