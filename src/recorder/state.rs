//! Recording state definitions
//!
//! The controller's state machine and the anomaly vocabulary it reports
//! through the log sink.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Current state of the recording session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordingState {
    /// No capture file open, ticks not counted
    Idle,
    /// Capture file open, ticks counted
    Active,
}

impl Default for RecordingState {
    fn default() -> Self {
        Self::Idle
    }
}

/// Non-fatal precondition violations and failures reported by the controller
///
/// Every variant is delivered to the log sink; the controller converges to a
/// safe state (no dangling handle) regardless.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RecordingAnomaly {
    /// `start()` found a stale open handle; it was closed before proceeding
    AlreadyOpen,
    /// `stop()` found no open handle
    NotOpen,
    /// The capture file could not be created; the session stays idle
    CreateFailed { path: PathBuf },
}
