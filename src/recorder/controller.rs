//! Recording session controller
//!
//! Owns at most one open capture file at a time and counts ticks while it
//! is open. All precondition violations are reported through the log sink
//! and corrected in place; nothing here is fatal to the host, and no code
//! path leaves a dangling handle.

use super::state::{RecordingAnomaly, RecordingState};
use crate::utils::sink::{LogSink, Severity};
use chrono::Utc;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Base name for derived capture file paths
pub const DEFAULT_BASE_NAME: &str = "recording";

/// File-backed recording session with a tick counter
///
/// Single-threaded by contract: the host drives one `toggle`/`on_tick` at a
/// time. A multi-threaded host wraps the controller (or the driver that owns
/// it) in its own lock.
pub struct RecordingController {
    output_dir: PathBuf,
    base_name: String,
    state: RecordingState,
    session_index: u64,
    tick_count: u64,
    record_file: Option<File>,
    output_path: Option<PathBuf>,
    sink: Arc<dyn LogSink>,
}

impl RecordingController {
    /// Create an idle controller writing capture files under `output_dir`
    pub fn new(output_dir: impl Into<PathBuf>, sink: Arc<dyn LogSink>) -> Self {
        Self {
            output_dir: output_dir.into(),
            base_name: DEFAULT_BASE_NAME.to_string(),
            state: RecordingState::Idle,
            session_index: 0,
            tick_count: 0,
            record_file: None,
            output_path: None,
            sink,
        }
    }

    /// Override the capture file base name
    pub fn with_base_name(mut self, base_name: impl Into<String>) -> Self {
        self.base_name = base_name.into();
        self
    }

    /// Whether a recording session is currently active
    pub fn is_active(&self) -> bool {
        self.state == RecordingState::Active
    }

    /// Ticks counted since the current session started
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Path of the currently open capture file, if any
    pub fn output_path(&self) -> Option<&Path> {
        self.output_path.as_deref()
    }

    /// Open a fresh capture file and begin counting ticks
    ///
    /// A stale open handle is closed (and reported) first. On creation
    /// failure the session stays idle.
    pub fn start(&mut self) {
        if self.record_file.take().is_some() {
            self.report(&RecordingAnomaly::AlreadyOpen);
        }

        self.session_index += 1;
        let path = self.derive_output_path();
        let created = fs::create_dir_all(&self.output_dir)
            .and_then(|()| File::create(&path));

        match created {
            Ok(file) => {
                self.state = RecordingState::Active;
                self.record_file = Some(file);
                self.output_path = Some(path);
                self.tick_count = 0;
                self.sink.log("Recording", "Started", Severity::Success);
            }
            Err(err) => {
                self.state = RecordingState::Idle;
                self.output_path = None;
                tracing::debug!("Capture file creation failed: {err}");
                self.report(&RecordingAnomaly::CreateFailed { path });
            }
        }
    }

    /// End the current session and release the capture file
    ///
    /// Idempotent with respect to resource safety: a redundant call reports
    /// an anomaly but never leaves a handle open.
    pub fn stop(&mut self) {
        self.state = RecordingState::Idle;

        match self.record_file.take() {
            None => {
                self.report(&RecordingAnomaly::NotOpen);
            }
            Some(file) => {
                drop(file);
                self.output_path = None;
                self.sink.log("Recording", "Stopped", Severity::Success);
            }
        }
    }

    /// Stop if active, start if idle; returns the resulting active flag
    ///
    /// The host's user-facing trigger maps 1:1 onto this; it is safe to
    /// invoke repeatedly in rapid succession.
    pub fn toggle(&mut self) -> bool {
        if self.is_active() {
            self.stop();
        } else {
            self.start();
        }

        self.is_active()
    }

    /// Count one tick; no-op while idle
    ///
    /// Call at most once per external tick event so the counter stays a
    /// meaningful elapsed-tick measure.
    pub fn on_tick(&mut self) {
        if self.is_active() {
            self.tick_count += 1;
        }
    }

    // Timestamp plus a per-controller session index, so rapid toggles in
    // the same instant still get distinct files.
    fn derive_output_path(&self) -> PathBuf {
        let stamp = Utc::now().format("%Y%m%d-%H%M%S");
        self.output_dir.join(format!(
            "{}_{}_{}.txt",
            self.base_name, stamp, self.session_index
        ))
    }

    fn report(&self, anomaly: &RecordingAnomaly) {
        match anomaly {
            RecordingAnomaly::AlreadyOpen => {
                self.sink
                    .log("Recording Error", "File was already open", Severity::Failure);
            }
            RecordingAnomaly::NotOpen => {
                self.sink
                    .log("Recording Error", "File was not open", Severity::Failure);
            }
            RecordingAnomaly::CreateFailed { path } => {
                self.sink.log(
                    "Error creating capture file",
                    &path.display().to_string(),
                    Severity::Failure,
                );
            }
        }
    }
}
