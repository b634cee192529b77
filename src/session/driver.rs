//! Session driver
//!
//! Composition root for the bootstrap core. The host framework constructs
//! one driver, calls `initialize` once before ticking begins, then feeds it
//! tick events and toggle triggers for the rest of the process lifetime.

use crate::recorder::RecordingController;
use crate::settings::{resolve, ResolveOutcome, ResolvedConfig};
use crate::utils::sink::LogSink;
use std::path::PathBuf;
use std::sync::Arc;

/// Owns the resolved configuration snapshot and the recording controller
pub struct SessionDriver {
    settings_path: PathBuf,
    config: Option<ResolvedConfig>,
    outcome: Option<ResolveOutcome>,
    recorder: RecordingController,
    sink: Arc<dyn LogSink>,
}

impl SessionDriver {
    /// Create an uninitialized driver
    ///
    /// `settings_path` is the well-known settings file location;
    /// `recording_dir` is where capture files are created.
    pub fn new(
        settings_path: impl Into<PathBuf>,
        recording_dir: impl Into<PathBuf>,
        sink: Arc<dyn LogSink>,
    ) -> Self {
        Self {
            settings_path: settings_path.into(),
            config: None,
            outcome: None,
            recorder: RecordingController::new(recording_dir, sink.clone()),
            sink,
        }
    }

    /// Resolve configuration and put the recorder in its idle state
    ///
    /// Runs the resolution pass exactly once; a second call is a no-op.
    /// Never fails: configuration problems degrade to defaults.
    pub fn initialize(&mut self) {
        if self.config.is_some() {
            tracing::debug!("Session driver already initialized, ignoring");
            return;
        }

        let (config, outcome) = resolve(&self.settings_path, self.sink.as_ref());
        tracing::info!(
            rpc_enabled = config.rpc_enabled,
            api_server_address = %config.api_server_address,
            vehicle = %config.default_vehicle_name,
            "Session initialized"
        );

        self.config = Some(config);
        self.outcome = Some(outcome);
    }

    /// Host tick callback; the time step is not consumed by this core
    pub fn on_tick(&mut self, _delta_seconds: f64) {
        if self.recorder.is_active() {
            self.recorder.on_tick();
        }
    }

    /// Host toggle trigger (e.g. a record hotkey); returns the new active flag
    pub fn toggle_recording(&mut self) -> bool {
        self.recorder.toggle()
    }

    /// Whether a recording session is currently active
    pub fn is_recording(&self) -> bool {
        self.recorder.is_active()
    }

    /// The resolved configuration snapshot, present after `initialize`
    pub fn config(&self) -> Option<&ResolvedConfig> {
        self.config.as_ref()
    }

    /// What the resolution pass did with the settings resource
    pub fn resolve_outcome(&self) -> Option<&ResolveOutcome> {
        self.outcome.as_ref()
    }

    /// Direct access to the recording controller
    pub fn recorder(&self) -> &RecordingController {
        &self.recorder
    }

    /// One-line status summary for host diagnostics
    pub fn report(&self) -> String {
        if self.recorder.is_active() {
            format!("recording active, {} ticks", self.recorder.tick_count())
        } else {
            "recording idle".to_string()
        }
    }
}
