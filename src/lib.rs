//! Simulation session bootstrap core.
//!
//! Resolves runtime configuration from a persisted settings store
//! (fail-open, defaults persisted on first run) and drives a file-backed
//! recording session in lockstep with the host's tick source. The host
//! framework owns the tick loop, input bindings, and log transport; it
//! calls into this crate at defined points:
//!
//! - [`SessionDriver::initialize`] once, before ticking begins
//! - [`SessionDriver::on_tick`] per tick event
//! - [`SessionDriver::toggle_recording`] per user trigger
//!
//! The core is single-threaded by contract; a multi-threaded host wraps the
//! driver in its own lock.

pub mod recorder;
pub mod session;
pub mod settings;
pub mod utils;

pub use recorder::{RecordingAnomaly, RecordingController, RecordingState};
pub use session::SessionDriver;
pub use settings::{resolve, ResolveOutcome, ResolvedConfig, SettingsDocument};
pub use utils::sink::{LogRecord, LogSink, MemorySink, Severity, TracingSink};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing/logging for hosts that do not install their own
/// subscriber
///
/// Honors `RUST_LOG`; defaults to debug-level output for this crate.
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "simsession=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("simsession v{}", env!("CARGO_PKG_VERSION"));
}
