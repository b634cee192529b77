//! Shared utilities: error taxonomy and the log sink seam

pub mod error;
pub mod sink;

pub use error::{SettingsError, SettingsResult};
pub use sink::{LogRecord, LogSink, MemorySink, Severity, TracingSink};
