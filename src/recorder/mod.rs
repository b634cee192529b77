//! Recording system module
//!
//! - RecordingController: owns the capture file handle and tick counter
//! - RecordingState / RecordingAnomaly: state machine and reportable
//!   precondition violations

pub mod controller;
pub mod state;

pub use controller::RecordingController;
pub use state::{RecordingAnomaly, RecordingState};
