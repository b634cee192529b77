//! Settings store and one-shot configuration resolution
//!
//! - `SettingsDocument`: the tree-shaped key/value store behind the
//!   settings file
//! - `resolve`: the fail-open extraction pass producing the immutable
//!   `ResolvedConfig` snapshot

pub mod document;
pub mod resolver;

pub use document::SettingsDocument;
pub use resolver::{resolve, ResolveOutcome, ResolvedConfig};
