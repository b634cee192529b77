//! Settings resolution
//!
//! Runs exactly once at session initialization, before ticking begins.
//! The policy is fail-open: a missing file produces a persisted default
//! document, and an unreadable or malformed file produces in-memory
//! defaults — configuration problems never block simulation startup.

use super::document::SettingsDocument;
use crate::utils::sink::{LogSink, Severity};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const RPC_ENABLED_KEY: &str = "RpcEnabled";
pub const LOCAL_HOST_IP_KEY: &str = "LocalHostIp";
pub const FPV_VEHICLE_NAME_KEY: &str = "FpvVehicleName";
pub const ROSFLIGHT_KEY: &str = "RosFlight";
pub const REMOTE_CONTROL_ID_KEY: &str = "RemoteControlID";

pub const DEFAULT_RPC_ENABLED: bool = true;
pub const DEFAULT_API_SERVER_ADDRESS: &str = "127.0.0.1";
/// Expected to change soon, so the fallback document deliberately omits it.
pub const DEFAULT_VEHICLE_NAME: &str = "Pixhawk";
pub const DEFAULT_REMOTE_CONTROL_ID: i64 = 0;

/// Immutable snapshot of resolved settings values
///
/// Extracted once by [`resolve`] and held read-only for the rest of the
/// process lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedConfig {
    pub rpc_enabled: bool,
    pub api_server_address: String,
    pub default_vehicle_name: String,
    pub load_succeeded: bool,
    pub source_path: PathBuf,
}

impl ResolvedConfig {
    /// Snapshot of documented defaults, used on every non-loaded path
    fn defaults(source_path: &Path) -> Self {
        Self {
            rpc_enabled: DEFAULT_RPC_ENABLED,
            api_server_address: DEFAULT_API_SERVER_ADDRESS.to_string(),
            default_vehicle_name: DEFAULT_VEHICLE_NAME.to_string(),
            load_succeeded: false,
            source_path: source_path.to_path_buf(),
        }
    }
}

/// What `resolve` did with the settings resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum ResolveOutcome {
    /// Existing document parsed; values extracted
    Loaded { path: PathBuf },
    /// Document was absent; a default document was constructed and persisted
    Created { path: PathBuf },
    /// Document was unreadable or malformed; in-memory defaults used
    Failed { message: String },
}

/// Resolve runtime configuration from the settings file at `path`
///
/// Never returns an error: every failure degrades to documented defaults
/// and a sink report. Call once per process, before ticking begins.
pub fn resolve(path: &Path, sink: &dyn LogSink) -> (ResolvedConfig, ResolveOutcome) {
    match SettingsDocument::load(path) {
        Ok(Some(doc)) => {
            sink.log(
                &format!("Loaded settings from {}", path.display()),
                "",
                Severity::Informational,
            );

            let config = ResolvedConfig {
                rpc_enabled: doc.get_bool(RPC_ENABLED_KEY, DEFAULT_RPC_ENABLED),
                api_server_address: doc.get_string(LOCAL_HOST_IP_KEY, DEFAULT_API_SERVER_ADDRESS),
                default_vehicle_name: doc.get_string(FPV_VEHICLE_NAME_KEY, DEFAULT_VEHICLE_NAME),
                load_succeeded: true,
                source_path: path.to_path_buf(),
            };

            sink.log(
                "Vehicle name: ",
                &config.default_vehicle_name,
                Severity::Informational,
            );

            (
                config,
                ResolveOutcome::Loaded {
                    path: path.to_path_buf(),
                },
            )
        }
        Ok(None) => {
            // Write some settings into the new file so an empty document is
            // never persisted. The setter's return value is the resolved
            // value from here on.
            let mut doc = SettingsDocument::new();
            let rpc_enabled = doc.set_bool(RPC_ENABLED_KEY, DEFAULT_RPC_ENABLED);
            doc.set_string(LOCAL_HOST_IP_KEY, DEFAULT_API_SERVER_ADDRESS);

            let mut rosflight = SettingsDocument::new();
            rosflight.set_int(REMOTE_CONTROL_ID_KEY, DEFAULT_REMOTE_CONTROL_ID);
            doc.set_child(ROSFLIGHT_KEY, rosflight);

            match doc.save(path) {
                Ok(()) => sink.log(
                    &format!("Settings file {} is created.", path.display()),
                    "See docs for the full settings schema",
                    Severity::Informational,
                ),
                // Best-effort persist: report and continue with the values
                // already produced by the writes above.
                Err(err) => sink.log(
                    &format!("Error saving settings to {}", path.display()),
                    &err.to_string(),
                    Severity::Failure,
                ),
            }

            let config = ResolvedConfig {
                rpc_enabled,
                ..ResolvedConfig::defaults(path)
            };

            (
                config,
                ResolveOutcome::Created {
                    path: path.to_path_buf(),
                },
            )
        }
        Err(err) => {
            sink.log(
                &format!("Error loading settings from {}", path.display()),
                "",
                Severity::Failure,
            );
            sink.log(&err.to_string(), "", Severity::Failure);

            (
                ResolvedConfig::defaults(path),
                ResolveOutcome::Failed {
                    message: err.to_string(),
                },
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::sink::MemorySink;
    use tempfile::tempdir;

    #[test]
    fn test_resolve_loads_existing_settings() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{"RpcEnabled": false, "LocalHostIp": "10.0.0.2", "FpvVehicleName": "Iris"}"#,
        )
        .unwrap();

        let sink = MemorySink::new();
        let (config, outcome) = resolve(&path, &sink);

        assert_eq!(outcome, ResolveOutcome::Loaded { path: path.clone() });
        assert!(!config.rpc_enabled);
        assert_eq!(config.api_server_address, "10.0.0.2");
        assert_eq!(config.default_vehicle_name, "Iris");
        assert!(config.load_succeeded);
        assert!(sink.contains("Loaded settings"));
    }

    #[test]
    fn test_resolve_missing_fields_take_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{}").unwrap();

        let sink = MemorySink::new();
        let (config, outcome) = resolve(&path, &sink);

        assert!(matches!(outcome, ResolveOutcome::Loaded { .. }));
        assert!(config.rpc_enabled);
        assert_eq!(config.api_server_address, "127.0.0.1");
        assert_eq!(config.default_vehicle_name, "Pixhawk");
    }

    #[test]
    fn test_resolve_absent_file_creates_default_document() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let sink = MemorySink::new();
        let (config, outcome) = resolve(&path, &sink);

        assert_eq!(outcome, ResolveOutcome::Created { path: path.clone() });
        assert!(config.rpc_enabled);
        assert!(!config.load_succeeded);
        assert!(path.exists());

        // Re-load and verify the persisted shape
        let doc = SettingsDocument::load(&path).unwrap().unwrap();
        assert!(doc.get_bool(RPC_ENABLED_KEY, false));
        assert_eq!(doc.get_string(LOCAL_HOST_IP_KEY, ""), "127.0.0.1");
        let rosflight = doc.get_child(ROSFLIGHT_KEY).unwrap();
        assert_eq!(rosflight.get_int(REMOTE_CONTROL_ID_KEY, -1), 0);
        // The vehicle name default is never written back
        assert_eq!(doc.get_string(FPV_VEHICLE_NAME_KEY, "absent"), "absent");
    }

    #[test]
    fn test_resolve_malformed_file_fails_open() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ definitely not json").unwrap();

        let sink = MemorySink::new();
        let (config, outcome) = resolve(&path, &sink);

        assert!(matches!(outcome, ResolveOutcome::Failed { .. }));
        assert!(config.rpc_enabled);
        assert_eq!(config.api_server_address, "127.0.0.1");
        assert_eq!(config.default_vehicle_name, "Pixhawk");
        assert!(!config.load_succeeded);
        // Malformed input is reported but never persisted over
        assert!(sink.contains("Error loading settings"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ definitely not json");
    }

    #[test]
    fn test_resolve_persist_failure_still_yields_created() {
        let dir = tempdir().unwrap();
        // A regular file where the parent directory should be makes the
        // persist fail while the load path still sees an absent document
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let path = blocker.join("settings.json");

        let sink = MemorySink::new();
        let (config, outcome) = resolve(&path, &sink);

        assert_eq!(outcome, ResolveOutcome::Created { path: path.clone() });
        assert!(config.rpc_enabled);
        assert!(sink
            .records()
            .iter()
            .any(|r| r.severity == Severity::Failure));
    }
}
