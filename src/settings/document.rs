//! Settings document storage
//!
//! A tree-shaped key/value store backed by a JSON object. Dynamic
//! string-keyed lookup lives only here, at the parsing boundary; everything
//! above extracts typed values with explicit defaults.

use crate::utils::error::{SettingsError, SettingsResult};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Mutable settings tree, loaded from or persisted to a JSON file
///
/// Keys are case-sensitive and unique within a node; writing an existing key
/// replaces its value. Setters return the value actually stored in the tree,
/// so a caller on the fallback path can treat the write's result as
/// authoritative.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsDocument {
    root: Map<String, Value>,
}

impl SettingsDocument {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a document from a JSON file
    ///
    /// Returns `Ok(None)` when the file does not exist (caller takes the
    /// fallback path) and `Err` when the file exists but cannot be read or
    /// parsed, or its root is not an object.
    pub fn load(path: &Path) -> SettingsResult<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path)?;
        let value: Value = serde_json::from_str(&content)?;
        match value {
            Value::Object(root) => {
                tracing::debug!("Loaded settings document from {:?}", path);
                Ok(Some(Self { root }))
            }
            other => Err(SettingsError::Malformed(format!(
                "expected a JSON object at the document root, found {other}"
            ))),
        }
    }

    /// Persist the document as pretty-printed JSON, creating parent
    /// directories as needed
    pub fn save(&self, path: &Path) -> SettingsResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(&Value::Object(self.root.clone()))?;
        fs::write(path, content)?;

        tracing::debug!("Saved settings document to {:?}", path);
        Ok(())
    }

    /// Get a bool field, falling back to `default` if absent or mistyped
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.root.get(key).and_then(Value::as_bool).unwrap_or(default)
    }

    /// Get a string field, falling back to `default` if absent or mistyped
    pub fn get_string(&self, key: &str, default: &str) -> String {
        self.root
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or(default)
            .to_string()
    }

    /// Get an integer field, falling back to `default` if absent or mistyped
    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        self.root.get(key).and_then(Value::as_i64).unwrap_or(default)
    }

    /// Get a nested child document, if present
    pub fn get_child(&self, key: &str) -> Option<SettingsDocument> {
        match self.root.get(key) {
            Some(Value::Object(map)) => Some(Self { root: map.clone() }),
            _ => None,
        }
    }

    /// Store a bool and return the value now held in the tree
    pub fn set_bool(&mut self, key: &str, value: bool) -> bool {
        self.root.insert(key.to_string(), Value::Bool(value));
        self.get_bool(key, value)
    }

    /// Store a string and return the value now held in the tree
    pub fn set_string(&mut self, key: &str, value: &str) -> String {
        self.root
            .insert(key.to_string(), Value::String(value.to_string()));
        self.get_string(key, value)
    }

    /// Store an integer and return the value now held in the tree
    pub fn set_int(&mut self, key: &str, value: i64) -> i64 {
        self.root.insert(key.to_string(), Value::Number(value.into()));
        self.get_int(key, value)
    }

    /// Store a nested child document under `key`
    pub fn set_child(&mut self, key: &str, child: SettingsDocument) {
        self.root.insert(key.to_string(), Value::Object(child.root));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_set_replaces_existing_key() {
        let mut doc = SettingsDocument::new();
        assert!(doc.set_bool("RpcEnabled", true));
        assert!(!doc.set_bool("RpcEnabled", false));
        assert!(!doc.get_bool("RpcEnabled", true));
    }

    #[test]
    fn test_typed_get_with_defaults() {
        let mut doc = SettingsDocument::new();
        doc.set_string("LocalHostIp", "0.0.0.0");

        assert_eq!(doc.get_string("LocalHostIp", "127.0.0.1"), "0.0.0.0");
        assert_eq!(doc.get_string("Missing", "127.0.0.1"), "127.0.0.1");
        // Mistyped field falls back too
        assert!(doc.get_bool("LocalHostIp", true));
        assert_eq!(doc.get_int("LocalHostIp", 7), 7);
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let mut doc = SettingsDocument::new();
        doc.set_bool("RpcEnabled", true);
        let mut child = SettingsDocument::new();
        child.set_int("RemoteControlID", 0);
        doc.set_child("RosFlight", child);

        doc.save(&path).unwrap();

        let loaded = SettingsDocument::load(&path).unwrap().unwrap();
        assert!(loaded.get_bool("RpcEnabled", false));
        let rosflight = loaded.get_child("RosFlight").unwrap();
        assert_eq!(rosflight.get_int("RemoteControlID", -1), 0);
    }

    #[test]
    fn test_load_absent_file_is_none() {
        let dir = tempdir().unwrap();
        let result = SettingsDocument::load(&dir.path().join("missing.json")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(SettingsDocument::load(&path).is_err());
    }

    #[test]
    fn test_load_rejects_non_object_root() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();
        assert!(SettingsDocument::load(&path).is_err());
    }
}
