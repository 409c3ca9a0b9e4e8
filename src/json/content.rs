//! JSON documents on top of [`ContentStore`].

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;
use tracing::warn;

use super::codec::{decode_as, encode};
use crate::error::{Result, StoreError};
use crate::storage::ContentStore;

impl ContentStore {
    /// Encode `value` and save it as `file_name`.
    ///
    /// Encoding happens before anything touches the disk, so a value that
    /// cannot be encoded never leaves a partial file behind.
    pub fn try_save_as<T: Serialize + ?Sized>(
        &self,
        value: &T,
        file_name: &str,
    ) -> Result<PathBuf> {
        let bytes = encode(value, self.config().json_format)?;
        self.try_save_content_file(file_name, &bytes)
    }

    pub fn try_load_as<T: DeserializeOwned>(&self, file_name: &str) -> Result<T> {
        let bytes = self.try_load_content_file(file_name)?;
        decode_as(&bytes, &self.content_file_path(file_name)?)
    }

    /// Save a typed value as JSON. `None` on any failure.
    pub fn save_as<T: Serialize + ?Sized>(&self, value: &T, file_name: &str) -> Option<PathBuf> {
        self.try_save_as(value, file_name)
            .map_err(|e| warn!(file = file_name, error = %e, "JSON save failed"))
            .ok()
    }

    /// Load a typed value. Missing, unreadable and malformed files all
    /// come back as `None`.
    pub fn load_as<T: DeserializeOwned>(&self, file_name: &str) -> Option<T> {
        match self.try_load_as(file_name) {
            Ok(value) => Some(value),
            Err(StoreError::NotFound(_)) => None,
            Err(e) => {
                warn!(file = file_name, error = %e, "JSON load failed");
                None
            }
        }
    }

    pub fn try_save_json(&self, value: &Value, file_name: &str) -> Result<PathBuf> {
        self.try_save_as(value, file_name)
    }

    pub fn try_load_json(&self, file_name: &str) -> Result<Value> {
        self.try_load_as(file_name)
    }

    pub fn save_json(&self, value: &Value, file_name: &str) -> Option<PathBuf> {
        self.save_as(value, file_name)
    }

    pub fn load_json(&self, file_name: &str) -> Option<Value> {
        self.load_as(file_name)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::StoreConfig;
    use crate::error::StoreError;
    use crate::json::JsonFormat;
    use crate::storage::ContentStore;
    use serde::{Deserialize, Serialize};
    use serde_json::json;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::tempdir;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Session {
        user: String,
        visits: u32,
        last_page: Option<String>,
    }

    #[test]
    fn test_json_roundtrip() {
        let dir = tempdir().unwrap();
        let store = ContentStore::open(StoreConfig::with_root(dir.path())).unwrap();

        let value = json!({
            "title": "Inspection",
            "items": [1, 2.5, null, true, {"nested": ["x"]}],
            "empty": {}
        });
        store.save_json(&value, "inspection.json").unwrap();
        assert_eq!(store.load_json("inspection.json").unwrap(), value);
    }

    #[test]
    fn test_typed_roundtrip() {
        let dir = tempdir().unwrap();
        let store = ContentStore::open(StoreConfig::with_root(dir.path())).unwrap();

        let session = Session {
            user: "ana".into(),
            visits: 3,
            last_page: None,
        };
        store.save_as(&session, "session.json").unwrap();
        assert_eq!(store.load_as::<Session>("session.json").unwrap(), session);

        // Right JSON, wrong shape
        assert!(store.load_as::<Vec<u8>>("session.json").is_none());
    }

    #[test]
    fn test_malformed_is_none_but_distinct_in_try() {
        let dir = tempdir().unwrap();
        let store = ContentStore::open(StoreConfig::with_root(dir.path())).unwrap();

        let path = store.content_file_path("bad.json").unwrap();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, b"\x00\x01 definitely not json").unwrap();

        assert!(store.load_json("bad.json").is_none());
        assert!(matches!(store.try_load_json("bad.json"), Err(StoreError::Decode { .. })));
        assert!(matches!(store.try_load_json("never.json"), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn test_encode_failure_writes_nothing() {
        let dir = tempdir().unwrap();
        let store = ContentStore::open(StoreConfig::with_root(dir.path())).unwrap();

        let mut bad: HashMap<(u8, u8), u8> = HashMap::new();
        bad.insert((1, 2), 3);

        assert!(store.save_as(&bad, "bad.json").is_none());
        assert!(!store.content_file_path("bad.json").unwrap().exists());
        assert!(!store.content_dir().exists());
    }

    #[test]
    fn test_pretty_format_from_config() {
        let dir = tempdir().unwrap();
        let store = ContentStore::open(StoreConfig {
            json_format: JsonFormat::Pretty,
            ..StoreConfig::with_root(dir.path())
        })
        .unwrap();

        let path = store.save_json(&json!({"a": 1}), "p.json").unwrap();
        let text = fs::read_to_string(path).unwrap();
        assert_eq!(text, "{\n  \"a\": 1\n}");
        assert_eq!(store.load_json("p.json").unwrap(), json!({"a": 1}));
    }
}
