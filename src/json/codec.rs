//! JSON bytes <-> `serde_json::Value`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

use crate::error::{Result, StoreError};

/// Output layout for encoded JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JsonFormat {
    #[default]
    Compact,
    Pretty,
}

/// Encode any serializable value.
pub fn encode<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<Vec<u8>> {
    let bytes = match format {
        JsonFormat::Compact => serde_json::to_vec(value),
        JsonFormat::Pretty => serde_json::to_vec_pretty(value),
    };
    bytes.map_err(StoreError::Encode)
}

/// Parse bytes into a JSON tree. Top-level scalars are accepted.
///
/// `origin` only feeds the error message.
pub fn decode(bytes: &[u8], origin: &Path) -> Result<Value> {
    decode_as(bytes, origin)
}

pub fn decode_as<T: serde::de::DeserializeOwned>(bytes: &[u8], origin: &Path) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|source| StoreError::Decode {
        path: origin.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeMap;

    #[test]
    fn test_compact_and_pretty() {
        let value = json!({"id": 7, "tags": ["a", "b"]});

        let compact = encode(&value, JsonFormat::Compact).unwrap();
        assert_eq!(compact, br#"{"id":7,"tags":["a","b"]}"#.to_vec());

        let pretty = encode(&value, JsonFormat::Pretty).unwrap();
        assert!(pretty.contains(&b'\n'));
        assert_eq!(decode(&pretty, Path::new("x")).unwrap(), value);
    }

    #[test]
    fn test_fragments_allowed() {
        assert_eq!(decode(b"42", Path::new("x")).unwrap(), json!(42));
        assert_eq!(decode(br#""hi""#, Path::new("x")).unwrap(), json!("hi"));
        assert_eq!(decode(b"null", Path::new("x")).unwrap(), Value::Null);
    }

    #[test]
    fn test_malformed_reports_origin() {
        let err = decode(b"{not json", Path::new("/docs/content/bad.json")).unwrap_err();
        match err {
            StoreError::Decode { path, .. } => {
                assert_eq!(path, Path::new("/docs/content/bad.json"))
            }
            other => panic!("expected Decode, got {other:?}"),
        }
    }

    #[test]
    fn test_non_string_map_keys_fail_to_encode() {
        let mut map = BTreeMap::new();
        map.insert(vec![1u8], "v");
        let err = encode(&map, JsonFormat::Compact).unwrap_err();
        assert!(matches!(err, StoreError::Encode(_)));
    }
}
