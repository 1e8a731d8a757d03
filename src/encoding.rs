//! Value codecs applied at the view boundary.
//!
//! Backends store raw bytes; every view carries a [`ValueEncoding`] that
//! decides how those bytes are decoded on read. Derived views inherit their
//! parent's encoding unless overridden.

use derive_more::{From, TryInto};
use serde::{Deserialize, Serialize};

use crate::error::SublevelResult;

/// Named codec for values stored under a namespace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueEncoding {
    /// Bytes in, bytes out.
    Raw,
    /// UTF-8 text.
    #[default]
    Utf8,
    /// JSON documents, decoded into [`serde_json::Value`].
    Json,
}

impl ValueEncoding {
    /// Decode raw backend bytes according to this codec.
    pub fn decode(&self, raw: Vec<u8>) -> SublevelResult<Value> {
        match self {
            ValueEncoding::Raw => Ok(Value::Bytes(raw)),
            ValueEncoding::Utf8 => Ok(Value::Text(String::from_utf8(raw)?)),
            ValueEncoding::Json => Ok(Value::Json(serde_json::from_slice(&raw)?)),
        }
    }

    /// Encode a value for storage.
    ///
    /// Encoding follows the value's own variant; the codec governs decoding.
    pub fn encode(&self, value: &Value) -> SublevelResult<Vec<u8>> {
        match value {
            Value::Bytes(bytes) => Ok(bytes.clone()),
            Value::Text(text) => Ok(text.clone().into_bytes()),
            Value::Json(json) => Ok(serde_json::to_vec(json)?),
        }
    }
}

/// A decoded value.
#[derive(Debug, Clone, PartialEq, From, TryInto)]
pub enum Value {
    Bytes(Vec<u8>),
    Text(String),
    Json(serde_json::Value),
}

impl Value {
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Value::Json(json) => Some(json),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_owned())
    }
}

impl From<&[u8]> for Value {
    fn from(bytes: &[u8]) -> Self {
        Value::Bytes(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_decodes_text() {
        let value = ValueEncoding::Utf8.decode(b"hello".to_vec()).unwrap();
        assert_eq!(value, Value::Text("hello".into()));
    }

    #[test]
    fn utf8_rejects_invalid_bytes() {
        assert!(ValueEncoding::Utf8.decode(vec![0xff, 0xfe]).is_err());
    }

    #[test]
    fn raw_passes_bytes_through() {
        let value = ValueEncoding::Raw.decode(vec![0xff, 0xfe]).unwrap();
        assert_eq!(value, Value::Bytes(vec![0xff, 0xfe]));
    }

    #[test]
    fn json_round_trips() {
        let encoding = ValueEncoding::Json;
        let value = Value::Json(serde_json::json!({"active": true, "logins": 3}));
        let raw = encoding.encode(&value).unwrap();
        assert_eq!(encoding.decode(raw).unwrap(), value);
    }

    #[test]
    fn encode_follows_the_value_variant() {
        let raw = ValueEncoding::Utf8.encode(&Value::Bytes(vec![1, 2, 3])).unwrap();
        assert_eq!(raw, vec![1, 2, 3]);
    }
}
