//! Schema-free producer metadata.
//!
//! Producers attach run metadata to a flowpipe without changing its type:
//! the algorithm that built it, step sizes, tolerances, raw payloads.
//! Consumers must tolerate missing keys, so every getter returns `Option`.

use crate::error::{FlowpipeError, Result};
use bytes::Bytes;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// A metadata value attached by a producer.
///
/// The value kinds are closed and serializable; anything richer belongs in
/// [`ExtensionValue::Bytes`] under a producer-defined encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtensionValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Bytes(Bytes),
}

impl From<bool> for ExtensionValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for ExtensionValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for ExtensionValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for ExtensionValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for ExtensionValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<Bytes> for ExtensionValue {
    fn from(v: Bytes) -> Self {
        Self::Bytes(v)
    }
}

/// Key→value store for producer metadata.
///
/// # Examples
///
/// ```
/// use flowpipe::Extension;
///
/// let mut ext = Extension::new();
/// ext.insert("algorithm", "glgm06");
/// ext.insert("step_size", 0.01);
///
/// assert_eq!(ext.get_str("algorithm"), Some("glgm06"));
/// assert_eq!(ext.get_float("step_size"), Some(0.01));
/// // Missing keys are not an error.
/// assert_eq!(ext.get_int("iterations"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Extension {
    entries: FxHashMap<String, ExtensionValue>,
}

impl Extension {
    /// Create an empty extension map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an entry, returning the previous value if any.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<ExtensionValue>,
    ) -> Option<ExtensionValue> {
        self.entries.insert(key.into(), value.into())
    }

    /// Look up an entry.
    pub fn get(&self, key: &str) -> Option<&ExtensionValue> {
        self.entries.get(key)
    }

    /// Remove an entry, returning it if present.
    pub fn remove(&mut self, key: &str) -> Option<ExtensionValue> {
        self.entries.remove(key)
    }

    /// Look up a string entry.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.entries.get(key) {
            Some(ExtensionValue::Str(s)) => Some(s),
            _ => None,
        }
    }

    /// Look up an integer entry.
    pub fn get_int(&self, key: &str) -> Option<i64> {
        match self.entries.get(key) {
            Some(ExtensionValue::Int(v)) => Some(*v),
            _ => None,
        }
    }

    /// Look up a float entry.
    pub fn get_float(&self, key: &str) -> Option<f64> {
        match self.entries.get(key) {
            Some(ExtensionValue::Float(v)) => Some(*v),
            _ => None,
        }
    }

    /// Look up a boolean entry.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.entries.get(key) {
            Some(ExtensionValue::Bool(v)) => Some(*v),
            _ => None,
        }
    }

    /// Look up a raw payload entry.
    pub fn get_bytes(&self, key: &str) -> Option<&Bytes> {
        match self.entries.get(key) {
            Some(ExtensionValue::Bytes(b)) => Some(b),
            _ => None,
        }
    }

    /// Check whether a key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ExtensionValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Encode the map as a JSON string.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(&self.entries)
            .map_err(|e| FlowpipeError::Serialization(e.to_string()))
    }

    /// Decode a map from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let entries = serde_json::from_str(json)
            .map_err(|e| FlowpipeError::Serialization(e.to_string()))?;
        Ok(Self { entries })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut ext = Extension::new();
        assert!(ext.is_empty());

        ext.insert("name", "lgg09");
        ext.insert("steps", 400_i64);
        ext.insert("tolerance", 1e-6);
        ext.insert("verified", true);

        assert_eq!(ext.len(), 4);
        assert_eq!(ext.get_str("name"), Some("lgg09"));
        assert_eq!(ext.get_int("steps"), Some(400));
        assert_eq!(ext.get_float("tolerance"), Some(1e-6));
        assert_eq!(ext.get_bool("verified"), Some(true));
    }

    #[test]
    fn test_missing_keys_are_none() {
        let ext = Extension::new();
        assert_eq!(ext.get("anything"), None);
        assert_eq!(ext.get_str("anything"), None);
        assert!(!ext.contains_key("anything"));
    }

    #[test]
    fn test_typed_getter_mismatch() {
        let mut ext = Extension::new();
        ext.insert("steps", 400_i64);
        assert_eq!(ext.get_str("steps"), None);
        assert_eq!(ext.get_float("steps"), None);
    }

    #[test]
    fn test_insert_replaces() {
        let mut ext = Extension::new();
        ext.insert("k", 1_i64);
        let old = ext.insert("k", 2_i64);
        assert_eq!(old, Some(ExtensionValue::Int(1)));
        assert_eq!(ext.get_int("k"), Some(2));
    }

    #[test]
    fn test_bytes_value() {
        let mut ext = Extension::new();
        ext.insert("payload", Bytes::from_static(b"\x01\x02\x03"));
        assert_eq!(ext.get_bytes("payload").map(|b| b.as_ref()), Some(&b"\x01\x02\x03"[..]));
    }

    #[test]
    fn test_json_roundtrip() {
        let mut ext = Extension::new();
        ext.insert("algorithm", "box");
        ext.insert("steps", 100_i64);
        ext.insert("verified", false);

        let json = ext.to_json().unwrap();
        let back = Extension::from_json(&json).unwrap();
        assert_eq!(back.get_str("algorithm"), Some("box"));
        assert_eq!(back.get_int("steps"), Some(100));
        assert_eq!(back.get_bool("verified"), Some(false));
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(Extension::from_json("not json").is_err());
    }
}
