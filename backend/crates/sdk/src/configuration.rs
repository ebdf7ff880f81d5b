use std::collections::BTreeMap;
use std::path::Path;

use buildops_common::error::{ConnectorError, ConnectorResult};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// Connection settings handed to a connector, keyed by field name.
///
/// JSON `null` values are dropped on load so they count as absent. Scalars
/// that are not strings are kept in their JSON text form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "BTreeMap<String, Value>")]
pub struct Configuration(BTreeMap<String, String>);

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Value for `key` when present and not blank.
    pub fn non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.trim().is_empty())
    }

    /// Every key from `required` that is absent or blank, in `required` order.
    pub fn missing_keys(&self, required: &[&str]) -> Vec<String> {
        required
            .iter()
            .filter(|key| self.non_empty(key).is_none())
            .map(|key| (*key).to_string())
            .collect()
    }

    /// Fails with [`ConnectorError::MissingConfiguration`] naming every missing key.
    pub fn require(&self, required: &[&str]) -> ConnectorResult<()> {
        let missing = self.missing_keys(required);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ConnectorError::MissingConfiguration(missing))
        }
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> ConnectorResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ConnectorError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        serde_json::from_str(&raw).map_err(|e| {
            ConnectorError::Config(format!("invalid configuration in {}: {e}", path.display()))
        })
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl From<BTreeMap<String, Value>> for Configuration {
    fn from(raw: BTreeMap<String, Value>) -> Self {
        let inner = raw
            .into_iter()
            .filter_map(|(key, value)| match value {
                Value::Null => None,
                Value::String(s) => Some((key, s)),
                other => Some((key, other.to_string())),
            })
            .collect();
        Self(inner)
    }
}

impl Serialize for Configuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}
