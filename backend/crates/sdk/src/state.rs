use std::path::Path;

use buildops_common::error::{ConnectorError, ConnectorResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Sync progress owned by the caller between invocations.
///
/// `last_sync_time` is epoch seconds; any other keys the caller sends are kept
/// as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct State {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_sync_time: Option<i64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl State {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(last_sync_time: i64) -> Self {
        Self {
            last_sync_time: Some(last_sync_time),
            extra: Map::new(),
        }
    }

    /// Loads state from `path`, or an empty state when the file does not exist.
    pub fn load_or_default(path: impl AsRef<Path>) -> ConnectorResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ConnectorError::Config(format!("cannot read {}: {e}", path.display())))?;
        serde_json::from_str(&raw)
            .map_err(|e| ConnectorError::Config(format!("invalid state in {}: {e}", path.display())))
    }

    pub fn save(&self, path: impl AsRef<Path>) -> ConnectorResult<()> {
        let path = path.as_ref();
        let body = serde_json::to_string_pretty(self)
            .map_err(|e| ConnectorError::Internal(format!("serialize state: {e}")))?;
        std::fs::write(path, body)
            .map_err(|e| ConnectorError::Internal(format!("cannot write {}: {e}", path.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_first_run() {
        let state: State = serde_json::from_str("{}").unwrap();
        assert_eq!(state.last_sync_time, None);
        assert!(state.extra.is_empty());
    }

    #[test]
    fn null_watermark_is_first_run() {
        let state: State = serde_json::from_str(r#"{"last_sync_time": null}"#).unwrap();
        assert_eq!(state.last_sync_time, None);
    }

    #[test]
    fn unknown_keys_are_preserved() {
        let state: State =
            serde_json::from_str(r#"{"last_sync_time": 1700000000, "cursor": "abc"}"#).unwrap();
        assert_eq!(state.last_sync_time, Some(1_700_000_000));
        assert_eq!(state.extra["cursor"], "abc");

        let back = serde_json::to_value(&state).unwrap();
        assert_eq!(back["cursor"], "abc");
        assert_eq!(back["last_sync_time"], 1_700_000_000);
    }

    #[test]
    fn checkpoint_state_reads_back() {
        let written = serde_json::to_string(&State::at(1_760_000_000)).unwrap();
        assert_eq!(written, r#"{"last_sync_time":1760000000}"#);
        let read: State = serde_json::from_str(&written).unwrap();
        assert_eq!(read, State::at(1_760_000_000));
    }

    #[test]
    fn non_integer_watermark_is_rejected() {
        let result: Result<State, _> = serde_json::from_str(r#"{"last_sync_time": "yesterday"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn load_missing_file_gives_empty_state() {
        let state = State::load_or_default("/nonexistent/state.json").unwrap();
        assert_eq!(state, State::default());
    }
}
