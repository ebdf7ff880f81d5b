use buildops_common::error::{ConnectorError, ConnectorResult};
use buildops_sdk::State;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMethod {
    Update,
    Schema,
}

/// Body of `POST /sync`.
#[derive(Debug, Default, Deserialize)]
pub struct SyncRequest {
    #[serde(default)]
    pub method: Option<Value>,
    #[serde(default)]
    pub state: Option<State>,
}

impl SyncRequest {
    /// Parses the raw body as JSON whatever the declared content type is.
    pub fn parse(body: &[u8]) -> ConnectorResult<Self> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| ConnectorError::Validation(format!("request body is not valid JSON: {e}")))?;
        if !value.is_object() {
            return Err(ConnectorError::Validation(
                "request body must be a JSON object".to_string(),
            ));
        }
        serde_json::from_value(value)
            .map_err(|e| ConnectorError::Validation(format!("invalid sync request: {e}")))
    }

    /// `"update"` runs a sync; anything else, including no method, is a schema call.
    pub fn method(&self) -> SyncMethod {
        match self.method.as_ref().and_then(Value::as_str) {
            Some("update") => SyncMethod::Update,
            _ => SyncMethod::Schema,
        }
    }

    pub fn into_state(self) -> State {
        self.state.unwrap_or_default()
    }
}
