use async_trait::async_trait;
use buildops_common::error::ConnectorResult;
use serde::Serialize;

use crate::configuration::Configuration;
use crate::operation::Operation;
use crate::schema::TableSchema;
use crate::state::State;

/// Lazily produced operations from one `update` call.
pub type Operations = Box<dyn Iterator<Item = Operation> + Send>;

#[async_trait]
pub trait Connector: Send + Sync {
    fn source_name(&self) -> &str;

    /// Rejects a configuration that can never sync. Must not touch the network.
    fn validate_configuration(&self, _configuration: &Configuration) -> ConnectorResult<()> {
        Ok(())
    }

    /// Tables this connector writes to. Must not fail or touch the network.
    fn schema(&self, configuration: &Configuration) -> Vec<TableSchema>;

    /// Fetches from the source and returns upserts followed by one checkpoint.
    ///
    /// On error nothing has been emitted; the caller retries the whole call.
    async fn update(
        &self,
        configuration: &Configuration,
        state: &State,
    ) -> ConnectorResult<Operations>;
}

/// Response envelope returned to the orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SyncResponse {
    Schema {
        schema: Vec<TableSchema>,
    },
    Update {
        operations: Vec<Operation>,
        count: usize,
    },
}

impl SyncResponse {
    pub fn schema(tables: Vec<TableSchema>) -> Self {
        Self::Schema { schema: tables }
    }
}

/// Drains an operation sequence into an update response, keeping order.
pub fn handle(operations: impl IntoIterator<Item = Operation>) -> SyncResponse {
    let mut drained = Vec::new();
    let mut checkpoints = 0usize;
    for op in operations {
        if op.is_checkpoint() {
            checkpoints += 1;
        }
        drained.push(op);
    }
    tracing::debug!(
        operations = drained.len(),
        checkpoints,
        "drained operation sequence"
    );
    SyncResponse::Update {
        count: drained.len(),
        operations: drained,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Column, ColumnType};
    use serde_json::json;

    fn record(id: &str) -> crate::operation::Record {
        json!({ "id": id }).as_object().cloned().unwrap()
    }

    #[test]
    fn handle_keeps_order_and_counts() {
        let ops = vec![
            Operation::upsert("customers", record("a")),
            Operation::upsert("customers", record("b")),
            Operation::checkpoint(State::at(10)),
        ];
        let response = handle(ops.clone());
        assert_eq!(
            response,
            SyncResponse::Update {
                operations: ops,
                count: 3
            }
        );
    }

    #[test]
    fn handle_pulls_lazily_from_iterators() {
        let ops: Operations = Box::new(
            (0..2)
                .map(|i| Operation::upsert("t", record(&i.to_string())))
                .chain(std::iter::once(Operation::checkpoint(State::at(1)))),
        );
        match handle(ops) {
            SyncResponse::Update { operations, count } => {
                assert_eq!(count, 3);
                assert!(operations[2].is_checkpoint());
            }
            other => panic!("expected update response, got: {other:?}"),
        }
    }

    #[test]
    fn update_envelope_wire_format() {
        let response = handle(vec![Operation::checkpoint(State::at(7))]);
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "operations": [{"type": "checkpoint", "state": {"last_sync_time": 7}}],
                "count": 1
            })
        );
    }

    #[test]
    fn schema_envelope_wire_format() {
        let response = SyncResponse::schema(vec![TableSchema {
            name: "t".into(),
            columns: vec![Column::required("id", ColumnType::String)],
            primary_key: vec!["id".into()],
        }]);
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["schema"][0]["name"], "t");
        assert!(value.get("operations").is_none());
    }
}
