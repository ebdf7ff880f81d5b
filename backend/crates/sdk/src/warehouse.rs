//! In-memory destination used by the local debug runner.

use std::collections::BTreeMap;

use buildops_common::error::{ConnectorError, ConnectorResult};
use serde_json::Value;

use crate::configuration::Configuration;
use crate::connector::Connector;
use crate::operation::{Operation, Record};
use crate::schema::TableSchema;
use crate::state::State;

const KEY_SEPARATOR: &str = "\u{1f}";

#[derive(Debug)]
struct LocalTable {
    primary_key: Vec<String>,
    rows: BTreeMap<String, Record>,
}

impl LocalTable {
    fn key_of(&self, table: &str, record: &Record) -> ConnectorResult<String> {
        let mut parts = Vec::with_capacity(self.primary_key.len());
        for column in &self.primary_key {
            let part = match record.get(column) {
                None | Some(Value::Null) => {
                    return Err(ConnectorError::Protocol(format!(
                        "record for table {table} is missing primary key column {column}"
                    )))
                }
                Some(Value::String(s)) => s.clone(),
                Some(other) => other.to_string(),
            };
            parts.push(part);
        }
        Ok(parts.join(KEY_SEPARATOR))
    }
}

/// Applies operations the way a destination would: upserts replace rows by
/// primary key and a checkpoint replaces the stored state.
#[derive(Debug)]
pub struct LocalWarehouse {
    tables: BTreeMap<String, LocalTable>,
    state: State,
    upserts: usize,
    checkpoints: usize,
}

impl LocalWarehouse {
    pub fn new(schema: &[TableSchema], state: State) -> Self {
        let tables = schema
            .iter()
            .map(|t| {
                (
                    t.name.clone(),
                    LocalTable {
                        primary_key: t.primary_key.clone(),
                        rows: BTreeMap::new(),
                    },
                )
            })
            .collect();
        Self {
            tables,
            state,
            upserts: 0,
            checkpoints: 0,
        }
    }

    pub fn apply(&mut self, operation: Operation) -> ConnectorResult<()> {
        match operation {
            Operation::Upsert { table, data } => {
                let target = self.tables.get_mut(&table).ok_or_else(|| {
                    ConnectorError::Protocol(format!("upsert into undeclared table {table}"))
                })?;
                let key = target.key_of(&table, &data)?;
                target.rows.insert(key, data);
                self.upserts += 1;
            }
            Operation::Checkpoint { state } => {
                self.state = state;
                self.checkpoints += 1;
            }
        }
        Ok(())
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn row_count(&self, table: &str) -> usize {
        self.tables.get(table).map_or(0, |t| t.rows.len())
    }

    /// Row stored under a single-column primary key value.
    pub fn row(&self, table: &str, key: &str) -> Option<&Record> {
        self.tables.get(table).and_then(|t| t.rows.get(key))
    }

    pub fn upserts(&self) -> usize {
        self.upserts
    }

    pub fn checkpoints(&self) -> usize {
        self.checkpoints
    }

    pub fn row_counts(&self) -> BTreeMap<String, usize> {
        self.tables
            .iter()
            .map(|(name, t)| (name.clone(), t.rows.len()))
            .collect()
    }
}

#[derive(Debug)]
pub struct DebugReport {
    pub upserts: usize,
    pub checkpoints: usize,
    pub row_counts: BTreeMap<String, usize>,
    pub state: State,
}

/// Runs schema then update against a fresh [`LocalWarehouse`].
pub async fn debug<C>(
    connector: &C,
    configuration: &Configuration,
    state: State,
) -> ConnectorResult<DebugReport>
where
    C: Connector + ?Sized,
{
    let schema = connector.schema(configuration);
    tracing::info!(
        source = connector.source_name(),
        tables = schema.len(),
        "debug run: schema declared"
    );

    let mut warehouse = LocalWarehouse::new(&schema, state.clone());
    for op in connector.update(configuration, &state).await? {
        warehouse.apply(op)?;
    }

    let report = DebugReport {
        upserts: warehouse.upserts(),
        checkpoints: warehouse.checkpoints(),
        row_counts: warehouse.row_counts(),
        state: warehouse.state().clone(),
    };
    tracing::info!(
        upserts = report.upserts,
        checkpoints = report.checkpoints,
        rows = ?report.row_counts,
        "debug run finished"
    );
    Ok(report)
}
