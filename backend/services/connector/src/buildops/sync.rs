use std::time::Duration;

use async_trait::async_trait;
use buildops_common::error::{ConnectorError, ConnectorResult};
use buildops_sdk::{
    Column, ColumnType, Configuration, Connector, Operation, Operations, Record, State,
    TableSchema,
};
use chrono::Utc;

use super::client::BuildOpsClient;
use super::settings::validate_configuration;

pub const CUSTOMERS_TABLE: &str = "customers";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// The one table this connector writes.
pub fn customers_schema() -> Vec<TableSchema> {
    vec![TableSchema {
        name: CUSTOMERS_TABLE.to_string(),
        columns: vec![
            Column::required("id", ColumnType::String),
            Column::nullable("name", ColumnType::String),
            Column::nullable("status", ColumnType::String),
        ],
        primary_key: vec!["id".to_string()],
    }]
}

/// Upserts for each fetched record in source order, then a single checkpoint.
pub struct SyncOperations {
    records: std::vec::IntoIter<Record>,
    checkpoint: Option<State>,
}

impl SyncOperations {
    pub fn new(records: Vec<Record>, checkpoint: State) -> Self {
        Self {
            records: records.into_iter(),
            checkpoint: Some(checkpoint),
        }
    }
}

impl Iterator for SyncOperations {
    type Item = Operation;

    fn next(&mut self) -> Option<Operation> {
        match self.records.next() {
            Some(record) => Some(Operation::upsert(CUSTOMERS_TABLE, record)),
            None => self.checkpoint.take().map(Operation::checkpoint),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.records.len() + usize::from(self.checkpoint.is_some());
        (n, Some(n))
    }
}

impl ExactSizeIterator for SyncOperations {}

pub struct BuildOpsConnector {
    timeout: Duration,
}

impl BuildOpsConnector {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for BuildOpsConnector {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

#[async_trait]
impl Connector for BuildOpsConnector {
    fn source_name(&self) -> &str {
        "buildops"
    }

    fn validate_configuration(&self, configuration: &Configuration) -> ConnectorResult<()> {
        validate_configuration(configuration).map(|_| ())
    }

    fn schema(&self, _configuration: &Configuration) -> Vec<TableSchema> {
        customers_schema()
    }

    async fn update(
        &self,
        configuration: &Configuration,
        state: &State,
    ) -> ConnectorResult<Operations> {
        tracing::info!("starting sync for buildops customers");
        let settings = validate_configuration(configuration)?;

        // Advisory only: every sync is a full refresh.
        tracing::info!(last_sync_time = ?state.last_sync_time, "previous watermark");

        let client = BuildOpsClient::new(settings, self.timeout)
            .map_err(|e| ConnectorError::Internal(format!("build http client: {e}")))?;

        let records = client.fetch_customers().await.map_err(|e| {
            tracing::error!(error = %e, "buildops customer fetch failed");
            ConnectorError::from(e)
        })?;

        let new_sync_time = Utc::now().timestamp();
        tracing::info!(
            count = records.len(),
            new_sync_time,
            "fetched buildops customers"
        );

        Ok(Box::new(SyncOperations::new(
            records,
            State::at(new_sync_time),
        )))
    }
}
