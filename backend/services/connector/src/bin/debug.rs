//! Local debug run: schema + update against an in-memory warehouse.
//!
//! Usage: `buildops-debug [configuration.json]`. State is read from and
//! written back to `state.json` in the working directory.

use buildops_common::error::ConnectorResult;
use buildops_config::init_tracing;
use buildops_connector::buildops::BuildOpsConnector;
use buildops_sdk::{debug, Configuration, State};

const DEFAULT_CONFIGURATION_FILE: &str = "configuration.json";
const STATE_FILE: &str = "state.json";

#[tokio::main]
async fn main() {
    init_tracing("info");

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIGURATION_FILE.to_string());

    if let Err(e) = run(&path).await {
        tracing::error!(kind = e.kind(), error = %e, "debug run failed");
        std::process::exit(1);
    }
}

async fn run(configuration_path: &str) -> ConnectorResult<()> {
    let configuration = Configuration::from_json_file(configuration_path)?;
    let state = State::load_or_default(STATE_FILE)?;
    tracing::info!(
        configuration = configuration_path,
        keys = ?configuration.keys().collect::<Vec<_>>(),
        last_sync_time = ?state.last_sync_time,
        "loaded debug inputs"
    );

    let report = debug(&BuildOpsConnector::default(), &configuration, state).await?;
    report.state.save(STATE_FILE)?;

    tracing::info!(state_file = STATE_FILE, "state written for next run");
    Ok(())
}
