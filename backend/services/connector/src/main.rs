use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use buildops_config::{init_tracing, AppConfig};
use buildops_connector::api::{build_router, AppState};
use buildops_connector::buildops::BuildOpsConnector;
use buildops_sdk::Connector;

#[tokio::main]
async fn main() {
    init_tracing("info");

    let config = AppConfig::from_env().expect("failed to load config");
    tracing::info!(
        service = "buildops-connector",
        buildops_host = %config.buildops.host,
        "starting"
    );

    let connector = BuildOpsConnector::new(Duration::from_secs(config.buildops.timeout_secs));
    let configuration = config.connector_configuration();
    if let Err(e) = connector.validate_configuration(&configuration) {
        tracing::warn!(error = %e, "buildops credentials incomplete, /sync requests will fail");
    }

    let app = build_router(AppState::new(configuration, Arc::new(connector)));
    let addr: SocketAddr = config.bind_addr().parse().expect("invalid bind address");

    tracing::info!(%addr, "listening");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind");
    axum::serve(listener, app).await.expect("server error");
}
