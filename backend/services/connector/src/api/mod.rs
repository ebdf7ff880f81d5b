pub mod error;
pub mod handlers;
pub mod requests;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use buildops_common::types::ServiceInfo;
use buildops_sdk::{Configuration, Connector};
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub configuration: Arc<Configuration>,
    pub connector: Arc<dyn Connector>,
    pub info: Arc<ServiceInfo>,
}

impl AppState {
    pub fn new(configuration: Configuration, connector: Arc<dyn Connector>) -> Self {
        Self {
            configuration: Arc::new(configuration),
            connector,
            info: Arc::new(ServiceInfo::new(
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
            )),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/info", get(handlers::info))
        .route("/sync", post(handlers::sync))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
