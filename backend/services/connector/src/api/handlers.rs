use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use buildops_common::types::ServiceInfo;
use buildops_sdk::{handle, SyncResponse};

use crate::api::error::ApiError;
use crate::api::requests::{SyncMethod, SyncRequest};
use crate::api::AppState;

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

pub async fn info(State(state): State<AppState>) -> Json<ServiceInfo> {
    Json(state.info.as_ref().clone())
}

pub async fn sync(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SyncResponse>, ApiError> {
    let request = SyncRequest::parse(&body)?;
    let method = request.method();
    let prior = request.into_state();

    state
        .connector
        .validate_configuration(&state.configuration)?;

    let response = match method {
        SyncMethod::Update => {
            tracing::info!(
                source = state.connector.source_name(),
                last_sync_time = ?prior.last_sync_time,
                "update requested"
            );
            let operations = state
                .connector
                .update(&state.configuration, &prior)
                .await?;
            handle(operations)
        }
        SyncMethod::Schema => {
            tracing::info!(source = state.connector.source_name(), "schema requested");
            SyncResponse::schema(state.connector.schema(&state.configuration))
        }
    };

    Ok(Json(response))
}
