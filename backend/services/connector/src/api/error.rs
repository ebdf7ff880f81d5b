use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use buildops_common::error::ConnectorError;

pub struct ApiError(pub ConnectorError);

impl From<ConnectorError> for ApiError {
    fn from(err: ConnectorError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            ConnectorError::Validation(_) => StatusCode::BAD_REQUEST,
            ConnectorError::Authentication { .. }
            | ConnectorError::Upstream { .. }
            | ConnectorError::Protocol(_)
            | ConnectorError::Transport(_) => StatusCode::BAD_GATEWAY,
            ConnectorError::MissingConfiguration(_)
            | ConnectorError::Config(_)
            | ConnectorError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(kind = self.0.kind(), error = %self.0, "sync request failed");
        }

        let body = serde_json::json!({
            "error": self.0.to_string(),
            "kind": self.0.kind(),
        });
        (status, Json(body)).into_response()
    }
}
