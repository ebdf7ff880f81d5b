use std::time::Duration;

use buildops_common::error::ConnectorError;
use buildops_sdk::Record;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use super::models::{CustomersPage, TokenRequest, TokenResponse};
use super::settings::BuildOpsSettings;

pub const TOKEN_PATH: &str = "/v1/auth/token";
pub const CUSTOMERS_PATH: &str = "/v1/customers";

#[derive(Clone)]
pub struct BuildOpsClient {
    client: Client,
    settings: BuildOpsSettings,
}

#[derive(Debug, thiserror::Error)]
pub enum BuildOpsClientError {
    #[error("token request rejected with HTTP {status}: {body}")]
    AuthError { status: StatusCode, body: String },

    #[error("HTTP {status}: {body}")]
    HttpError { status: StatusCode, body: String },

    #[error("unexpected response from {endpoint}: {message}")]
    InvalidResponse {
        endpoint: &'static str,
        message: String,
    },

    #[error("request failed: {0}")]
    RequestError(#[from] reqwest::Error),
}

impl From<BuildOpsClientError> for ConnectorError {
    fn from(err: BuildOpsClientError) -> Self {
        match err {
            BuildOpsClientError::AuthError { status, body } => ConnectorError::Authentication {
                status: status.as_u16(),
                body,
            },
            BuildOpsClientError::HttpError { status, body } => ConnectorError::Upstream {
                status: status.as_u16(),
                body,
            },
            e @ BuildOpsClientError::InvalidResponse { .. } => ConnectorError::Protocol(e.to_string()),
            BuildOpsClientError::RequestError(e) => ConnectorError::Transport(e.to_string()),
        }
    }
}

impl BuildOpsClient {
    pub fn new(settings: BuildOpsSettings, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, settings })
    }

    /// Exchange the client credentials for a bearer token.
    pub async fn fetch_access_token(&self) -> Result<String, BuildOpsClientError> {
        let response = self
            .client
            .post(self.settings.url(TOKEN_PATH))
            .json(&TokenRequest {
                client_id: &self.settings.client_id,
                client_secret: &self.settings.client_secret,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, "buildops token request rejected");
            return Err(BuildOpsClientError::AuthError { status, body });
        }

        let token: TokenResponse = decode(response, TOKEN_PATH).await?;
        token
            .access_token
            .ok_or(BuildOpsClientError::InvalidResponse {
                endpoint: TOKEN_PATH,
                message: "missing access_token".to_string(),
            })
    }

    /// Fetch a fresh token, then the single page of customers.
    pub async fn fetch_customers(&self) -> Result<Vec<Record>, BuildOpsClientError> {
        let token = self.fetch_access_token().await?;
        tracing::debug!(tenant_id = %self.settings.tenant_id, "obtained buildops access token");

        let response = self
            .client
            .get(self.settings.url(CUSTOMERS_PATH))
            .bearer_auth(&token)
            .header("tenantId", &self.settings.tenant_id)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BuildOpsClientError::HttpError { status, body });
        }

        let page: CustomersPage = decode(response, CUSTOMERS_PATH).await?;
        Ok(page.into_records())
    }
}

async fn decode<T: DeserializeOwned>(
    response: reqwest::Response,
    endpoint: &'static str,
) -> Result<T, BuildOpsClientError> {
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| BuildOpsClientError::InvalidResponse {
        endpoint,
        message: e.to_string(),
    })
}
