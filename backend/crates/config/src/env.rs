use buildops_common::error::{ConnectorError, ConnectorResult};
use buildops_sdk::Configuration;
use serde::Deserialize;
use std::env;

pub const DEFAULT_BUILDOPS_HOST: &str = "https://api.buildops.com";

/// BuildOps connection settings as found in the environment.
///
/// Credentials stay optional here; the connector's validator decides whether
/// a sync can run.
#[derive(Debug, Clone, Deserialize)]
pub struct BuildOpsEnv {
    pub host: String,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub tenant_id: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub buildops: BuildOpsEnv,
}

impl AppConfig {
    /// Load configuration from environment variables.
    /// Loads `.env` file if present, then reads the vars once.
    pub fn from_env() -> ConnectorResult<Self> {
        // Best-effort .env load; ignore if missing
        let _ = dotenvy::dotenv();

        Ok(Self {
            host: get_var_or("HOST", "0.0.0.0"),
            port: get_var_or("PORT", "8080")
                .parse()
                .map_err(|e| ConnectorError::Config(format!("invalid PORT: {e}")))?,
            log_level: get_var_or("LOG_LEVEL", "info"),
            buildops: BuildOpsEnv {
                host: get_var_or("BUILDOPS_HOST", DEFAULT_BUILDOPS_HOST),
                client_id: get_var("BUILDOPS_CLIENT_ID"),
                client_secret: get_var("BUILDOPS_CLIENT_SECRET"),
                tenant_id: get_var("BUILDOPS_TENANT_ID"),
                timeout_secs: get_var_or("BUILDOPS_TIMEOUT_SECS", "30")
                    .parse()
                    .map_err(|e| {
                        ConnectorError::Config(format!("invalid BUILDOPS_TIMEOUT_SECS: {e}"))
                    })?,
            },
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Connector configuration mapping. Unset credentials are left out so the
    /// validator reports them by key.
    pub fn connector_configuration(&self) -> Configuration {
        let b = &self.buildops;
        let mut cfg = Configuration::new().with("host", b.host.clone());
        for (key, value) in [
            ("client_id", &b.client_id),
            ("client_secret", &b.client_secret),
            ("tenant_id", &b.tenant_id),
        ] {
            if let Some(v) = value {
                cfg.insert(key, v.clone());
            }
        }
        cfg
    }
}

fn get_var(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn get_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}
