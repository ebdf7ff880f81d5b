use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConnectorError {
    #[error("configuration error: missing required keys: {}", .0.join(", "))]
    MissingConfiguration(Vec<String>),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("authentication failed: HTTP {status}: {body}")]
    Authentication { status: u16, body: String },

    #[error("upstream error: HTTP {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("protocol error: {0}")]
    Protocol(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ConnectorError {
    /// Short machine-readable name of the error family, used in API payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingConfiguration(_) | Self::Config(_) => "configuration",
            Self::Authentication { .. } => "authentication",
            Self::Upstream { .. } => "upstream",
            Self::Protocol(_) => "protocol",
            Self::Transport(_) => "transport",
            Self::Validation(_) => "validation",
            Self::Internal(_) => "internal",
        }
    }
}

pub type ConnectorResult<T> = Result<T, ConnectorError>;
