use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("Item does not exist: {0}")]
    NotFound(String),
    #[error("Rate limit exceeded upstream")]
    RateLimited,
    #[error("Upstream unavailable: status {0}")]
    UpstreamUnavailable(StatusCode),
    #[error("Unexpected upstream status: {0}")]
    Transport(StatusCode),
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Parse error in {context}: {reason}")]
    Parse { context: String, reason: String },
    #[error("Decode error: {0}")]
    Decode(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ProxyError {
    /// An expected node was not present in the fetched document.
    pub fn missing(context: impl Into<String>) -> Self {
        Self::Parse {
            context: context.into(),
            reason: "element not found".to_string(),
        }
    }

    pub fn malformed(context: impl Into<String>, reason: impl ToString) -> Self {
        Self::Parse {
            context: context.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ProxyError>;
