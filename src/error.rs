use std::sync::Arc;

#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error("request failed: {0}")]
    RequestFailed(Arc<reqwest::Error>),
    #[error("unexpected status: {0}")]
    Status(reqwest::StatusCode),
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("invalid configuration: {0}")]
    Config(Arc<toml::de::Error>),
}

impl Error {
    /// Whether the remote service answered, but not with a success status.
    pub fn is_status(&self) -> bool {
        matches!(self, Self::Status(_))
    }
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        Self::RequestFailed(Arc::new(error))
    }
}

impl From<toml::de::Error> for Error {
    fn from(error: toml::de::Error) -> Self {
        Self::Config(Arc::new(error))
    }
}
