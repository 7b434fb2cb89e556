use crate::error::Error;
use async_trait::async_trait;
use bytes::Bytes;

/// Transport used by every resolver: one GET, body bytes on success.
///
/// A reply with a non-success status is reported as [`Error::Status`] so
/// callers can tell "the service said no" apart from "the service could
/// not be reached".
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn get(&self, url: &str) -> Result<Bytes, Error>;
}

#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn get(&self, url: &str) -> Result<Bytes, Error> {
        tracing::debug!("GET {}", url);

        let response = self.client.get(url).send().await.map_err(|e| {
            tracing::warn!("Failed to make HTTP request to {}: {}", url, e);
            Error::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!("{} answered with status {}", url, status);
            return Err(Error::Status(status));
        }

        Ok(response.bytes().await?)
    }
}

#[cfg(test)]
pub(crate) mod stub {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Debug, Clone)]
    pub enum Reply {
        Body(Bytes),
        Status(reqwest::StatusCode),
        Unreachable,
    }

    /// Canned responses keyed by URL. Unknown URLs answer 404.
    #[derive(Debug, Default)]
    pub struct StubFetcher {
        replies: HashMap<String, Reply>,
        requests: Mutex<Vec<String>>,
    }

    impl StubFetcher {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn json(mut self, url: &str, body: serde_json::Value) -> Self {
            self.replies
                .insert(url.to_string(), Reply::Body(Bytes::from(body.to_string())));
            self
        }

        pub fn bytes(mut self, url: &str, body: impl Into<Bytes>) -> Self {
            self.replies
                .insert(url.to_string(), Reply::Body(body.into()));
            self
        }

        pub fn status(mut self, url: &str, status: reqwest::StatusCode) -> Self {
            self.replies.insert(url.to_string(), Reply::Status(status));
            self
        }

        pub fn unreachable(mut self, url: &str) -> Self {
            self.replies.insert(url.to_string(), Reply::Unreachable);
            self
        }

        pub fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Fetcher for StubFetcher {
        async fn get(&self, url: &str) -> Result<Bytes, Error> {
            self.requests.lock().unwrap().push(url.to_string());

            match self.replies.get(url) {
                Some(Reply::Body(body)) => Ok(body.clone()),
                Some(Reply::Status(status)) => Err(Error::Status(*status)),
                Some(Reply::Unreachable) => {
                    // A malformed URL fails inside reqwest before any I/O.
                    let error = reqwest::get("unreachable host")
                        .await
                        .expect_err("malformed url never connects");
                    Err(Error::from(error))
                }
                None => Err(Error::Status(reqwest::StatusCode::NOT_FOUND)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::stub::StubFetcher;
    use super::*;

    #[tokio::test]
    async fn test_stub_reports_status_for_unknown_urls() {
        let fetcher = StubFetcher::new();

        let error = fetcher.get("http://stub/missing").await.unwrap_err();

        assert!(error.is_status());
        assert_eq!(fetcher.requests(), vec!["http://stub/missing".to_string()]);
    }

    #[tokio::test]
    async fn test_stub_transport_failure_is_not_a_status() {
        let fetcher = StubFetcher::new().unreachable("http://stub/down");

        let error = fetcher.get("http://stub/down").await.unwrap_err();

        assert!(matches!(error, Error::RequestFailed(_)));
        assert!(!error.is_status());
    }
}
