//! # Shared HTTP environment
//!
//! [`SkyEnv`] holds the HTTP client used for every outgoing request (the Horizons ephemeris
//! service). It is built once and cloned into whatever needs network access; clones share the
//! same connection pool.
//!
//! ```text
//! SkyEnv
//! └── http_client (reqwest::Client, 10 s timeout)
//! ```
use std::time::Duration;

use crate::skyframe_errors::SkyframeError;

/// Default timeout of a whole request, connection included.
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct SkyEnv {
    pub http_client: reqwest::Client,
}

impl SkyEnv {
    /// Create the environment with the default request timeout.
    ///
    /// Return
    /// ------
    /// * The environment, or [`SkyframeError::ReqwestError`] if the HTTP client could not be
    ///   initialised (TLS backend unavailable).
    pub fn new() -> Result<Self, SkyframeError> {
        Self::with_timeout(HTTP_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, SkyframeError> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(SkyEnv { http_client })
    }

    /// GET `url` with the given query pairs and return the body as text.
    ///
    /// Non-success HTTP statuses are turned into errors.
    pub(crate) async fn get_text<K, V>(
        &self,
        url: &str,
        query: &[(K, V)],
    ) -> Result<String, SkyframeError>
    where
        K: serde::Serialize,
        V: serde::Serialize,
    {
        let response = self
            .http_client
            .get(url)
            .query(query)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod env_state_test {
    use super::*;

    #[test]
    fn test_new_env() {
        assert!(SkyEnv::new().is_ok());
        assert!(SkyEnv::with_timeout(Duration::from_millis(500)).is_ok());
    }

    #[tokio::test]
    async fn test_get_text_connection_refused() {
        let env = SkyEnv::with_timeout(Duration::from_secs(2)).unwrap();
        let result = env
            .get_text("http://127.0.0.1:9/", &[("format", "text")])
            .await;
        assert!(matches!(result, Err(SkyframeError::ReqwestError(_))));
    }
}
