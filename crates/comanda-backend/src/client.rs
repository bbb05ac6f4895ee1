//! # Backend Client Handle
//!
//! Configuration and the shared HTTP handle behind every endpoint call.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Backend Client                                     │
//! │                                                                         │
//! │  BackendConfig::from_env() ← base URL + timeout                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Backend::new(config) ← builds one reqwest::Client                     │
//! │       │                                                                 │
//! │       ├──► backend.bills()   ─► BillApi   (accounts + details)         │
//! │       └──► backend.tables()  ─► TableApi  (table fetch, close-all)     │
//! │                                                                         │
//! │  reqwest::Client holds an internal connection pool; cloning the        │
//! │  handle is cheap and shares the pool.                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::bills::BillApi;
use crate::dto::ApiEnvelope;
use crate::error::{BackendError, BackendResult};
use crate::tables::TableApi;

// =============================================================================
// Configuration
// =============================================================================

/// Default backend base URL for local development.
const DEFAULT_BASE_URL: &str = "http://localhost:3484/api";

/// Environment variable overriding the backend base URL.
const BASE_URL_ENV: &str = "COMANDA_BACKEND_URL";

/// Backend client configuration.
///
/// ## Example
/// ```rust
/// use std::time::Duration;
/// use comanda_backend::BackendConfig;
///
/// let config = BackendConfig::new("http://pos.local:3484/api")
///     .timeout(Duration::from_secs(10));
/// ```
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL of the backend API, without a trailing slash.
    pub base_url: String,

    /// Per-request timeout.
    /// Default: 30 seconds
    pub timeout: Duration,
}

impl BackendConfig {
    /// Creates a configuration with the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        BackendConfig {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Reads the base URL from `COMANDA_BACKEND_URL`, falling back to the
    /// local development default.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        BackendConfig::new(base_url)
    }

    /// Sets the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// =============================================================================
// Backend Handle
// =============================================================================

/// Handle to the remote persistence backend.
#[derive(Debug, Clone)]
pub struct Backend {
    http: reqwest::Client,
    base_url: String,
}

impl Backend {
    /// Builds the HTTP client from a configuration.
    pub fn new(config: BackendConfig) -> BackendResult<Self> {
        debug!(base_url = %config.base_url, "building backend client");

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| BackendError::Config(e.to_string()))?;

        Ok(Backend {
            http,
            base_url: config.base_url,
        })
    }

    /// Account and line-item-detail endpoints.
    pub fn bills(&self) -> BillApi {
        BillApi::new(self.http.clone(), self.base_url.clone())
    }

    /// Table endpoints.
    pub fn tables(&self) -> TableApi {
        TableApi::new(self.http.clone(), self.base_url.clone())
    }
}

// =============================================================================
// Response Helpers
// =============================================================================

/// Unwraps a `{ success, data, message }` envelope, surfacing the
/// backend's `message` on non-success statuses.
pub(crate) async fn parse_envelope<T: DeserializeOwned>(
    response: reqwest::Response,
) -> BackendResult<T> {
    let status = response.status();

    if !status.is_success() {
        return Err(api_error(status, response).await);
    }

    let envelope: ApiEnvelope<T> = response.json().await?;
    envelope
        .data
        .ok_or_else(|| BackendError::Decode("response envelope is missing data".to_string()))
}

/// Checks the status of a response whose body we do not consume.
pub(crate) async fn ensure_success(response: reqwest::Response) -> BackendResult<()> {
    let status = response.status();

    if !status.is_success() {
        return Err(api_error(status, response).await);
    }

    Ok(())
}

/// Builds an [`BackendError::Api`], preferring the backend's own message.
async fn api_error(status: reqwest::StatusCode, response: reqwest::Response) -> BackendError {
    let message = response
        .json::<ApiEnvelope<serde_json::Value>>()
        .await
        .ok()
        .and_then(|e| e.message)
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        });

    BackendError::Api {
        status: status.as_u16(),
        message,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_strips_trailing_slash() {
        let config = BackendConfig::new("http://localhost:3484/api/");
        assert_eq!(config.base_url, "http://localhost:3484/api");
    }

    #[test]
    fn test_config_timeout_builder() {
        let config = BackendConfig::new(DEFAULT_BASE_URL).timeout(Duration::from_secs(5));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}
