//! Explorer API client.
//!
//! `ExplorerApi` is the seam between the dispatch pipeline and the network:
//! the server owns one `Arc<dyn ExplorerApi>` and every tool call goes
//! through `execute()`. `BlockscoutClient` is the reqwest implementation.

use std::fmt;
use std::time::Duration;

use reqwest::header::ACCEPT;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::{ApiError, BaseUrl};

const JSON_MEDIA_TYPE: &str = "application/json";

// ============================================================================
// Request model
// ============================================================================

/// HTTP methods used by the explorer endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Patch,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Patch => "PATCH",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Patch => reqwest::Method::PATCH,
        }
    }
}

/// A fully resolved explorer request, relative to the base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: HttpMethod,

    /// Path relative to `<base>/v2/`, without a leading slash.
    pub path: String,

    /// Query parameters in the order they are appended.
    pub query: Vec<(&'static str, String)>,

    /// Optional JSON body (only sent with PATCH requests).
    pub body: Option<Value>,
}

// ============================================================================
// Client trait
// ============================================================================

/// Executes one explorer request and returns the decoded JSON body.
///
/// Implementations must not retry: a failure is surfaced to the caller as is.
#[async_trait::async_trait]
pub trait ExplorerApi: Send + Sync {
    async fn execute(&self, request: &ApiRequest) -> Result<Value, ApiError>;
}

// ============================================================================
// reqwest implementation
// ============================================================================

/// Explorer client backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct BlockscoutClient {
    http: reqwest::Client,
    base_url: BaseUrl,
    timeout: Duration,
}

impl BlockscoutClient {
    /// Create a new client for the given (already normalized) base URL.
    pub fn new(base_url: BaseUrl, timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url,
            timeout,
        })
    }

    fn transport_error(&self, error: reqwest::Error) -> ApiError {
        if error.is_timeout() {
            ApiError::Timeout(self.timeout.as_secs())
        } else {
            ApiError::Network(error.to_string())
        }
    }
}

#[async_trait::async_trait]
impl ExplorerApi for BlockscoutClient {
    #[instrument(skip_all, fields(method = %request.method, path = %request.path))]
    async fn execute(&self, request: &ApiRequest) -> Result<Value, ApiError> {
        let mut url = self.base_url.join(&request.path)?;
        // A `?` smuggled in through a path argument must not reach upstream.
        url.set_query(None);
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(
                request
                    .query
                    .iter()
                    .map(|(name, value)| (*name, value.as_str())),
            );
        }

        debug!("{} {}", request.method, url);

        let mut builder = self
            .http
            .request(request.method.into(), url)
            .header(ACCEPT, JSON_MEDIA_TYPE);

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| self.transport_error(e))?;
        let status = response.status();
        let text = response.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            warn!("Explorer returned status {}", status.as_u16());
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
    }
}
