use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use super::errors::FdaError;
use super::query::LabelQuery;
use crate::models::label::{LabelResponse, RawLabel};

/// Public drug-label endpoint
pub const DEFAULT_FDA_API_BASE_URL: &str = "https://api.fda.gov/drug/label.json";

/// Timeout applied to each upstream request
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Source of drug-label documents
#[async_trait]
pub trait LabelSourceTrait: Send + Sync {
    /// Run a lookup and return the matching labels in upstream order
    async fn fetch_labels(&self, query: &LabelQuery) -> Result<Vec<RawLabel>, FdaError>;
}

/// Configuration for the openFDA client
#[derive(Debug, Clone)]
pub struct OpenFdaConfig {
    /// Endpoint URL, without query string
    pub base_url: String,
    /// Optional key sent in the `api_key` header
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl Default for OpenFdaConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_FDA_API_BASE_URL.to_string(),
            api_key: None,
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl OpenFdaConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Blank keys are treated as absent
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|key| !key.trim().is_empty());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// HTTP client for the openFDA drug-label API
#[derive(Debug, Clone)]
pub struct OpenFdaClient {
    http: Client,
    config: OpenFdaConfig,
}

impl OpenFdaClient {
    /// Create a client from its configuration
    pub fn new(config: OpenFdaConfig) -> Result<Self, FdaError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| FdaError::Config(e.to_string()))?;

        Ok(Self { http, config })
    }

    /// Full request URL for a lookup
    pub fn request_url(&self, query: &LabelQuery) -> String {
        format!("{}?{}", self.config.base_url, query.to_query_string())
    }
}

#[async_trait]
impl LabelSourceTrait for OpenFdaClient {
    async fn fetch_labels(&self, query: &LabelQuery) -> Result<Vec<RawLabel>, FdaError> {
        let url = self.request_url(query);
        debug!("Requesting openFDA labels: {}", url);

        let mut request = self.http.get(&url);
        if let Some(key) = &self.config.api_key {
            request = request.header("api_key", key);
        }

        let response = request.send().await?;
        let status = response.status();

        match status {
            StatusCode::NOT_FOUND => {
                debug!("openFDA returned no matches for {:?}", query);
                return Err(FdaError::NotFound);
            }
            StatusCode::TOO_MANY_REQUESTS => {
                warn!("openFDA rate limit hit");
                return Err(FdaError::RateLimited);
            }
            s if !s.is_success() => {
                warn!("openFDA returned unexpected status {}", s);
                return Err(FdaError::Status(s.as_u16()));
            }
            _ => {}
        }

        let body = response.bytes().await?;
        let parsed: LabelResponse = serde_json::from_slice(&body)?;

        debug!("openFDA returned {} labels", parsed.results.len());
        Ok(parsed.results)
    }
}
