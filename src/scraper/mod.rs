//! Scraper module for fetching HTML content from the target site
//!
//! This module wraps a pooled HTTP client that sends browser-like headers.
//! Every call is a single attempt: there is no retry, backoff or delay.

use reqwest::{header, Client, RequestBuilder};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur during scraping operations
#[derive(Error, Debug)]
pub enum ScraperError {
    /// The HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    ClientError(String),

    /// Network-related errors (connection refused, DNS failure, etc.)
    #[error("Failed to connect to server: {0}")]
    NetworkError(String),

    /// The request did not complete within its timeout
    #[error("Request timed out")]
    Timeout,

    /// HTTP non-2xx status code errors
    #[error("Server returned status {0}")]
    HttpError(u16),

    /// Error reading response body
    #[error("Failed to read response body: {0}")]
    ResponseError(String),
}

impl ScraperError {
    /// Upstream status code, when the failure came from one
    pub fn status(&self) -> Option<u16> {
        match self {
            ScraperError::HttpError(status) => Some(*status),
            _ => None,
        }
    }
}

/// Result of a successful page fetch
#[derive(Debug)]
pub struct ScraperResult {
    /// The HTML content of the page
    pub html: String,
}

/// HTTP method of an upstream request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMethod {
    Get,
    Post,
}

/// A single outbound request
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub url: String,
    pub method: FetchMethod,
    /// Sent as `application/x-www-form-urlencoded` on POST
    pub form: Vec<(String, String)>,
    /// Overrides the client default timeout
    pub timeout: Option<Duration>,
}

impl FetchRequest {
    /// GET request with the client's default timeout
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: FetchMethod::Get,
            form: Vec::new(),
            timeout: None,
        }
    }

    /// Form-encoded POST request
    pub fn post_form<K, V>(url: impl Into<String>, form: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            url: url.into(),
            method: FetchMethod::Post,
            form: form.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Immutable settings for the upstream client
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// User-Agent header value
    pub user_agent: String,
    /// Timeout applied when a request does not set its own
    pub default_timeout: Duration,
    /// Timeout for the home and category listings
    pub listing_timeout: Duration,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            user_agent: crate::constants::DEFAULT_USER_AGENT.to_string(),
            default_timeout: Duration::from_secs(30),
            listing_timeout: Duration::from_secs(10),
        }
    }
}

/// HTTP client for fetching pages from the target site
#[derive(Debug, Clone)]
pub struct Scraper {
    client: Client,
    config: ScraperConfig,
}

impl Scraper {
    /// Create a new Scraper with the given configuration
    pub fn new(config: ScraperConfig) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.default_timeout)
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ScraperError::ClientError(e.to_string()))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    /// GET a page using the listing timeout
    pub async fn fetch_listing(&self, url: &str) -> Result<ScraperResult, ScraperError> {
        self.fetch(FetchRequest::get(url).with_timeout(self.config.listing_timeout))
            .await
    }

    /// GET a page using the default timeout
    pub async fn fetch_page(&self, url: &str) -> Result<ScraperResult, ScraperError> {
        self.fetch(FetchRequest::get(url)).await
    }

    /// Perform one upstream request
    pub async fn fetch(&self, request: FetchRequest) -> Result<ScraperResult, ScraperError> {
        debug!("{:?} {}", request.method, request.url);

        let response = self.build(&request).send().await.map_err(|e| {
            if e.is_timeout() {
                ScraperError::Timeout
            } else if e.is_connect() {
                ScraperError::NetworkError("Failed to connect to server".to_string())
            } else {
                ScraperError::NetworkError(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!("{} returned HTTP {}", request.url, status.as_u16());
            return Err(ScraperError::HttpError(status.as_u16()));
        }

        let html = response.text().await.map_err(|e| {
            if e.is_timeout() {
                ScraperError::Timeout
            } else {
                ScraperError::ResponseError(e.to_string())
            }
        })?;

        debug!(
            "Fetched {} bytes from {} (HTTP {})",
            html.len(),
            request.url,
            status.as_u16()
        );

        Ok(ScraperResult { html })
    }

    fn build(&self, request: &FetchRequest) -> RequestBuilder {
        let builder = match request.method {
            FetchMethod::Get => self.client.get(&request.url),
            FetchMethod::Post => self.client.post(&request.url).form(&request.form),
        };

        let builder = builder
            .header(
                header::ACCEPT,
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .header(header::ACCEPT_LANGUAGE, "en-US,en;q=0.9");

        match request.timeout {
            Some(timeout) => builder.timeout(timeout),
            None => builder,
        }
    }
}
