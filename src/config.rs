//! Configuration module for the scraping proxy
//!
//! Handles loading environment variables and application configuration.

use std::env;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::constants::{DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
use crate::scraper::ScraperConfig;

/// Errors raised while reading configuration from the environment
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("BASE_URL is not a valid http(s) URL: {0}")]
    InvalidBaseUrl(String),

    #[error("{name} must be a valid number, got `{value}`")]
    InvalidNumber { name: &'static str, value: String },
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
    /// Origin of the scraped site, e.g. `https://toonstream.one`
    pub base_url: Url,
    /// User-Agent header sent with every upstream request
    pub user_agent: String,
    /// Timeout for detail, search and AJAX requests
    pub request_timeout: Duration,
    /// Timeout for the home and category listings
    pub listing_timeout: Duration,
}

impl Config {
    /// Build a configuration for the given site origin with default settings
    pub fn new(base_url: Url) -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            base_url,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout: Duration::from_secs(30),
            listing_timeout: Duration::from_secs(10),
        }
    }

    /// Load configuration from environment variables
    ///
    /// Reads a `.env` file first if one is present. Every variable is optional.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let raw_base = env::var("BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let base_url = parse_base_url(&raw_base)?;

        let mut config = Self::new(base_url);

        if let Ok(host) = env::var("HOST") {
            config.host = host;
        }
        if let Some(port) = read_number::<u16>("PORT")? {
            config.port = port;
        }
        if let Ok(user_agent) = env::var("USER_AGENT") {
            if !user_agent.trim().is_empty() {
                config.user_agent = user_agent;
            }
        }
        if let Some(secs) = read_number::<u64>("REQUEST_TIMEOUT_SECS")? {
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = read_number::<u64>("LISTING_TIMEOUT_SECS")? {
            config.listing_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Settings handed to the upstream HTTP client
    pub fn scraper_config(&self) -> ScraperConfig {
        ScraperConfig {
            user_agent: self.user_agent.clone(),
            default_timeout: self.request_timeout,
            listing_timeout: self.listing_timeout,
        }
    }
}

/// Parse and validate the site origin
pub fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|_| ConfigError::InvalidBaseUrl(raw.to_string()))?;

    match url.scheme() {
        "http" | "https" if url.host().is_some() => Ok(url),
        _ => Err(ConfigError::InvalidBaseUrl(raw.to_string())),
    }
}

fn read_number<T: std::str::FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber { name, value }),
        Err(_) => Ok(None),
    }
}
