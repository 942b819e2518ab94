//! Data models for the scraping proxy
//!
//! Response wrappers shared by the route handlers. The scraped entities live
//! in the parser module and are re-exported here.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// Re-export parser models for convenience
pub use crate::parser::{
    EpisodeItem, EpisodePlaybackDetail, HomeListing, ListingItem, MovieDetail, ScrapedDetail,
    SeriesDetail, SuggestionItem,
};

/// Body of a transport-level error (non-2xx status)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct ApiError {
    /// Error message describing what went wrong
    pub detail: String,
}

impl ApiError {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// Application-level failure returned with HTTP 200
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct ErrorPayload {
    pub error: String,
    /// Upstream status, reported by the suggestion endpoint only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
}

impl ErrorPayload {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            status_code: None,
        }
    }

    pub fn with_status(error: impl Into<String>, status_code: u16) -> Self {
        Self {
            error: error.into(),
            status_code: Some(status_code),
        }
    }
}

/// Episodes of one season
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct SeasonEpisodes {
    pub episodes: Vec<EpisodeItem>,
}

/// Body of `GET /`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct Liveness {
    pub message: String,
}

/// Body of `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct Health {
    pub status: String,
    /// RFC 3339 time of the check
    pub timestamp: String,
}

/// Either a scraped value or an inline error
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Inline<T> {
    Ok(T),
    Err(ErrorPayload),
}

impl<T> From<ErrorPayload> for Inline<T> {
    fn from(payload: ErrorPayload) -> Self {
        Inline::Err(payload)
    }
}
