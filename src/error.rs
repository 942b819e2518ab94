//! Transport-level errors of the scraping proxy
//!
//! Anything that escapes a handler as [`AppError`] is answered with a non-2xx
//! status and a `{"detail": ...}` body. Inline errors are plain
//! [`ErrorPayload`](crate::models::ErrorPayload) values and never pass here.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::models::ApiError;
use crate::parser::ParseError;
use crate::scraper::ScraperError;

#[derive(Debug, Error)]
pub enum AppError {
    /// Upstream could not be fetched (network, timeout, non-2xx)
    #[error("Scraping error: {0}")]
    Scraping(#[from] ScraperError),

    /// Page layout did not match the selector profile
    #[error("Parsing error: {0}")]
    Parsing(#[from] ParseError),

    /// Missing or malformed query parameter
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}

impl AppError {
    pub fn invalid_query(msg: impl Into<String>) -> Self {
        AppError::InvalidQuery(msg.into())
    }

    /// Text placed in the `detail` field of the response body
    pub fn detail(&self) -> String {
        match self {
            AppError::InvalidQuery(msg) => msg.clone(),
            AppError::Scraping(e) => format!("Failed to fetch data: {}", e),
            AppError::Parsing(e) => format!("Failed to parse page: {}", e),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ApiError::new(self.detail()))
    }
}

pub type AppResult<T> = Result<T, AppError>;
