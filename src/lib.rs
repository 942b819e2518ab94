//! Streaming-site scraping proxy
//!
//! Fetches listing, search and detail pages from a single streaming site,
//! extracts fixed fields with CSS selectors and exposes them as JSON through
//! REST endpoints.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod parser;
pub mod routes;
pub mod scraper;
