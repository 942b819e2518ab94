//! Parser module for extracting structured data from HTML
//!
//! Every page type is described by a selector profile in [`profiles`]; the
//! extraction routines in the submodules only walk those tables. Optional
//! elements degrade to the fallbacks documented on each output type.

mod detail;
mod episode;
mod listing;
pub mod profiles;

pub use detail::{extract_post_id, parse_detail, parse_movie_detail, parse_series_detail, DetailKind};
pub use episode::{parse_episode_playback, parse_season_episodes};
pub use listing::{parse_category, parse_home, parse_search_results, parse_suggestions};

use scraper::{ElementRef, Selector};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;
use utoipa::ToSchema;

/// Title used when a listing entry has no title element
pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// Link used when a listing entry has no anchor
pub const MISSING_LINK: &str = "#";

/// Errors raised while extracting data from a page
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A selector in the profile table failed to compile
    #[error("Invalid selector `{0}`")]
    InvalidSelector(String),

    /// A required structural element was not present in the page
    #[error("Required element `{0}` not found in page")]
    MissingAnchor(String),
}

/// One entry of the home, category or search listings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct ListingItem {
    /// Falls back to "Unknown Title"
    pub title: String,
    /// Lazy-load source preferred; empty string when missing
    pub image: String,
    /// Path component of the entry URL; "#" when missing
    pub link: String,
}

/// Both listings shown on the home page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct HomeListing {
    pub series: Vec<ListingItem>,
    pub movies: Vec<ListingItem>,
}

/// One entry of the search-suggestion dropdown
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct SuggestionItem {
    pub title: String,
    /// Label such as "TV" or "Movie"
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
}

/// An episode (or episode-shaped recommendation) card
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct EpisodeItem {
    pub episode_number: Option<String>,
    pub title: Option<String>,
    pub url: Option<String>,
    pub image: Option<String>,
}

/// Series detail page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct SeriesDetail {
    pub post_id: Option<String>,
    pub title: Option<String>,
    pub thumbnail: Option<String>,
    /// Falls back to the thumbnail
    pub background_image: Option<String>,
    pub description: Option<String>,
    pub genres: Vec<String>,
    pub cast: Vec<String>,
    pub number_of_seasons: usize,
    pub number_of_episodes: Option<u32>,
    pub seasons_available: Vec<String>,
    pub episodes: Vec<EpisodeItem>,
}

/// Movie detail page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct MovieDetail {
    pub post_id: Option<String>,
    pub title: Option<String>,
    pub thumbnail: Option<String>,
    /// Falls back to the thumbnail
    pub background_image: Option<String>,
    pub description: Option<String>,
    pub duration: Option<String>,
    pub genres: Vec<String>,
    pub cast: Vec<String>,
    /// Player iframe URLs in page order
    pub sources: Vec<String>,
}

/// Result of scraping a `/series/` or `/movies/` page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ScrapedDetail {
    Series(SeriesDetail),
    Movie(MovieDetail),
}

/// Episode playback page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct EpisodePlaybackDetail {
    pub title: Option<String>,
    pub thumbnail: Option<String>,
    pub background_image: Option<String>,
    pub description: Option<String>,
    pub duration: Option<String>,
    pub streaming_sources: Vec<String>,
    pub other_episodes: Vec<EpisodeItem>,
    pub recommended_series: Vec<EpisodeItem>,
}

/// Compile a selector from the profile table
pub(crate) fn selector(css: &str) -> Result<Selector, ParseError> {
    Selector::parse(css).map_err(|_| ParseError::InvalidSelector(css.to_string()))
}

/// Trimmed text of an element, `None` when blank
pub(crate) fn element_text(element: ElementRef<'_>) -> Option<String> {
    let text = element.text().collect::<String>().trim().to_string();
    (!text.is_empty()).then_some(text)
}

/// Trimmed text of the first match inside `scope`
pub(crate) fn first_text(scope: ElementRef<'_>, selector: &Selector) -> Option<String> {
    scope.select(selector).next().and_then(element_text)
}

/// Texts of every match inside `scope`, blanks dropped
pub(crate) fn all_texts(scope: ElementRef<'_>, selector: &Selector) -> Vec<String> {
    scope.select(selector).filter_map(element_text).collect()
}

/// First non-empty attribute among `names`, in order
pub(crate) fn attr_in_order(element: ElementRef<'_>, names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| element.value().attr(name))
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(str::to_string)
}

/// Image URL of an element, preferring the lazy-load attribute
pub(crate) fn lazy_source(element: ElementRef<'_>) -> Option<String> {
    attr_in_order(element, &["data-src", "src"])
}

/// Image URL of the first match inside `scope`
pub(crate) fn first_image(scope: ElementRef<'_>, selector: &Selector) -> Option<String> {
    scope.select(selector).next().and_then(lazy_source)
}

/// First `href` inside `scope`
pub(crate) fn first_href(scope: ElementRef<'_>, selector: &Selector) -> Option<String> {
    scope
        .select(selector)
        .next()
        .and_then(|el| attr_in_order(el, &["href"]))
}

/// Reduce a link to its path component
///
/// Relative links are resolved against the site origin first, so
/// `series/naruto/` and `https://site/series/naruto/?ref=1` both become
/// `/series/naruto/`.
pub fn link_path(href: &str, base: &Url) -> String {
    match base.join(href.trim()) {
        Ok(url) => url.path().to_string(),
        Err(_) => href.trim().to_string(),
    }
}
