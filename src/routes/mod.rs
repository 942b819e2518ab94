//! API Routes module for the scraping proxy
//!
//! This module contains all HTTP route handlers. `/home` and `/type` report
//! upstream failures with a 500 status; every other endpoint answers 200
//! with an inline `{"error": ...}` body instead.

use actix_cors::Cors;
use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use tracing::{error, info, warn};
use url::Url;
use utoipa::{IntoParams, OpenApi, ToSchema};

use crate::config::Config;
use crate::constants::{ajax, endpoints, messages};
use crate::error::{AppError, AppResult};
use crate::models::{ApiError, ErrorPayload, Health, Inline, Liveness, SeasonEpisodes};
use crate::parser::{
    parse_category, parse_detail, parse_episode_playback, parse_home, parse_search_results,
    parse_season_episodes, parse_suggestions, DetailKind, EpisodeItem, EpisodePlaybackDetail,
    HomeListing, ListingItem, MovieDetail, ScrapedDetail, SeriesDetail, SuggestionItem,
};
use crate::scraper::{FetchRequest, Scraper};

/// Application state shared across handlers
pub struct AppState {
    pub config: Config,
    pub scraper: Scraper,
}

impl AppState {
    /// Build the shared state, including the pooled upstream client
    pub fn new(config: Config) -> AppResult<Self> {
        let scraper = Scraper::new(config.scraper_config())?;
        Ok(Self { config, scraper })
    }

    fn base(&self) -> &Url {
        &self.config.base_url
    }
}

/// Trimmed value of a required query parameter
fn required<'a>(value: &'a Option<String>, name: &str) -> AppResult<&'a str> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AppError::invalid_query(format!(
            "Query parameter `{}` is required",
            name
        ))),
    }
}

/// GET / - Liveness message
#[utoipa::path(
    get,
    path = "/",
    tag = "system",
    responses((status = 200, description = "Service is running", body = Liveness))
)]
pub async fn root() -> impl Responder {
    HttpResponse::Ok().json(Liveness {
        message: messages::LIVENESS.to_string(),
    })
}

/// GET /health - Health check
#[utoipa::path(
    get,
    path = "/health",
    tag = "system",
    responses((status = 200, description = "Service is healthy", body = Health))
)]
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(Health {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// GET /home - Latest series and movies
#[utoipa::path(
    get,
    path = "/home",
    tag = "listing",
    responses(
        (status = 200, description = "Latest series and movies", body = HomeListing),
        (status = 500, description = "Upstream fetch failed or page layout changed", body = ApiError)
    )
)]
pub async fn get_home(data: web::Data<AppState>) -> AppResult<HttpResponse> {
    let url = endpoints::home(data.base());
    info!("Fetching home page: {}", url);

    let result = data.scraper.fetch_listing(&url).await.map_err(|e| {
        error!("Failed to fetch home page: {}", e);
        e
    })?;

    let home = parse_home(&result.html, data.base())?;
    info!(
        "Parsed {} series and {} movies",
        home.series.len(),
        home.movies.len()
    );

    Ok(HttpResponse::Ok().json(home))
}

/// Query parameters for category endpoint
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct CategoryQuery {
    /// Category slug, e.g. `anime` or `cartoon`
    #[serde(rename = "type")]
    pub category: Option<String>,
}

/// GET /type - Browse a category
#[utoipa::path(
    get,
    path = "/type",
    tag = "listing",
    params(CategoryQuery),
    responses(
        (status = 200, description = "Category entries, or `{\"error\": \"No results found\"}`", body = Vec<ListingItem>),
        (status = 400, description = "Missing category", body = ApiError),
        (status = 500, description = "Upstream fetch failed or page layout changed", body = ApiError)
    )
)]
pub async fn get_category(
    data: web::Data<AppState>,
    query: web::Query<CategoryQuery>,
) -> AppResult<HttpResponse> {
    let slug = required(&query.category, "type")?;
    let url = endpoints::category(data.base(), slug);
    info!("Fetching category: {}", url);

    let result = data.scraper.fetch_listing(&url).await.map_err(|e| {
        error!("Failed to fetch category {}: {}", slug, e);
        e
    })?;

    let items = parse_category(&result.html, data.base())?;
    info!("Parsed {} entries for category {}", items.len(), slug);

    let body: Inline<Vec<ListingItem>> = if items.is_empty() {
        ErrorPayload::new(messages::NO_RESULTS).into()
    } else {
        Inline::Ok(items)
    };

    Ok(HttpResponse::Ok().json(body))
}

/// Query parameters for search endpoint
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct SearchQuery {
    /// Search keyword
    pub q: Option<String>,
}

/// GET /search - Search the site
#[utoipa::path(
    get,
    path = "/search",
    tag = "search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Up to 10 results, or `{\"error\": ...}` when the site is unreachable", body = Vec<ListingItem>),
        (status = 400, description = "Missing search query", body = ApiError)
    )
)]
pub async fn search(
    data: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> AppResult<HttpResponse> {
    let keyword = required(&query.q, "q")?;
    info!("Searching for: {}", keyword);

    let body: Inline<Vec<ListingItem>> = match data
        .scraper
        .fetch_page(&endpoints::search(data.base(), keyword))
        .await
    {
        Ok(result) => Inline::Ok(parse_search_results(&result.html, data.base())?),
        Err(e) => {
            warn!("Search for {} failed: {}", keyword, e);
            ErrorPayload::new(messages::RETRIEVE_FAILED).into()
        }
    };

    Ok(HttpResponse::Ok().json(body))
}

/// Query parameters for search-suggestion endpoint
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct SuggestQuery {
    /// Partial search term
    pub term: Option<String>,
}

/// GET /searchsug - Search suggestions
#[utoipa::path(
    get,
    path = "/searchsug",
    tag = "search",
    params(SuggestQuery),
    responses(
        (status = 200, description = "Suggestions, or `{\"error\", \"status_code\"}` when the site is unreachable", body = Vec<SuggestionItem>),
        (status = 400, description = "Missing term", body = ApiError)
    )
)]
pub async fn search_suggestions(
    data: web::Data<AppState>,
    query: web::Query<SuggestQuery>,
) -> AppResult<HttpResponse> {
    let term = required(&query.term, "term")?;
    info!("Fetching suggestions for: {}", term);

    let request = FetchRequest::post_form(
        endpoints::admin_ajax(data.base()),
        [("action", ajax::SEARCH_SUGGEST), ("term", term)],
    );

    let body: Inline<Vec<SuggestionItem>> = match data.scraper.fetch(request).await {
        Ok(result) => Inline::Ok(parse_suggestions(&result.html, data.base())?),
        Err(e) => {
            warn!("Suggestions for {} failed: {}", term, e);
            ErrorPayload::with_status(messages::SUGGEST_FAILED, e.status().unwrap_or(500)).into()
        }
    };

    Ok(HttpResponse::Ok().json(body))
}

/// Query parameters for season endpoint
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct SeasonQuery {
    /// Season number
    pub season: Option<u32>,
    /// WordPress post id of the series
    pub post: Option<u64>,
}

/// Fetch and parse one season through the AJAX endpoint
///
/// Every failure, including extraction errors, becomes an inline payload.
pub async fn fetch_season(state: &AppState, season: u32, post: u64) -> Inline<SeasonEpisodes> {
    let request = FetchRequest::post_form(
        endpoints::admin_ajax(state.base()),
        [
            ("action", ajax::SELECT_SEASON.to_string()),
            ("season", season.to_string()),
            ("post", post.to_string()),
        ],
    );

    let result = match state.scraper.fetch(request).await {
        Ok(result) => result,
        Err(e) => {
            warn!("Season {} of post {} failed: {}", season, post, e);
            return ErrorPayload::new(e.to_string()).into();
        }
    };

    match parse_season_episodes(&result.html) {
        Ok(episodes) => {
            info!("Parsed {} episodes for season {}", episodes.len(), season);
            Inline::Ok(SeasonEpisodes { episodes })
        }
        Err(e) => {
            error!("Failed to parse season {} of post {}: {}", season, post, e);
            ErrorPayload::new(e.to_string()).into()
        }
    }
}

/// GET /season - Episodes of one season
#[utoipa::path(
    get,
    path = "/season",
    tag = "detail",
    params(SeasonQuery),
    responses(
        (status = 200, description = "Episode list, or `{\"error\": ...}`", body = SeasonEpisodes),
        (status = 400, description = "Missing or non-numeric parameters", body = ApiError)
    )
)]
pub async fn get_season(
    data: web::Data<AppState>,
    query: web::Query<SeasonQuery>,
) -> AppResult<HttpResponse> {
    let (season, post) = match (query.season, query.post) {
        (Some(season), Some(post)) => (season, post),
        _ => {
            return Err(AppError::invalid_query(
                "Query parameters `season` and `post` are required",
            ))
        }
    };

    info!("Fetching season {} of post {}", season, post);
    Ok(HttpResponse::Ok().json(fetch_season(&data, season, post).await))
}

/// Query parameters for episode playback endpoint
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct EpisodeQuery {
    /// Absolute URL of the episode page
    pub url: Option<String>,
}

/// Absolute http(s) URL on the configured site
fn episode_url(raw: &str, base: &Url) -> Option<Url> {
    let url = Url::parse(raw).ok()?;
    let same_site = matches!(url.scheme(), "http" | "https")
        && url.host_str() == base.host_str()
        && url.port_or_known_default() == base.port_or_known_default();
    same_site.then_some(url)
}

/// GET /episodes - Episode playback detail
#[utoipa::path(
    get,
    path = "/episodes",
    tag = "detail",
    params(EpisodeQuery),
    responses(
        (status = 200, description = "Playback detail, or `{\"error\": ...}`", body = EpisodePlaybackDetail),
        (status = 400, description = "Missing url", body = ApiError),
        (status = 500, description = "Page could not be parsed", body = ApiError)
    )
)]
pub async fn get_episode(
    data: web::Data<AppState>,
    query: web::Query<EpisodeQuery>,
) -> AppResult<HttpResponse> {
    let raw = required(&query.url, "url")?;

    let Some(url) = episode_url(raw, data.base()) else {
        warn!("Rejected episode URL: {}", raw);
        return Ok(HttpResponse::Ok().json(ErrorPayload::new(messages::INVALID_EPISODE_URL)));
    };

    info!("Fetching episode: {}", url);
    let body: Inline<EpisodePlaybackDetail> = match data.scraper.fetch_page(url.as_str()).await {
        Ok(result) => Inline::Ok(parse_episode_playback(&result.html)?),
        Err(e) => {
            warn!("Failed to fetch episode {}: {}", url, e);
            ErrorPayload::new(messages::RETRIEVE_FAILED).into()
        }
    };

    Ok(HttpResponse::Ok().json(body))
}

/// Query parameters for detail endpoint
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct ScrapeQuery {
    /// Site path starting with `/series/` or `/movies/`
    pub q: Option<String>,
}

/// GET /scrape - Series or movie detail
#[utoipa::path(
    get,
    path = "/scrape",
    tag = "detail",
    params(ScrapeQuery),
    responses(
        (status = 200, description = "Series or movie detail, or `{\"error\": ...}` for an invalid path or unreachable site", body = ScrapedDetail),
        (status = 400, description = "Missing path", body = ApiError),
        (status = 500, description = "Page could not be parsed", body = ApiError)
    )
)]
pub async fn scrape_detail(
    data: web::Data<AppState>,
    query: web::Query<ScrapeQuery>,
) -> AppResult<HttpResponse> {
    let path = required(&query.q, "q")?;

    let Some(kind) = DetailKind::from_path(path) else {
        return Ok(HttpResponse::Ok().json(ErrorPayload::new(messages::INVALID_PATH)));
    };

    let url = endpoints::detail(data.base(), path);
    info!("Scraping {:?} detail: {}", kind, url);

    let body: Inline<ScrapedDetail> = match data.scraper.fetch_page(&url).await {
        Ok(result) => Inline::Ok(parse_detail(&result.html, kind)?),
        Err(e) => {
            warn!("Failed to fetch {}: {}", url, e);
            ErrorPayload::new(messages::RETRIEVE_FAILED).into()
        }
    };

    Ok(HttpResponse::Ok().json(body))
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Toon Scraper API",
        version = "0.1.0",
        description = "JSON proxy over the listing, search and detail pages of a streaming site",
        license(name = "MIT")
    ),
    paths(
        root,
        health_check,
        get_home,
        get_category,
        search,
        search_suggestions,
        get_season,
        get_episode,
        scrape_detail
    ),
    components(
        schemas(
            Liveness,
            Health,
            HomeListing,
            ListingItem,
            SuggestionItem,
            EpisodeItem,
            SeriesDetail,
            MovieDetail,
            ScrapedDetail,
            EpisodePlaybackDetail,
            SeasonEpisodes,
            ErrorPayload,
            ApiError,
            CategoryQuery,
            SearchQuery,
            SuggestQuery,
            SeasonQuery,
            EpisodeQuery,
            ScrapeQuery
        )
    ),
    tags(
        (name = "system", description = "Service status"),
        (name = "listing", description = "Home and category listings"),
        (name = "search", description = "Search and suggestions"),
        (name = "detail", description = "Series, movie, season and episode pages")
    )
)]
pub struct ApiDoc;

/// CORS policy: any origin, method and header
pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .send_wildcard()
        .allow_any_method()
        .allow_any_header()
}

/// Configure API routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::invalid_query(err.to_string()).into()),
    )
    .route("/", web::get().to(root))
    .route("/health", web::get().to(health_check))
    .route("/home", web::get().to(get_home))
    .route("/type", web::get().to(get_category))
    .route("/search", web::get().to(search))
    .route("/searchsug", web::get().to(search_suggestions))
    .route("/season", web::get().to(get_season))
    .route("/episodes", web::get().to(get_episode))
    .route("/scrape", web::get().to(scrape_detail));
}
