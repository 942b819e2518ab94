//! Constants module for the scraping proxy
//!
//! Contains upstream URL builders and the fixed response messages.

/// Default origin of the scraped site
pub const DEFAULT_BASE_URL: &str = "https://toonstream.one";

/// Desktop browser User-Agent sent when none is configured
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// URL builder functions for all upstream pages
pub mod endpoints {
    use url::Url;

    fn origin(base: &Url) -> &str {
        base.as_str().trim_end_matches('/')
    }

    /// Home page URL
    pub fn home(base: &Url) -> String {
        format!("{}/home/", origin(base))
    }

    /// Category listing URL; nested slugs like `language/hindi` keep their `/`
    pub fn category(base: &Url, slug: &str) -> String {
        let path = slug
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/");
        format!("{}/category/{}/", origin(base), path)
    }

    /// Search URL with query parameter
    pub fn search(base: &Url, query: &str) -> String {
        format!("{}/?s={}", origin(base), urlencoding::encode(query))
    }

    /// WordPress AJAX endpoint used by season and suggestion lookups
    pub fn admin_ajax(base: &Url) -> String {
        format!("{}/wp-admin/admin-ajax.php", origin(base))
    }

    /// Series or movie detail page for a site-relative path
    pub fn detail(base: &Url, path: &str) -> String {
        format!("{}/{}", origin(base), path.trim_start_matches('/'))
    }
}

/// Form actions understood by the site's AJAX endpoint
pub mod ajax {
    pub const SELECT_SEASON: &str = "action_select_season";
    pub const SEARCH_SUGGEST: &str = "action_tr_search_suggest";
}

/// Messages returned to API clients
pub mod messages {
    pub const LIVENESS: &str = "Scraper API is running";
    pub const RETRIEVE_FAILED: &str = "Failed to retrieve data";
    pub const SUGGEST_FAILED: &str = "Failed to fetch suggestions";
    pub const NO_RESULTS: &str = "No results found";
    pub const INVALID_PATH: &str = "Invalid path. Must start with /series/ or /movies/";
    pub const INVALID_EPISODE_URL: &str = "Invalid episode URL";
}
