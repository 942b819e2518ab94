//! Selector profiles for every page type of the scraped site
//!
//! When the site's markup changes, update this table and bump
//! [`PROFILE_VERSION`]. The extraction code never hard-codes a selector.

/// Markup revision these selectors were written against
pub const PROFILE_VERSION: &str = "2024.2";

/// What to do when a listing has no entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootPolicy {
    /// Missing root, or a root without entries, is an extraction error
    Required,
    /// No entries means no results
    Optional,
}

/// How incomplete entries are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemPolicy {
    /// Keep the entry, filling fallbacks
    Placeholder,
    /// Drop the entry unless title, image and link all resolve
    RequireAll,
}

/// Title/image/link listing
#[derive(Debug, Clone, Copy)]
pub struct ListingProfile {
    pub name: &'static str,
    /// Container of the repeated entries
    pub root: &'static str,
    /// Entry, relative to the root
    pub item: &'static str,
    pub title: &'static str,
    pub image: &'static str,
    pub link: &'static str,
    pub limit: Option<usize>,
    pub root_policy: RootPolicy,
    pub item_policy: ItemPolicy,
}

pub const HOME_SERIES: ListingProfile = ListingProfile {
    name: "home-series",
    root: "#widget_list_movies_series-2-all ul.post-lst",
    item: "li",
    title: ".entry-title",
    image: "img",
    link: "a",
    limit: Some(20),
    root_policy: RootPolicy::Required,
    item_policy: ItemPolicy::Placeholder,
};

pub const HOME_MOVIES: ListingProfile = ListingProfile {
    name: "home-movies",
    root: "#widget_list_movies_series-3-all ul.post-lst",
    ..HOME_SERIES
};

pub const CATEGORY: ListingProfile = ListingProfile {
    name: "category",
    root: ".post-lst",
    item: "li",
    title: ".entry-title",
    image: "img",
    link: "a",
    limit: None,
    root_policy: RootPolicy::Required,
    item_policy: ItemPolicy::RequireAll,
};

pub const SEARCH: ListingProfile = ListingProfile {
    name: "search",
    root: ".post-lst",
    item: "li",
    title: ".entry-title",
    image: "img",
    link: "a",
    limit: Some(10),
    root_policy: RootPolicy::Optional,
    item_policy: ItemPolicy::Placeholder,
};

/// Search-suggestion dropdown returned by the AJAX endpoint
#[derive(Debug, Clone, Copy)]
pub struct SuggestProfile {
    pub item: &'static str,
    pub anchor: &'static str,
    /// Type label nested in the anchor
    pub label: &'static str,
}

pub const SUGGEST: SuggestProfile = SuggestProfile {
    item: "li.fa-play-circle",
    anchor: "a",
    label: "span",
};

/// Fields of an episode card
#[derive(Debug, Clone, Copy)]
pub struct EpisodeProfile {
    pub number: &'static str,
    pub title: &'static str,
    pub link: &'static str,
    pub image: &'static str,
}

pub const EPISODE_CARD: EpisodeProfile = EpisodeProfile {
    number: ".num-epi",
    title: ".entry-title",
    link: "a",
    image: "img",
};

/// Episode blocks in the `action_select_season` response
pub const SEASON_ITEM: &str = "li";

/// Series and movie detail pages
#[derive(Debug, Clone, Copy)]
pub struct DetailProfile {
    pub title: &'static str,
    pub body: &'static str,
    pub post_id_prefix: &'static str,
    pub thumbnail: &'static str,
    pub background: &'static str,
    pub description: &'static str,
    pub genres: &'static str,
    pub cast: &'static str,
    pub seasons: &'static str,
    /// Two-part badge: label span, then count span
    pub episodes_badge: &'static str,
    pub badge_part: &'static str,
    pub episode_list: &'static str,
    pub duration: &'static str,
    pub video_iframes: &'static str,
}

pub const DETAIL: DetailProfile = DetailProfile {
    title: "h1.entry-title",
    body: "body",
    post_id_prefix: "postid-",
    thumbnail: ".post-thumbnail img",
    background: ".bghd img",
    description: ".description p",
    genres: ".genres a",
    cast: ".loadactor a",
    seasons: ".choose-season .sel-temp a",
    episodes_badge: ".episodes",
    badge_part: "span",
    episode_list: "#episode_by_temp li",
    duration: ".duration",
    video_iframes: ".video iframe",
};

/// Episode playback page
#[derive(Debug, Clone, Copy)]
pub struct PlaybackProfile {
    pub title: &'static str,
    /// Populates the `thumbnail` field
    pub thumbnail: &'static str,
    /// Populates the `background_image` field
    pub background: &'static str,
    pub description: &'static str,
    pub duration: &'static str,
    pub iframes: &'static str,
    pub other_episodes: &'static str,
    pub recommended: &'static str,
}

// thumbnail and background are crossed relative to DETAIL
pub const PLAYBACK: PlaybackProfile = PlaybackProfile {
    title: "h1.entry-title",
    thumbnail: ".bghd img",
    background: ".post-thumbnail img",
    description: ".description p",
    duration: ".duration",
    iframes: "iframe",
    other_episodes: "#episode_by_temp li",
    recommended: ".series-recommended .post-lst li",
};
