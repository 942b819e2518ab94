//! Series and movie detail pages

use scraper::{ElementRef, Html};

use super::episode::{extract_episode_cards, EpisodeSelectors};
use super::profiles::{DETAIL, EPISODE_CARD};
use super::{
    all_texts, element_text, first_image, first_text, lazy_source, selector, MovieDetail,
    ParseError, ScrapedDetail, SeriesDetail,
};

/// Which detail layout a request path points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailKind {
    Series,
    Movie,
}

impl DetailKind {
    /// `/series/...` or `/movies/...`; anything else is rejected
    pub fn from_path(path: &str) -> Option<Self> {
        if path.starts_with("/series/") {
            Some(Self::Series)
        } else if path.starts_with("/movies/") {
            Some(Self::Movie)
        } else {
            None
        }
    }
}

/// Fields shared by both layouts
struct CommonFields {
    post_id: Option<String>,
    title: Option<String>,
    thumbnail: Option<String>,
    background_image: Option<String>,
    description: Option<String>,
    genres: Vec<String>,
    cast: Vec<String>,
}

fn extract_common(document: &Html) -> Result<CommonFields, ParseError> {
    let root = document.root_element();

    let thumbnail = first_image(root, &selector(DETAIL.thumbnail)?);
    let background_image =
        first_image(root, &selector(DETAIL.background)?).or_else(|| thumbnail.clone());

    Ok(CommonFields {
        post_id: extract_post_id(document)?,
        title: first_text(root, &selector(DETAIL.title)?),
        thumbnail,
        background_image,
        description: first_text(root, &selector(DETAIL.description)?),
        genres: all_texts(root, &selector(DETAIL.genres)?),
        cast: all_texts(root, &selector(DETAIL.cast)?),
    })
}

/// WordPress post id from the `postid-<id>` body class
pub fn extract_post_id(document: &Html) -> Result<Option<String>, ParseError> {
    let body_selector = selector(DETAIL.body)?;

    Ok(document
        .select(&body_selector)
        .next()
        .and_then(|body| body.value().attr("class"))
        .and_then(|classes| {
            classes.split_whitespace().find_map(|class| {
                class
                    .strip_prefix(DETAIL.post_id_prefix)
                    .filter(|id| !id.is_empty())
                    .map(str::to_string)
            })
        }))
}

/// Count from the second span of the episodes badge
fn episode_count(badge: ElementRef<'_>) -> Result<Option<u32>, ParseError> {
    let part_selector = selector(DETAIL.badge_part)?;
    Ok(badge
        .select(&part_selector)
        .nth(1)
        .and_then(element_text)
        .and_then(|text| text.parse().ok()))
}

/// Parse a series detail page
pub fn parse_series_detail(html: &str) -> Result<SeriesDetail, ParseError> {
    let document = Html::parse_document(html);
    let root = document.root_element();
    let common = extract_common(&document)?;

    let seasons_available = all_texts(root, &selector(DETAIL.seasons)?);

    let number_of_episodes = match root.select(&selector(DETAIL.episodes_badge)?).next() {
        Some(badge) => episode_count(badge)?,
        None => None,
    };

    let cards = EpisodeSelectors::compile(&EPISODE_CARD)?;
    let episodes = extract_episode_cards(root, DETAIL.episode_list, &cards)?;

    Ok(SeriesDetail {
        post_id: common.post_id,
        title: common.title,
        thumbnail: common.thumbnail,
        background_image: common.background_image,
        description: common.description,
        genres: common.genres,
        cast: common.cast,
        number_of_seasons: seasons_available.len(),
        number_of_episodes,
        seasons_available,
        episodes,
    })
}

/// Parse a movie detail page
pub fn parse_movie_detail(html: &str) -> Result<MovieDetail, ParseError> {
    let document = Html::parse_document(html);
    let root = document.root_element();
    let common = extract_common(&document)?;

    let duration = first_text(root, &selector(DETAIL.duration)?);
    let sources = root
        .select(&selector(DETAIL.video_iframes)?)
        .filter_map(lazy_source)
        .collect();

    Ok(MovieDetail {
        post_id: common.post_id,
        title: common.title,
        thumbnail: common.thumbnail,
        background_image: common.background_image,
        description: common.description,
        duration,
        genres: common.genres,
        cast: common.cast,
        sources,
    })
}

/// Parse a detail page of the given kind
pub fn parse_detail(html: &str, kind: DetailKind) -> Result<ScrapedDetail, ParseError> {
    match kind {
        DetailKind::Series => parse_series_detail(html).map(ScrapedDetail::Series),
        DetailKind::Movie => parse_movie_detail(html).map(ScrapedDetail::Movie),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SERIES_HTML: &str = r#"
        <html>
        <body class="series-template-default single single-series postid-12345 logged-out">
            <div class="bghd"><img class="TPostBg" src="https://img.example.com/bg.jpg"></div>
            <article class="post single">
                <div class="post-thumbnail alg-ss">
                    <figure><img loading="lazy" src="https://img.example.com/poster.jpg"></figure>
                </div>
                <header class="entry-header">
                    <h1 class="entry-title">Avatar: The Last Airbender</h1>
                    <div class="entry-meta">
                        <span class="genres"><a href="/category/action/">Action</a>, <a href="/category/adventure/">Adventure</a></span>
                        <span class="episodes"><span>Episodes</span> <span>61</span></span>
                    </div>
                </header>
                <div class="description"><p>Water. Earth. Fire. Air.</p></div>
                <ul class="cast-lst"><li><p class="loadactor"><a href="/cast/zach/">Zach Tyler</a><a href="/cast/mae/">Mae Whitman</a></p></li></ul>
            </article>
            <div class="choose-season">
                <ul class="aa-cnt sub-menu">
                    <li class="sel-temp"><a data-post="12345" data-season="1" href="javascript:void(0)">Season 1</a></li>
                    <li class="sel-temp"><a data-post="12345" data-season="2" href="javascript:void(0)">Season 2</a></li>
                    <li class="sel-temp"><a data-post="12345" data-season="3" href="javascript:void(0)">Season 3</a></li>
                </ul>
            </div>
            <ul id="episode_by_temp" class="post-lst">
                <li><article><span class="num-epi">1x1</span><h2 class="entry-title">The Boy in the Iceberg</h2><img src="https://img.example.com/1x1.jpg"><a href="https://toonstream.one/episode/avatar-1x1/" class="lnk-blk"></a></article></li>
                <li><article><span class="num-epi">1x2</span><h2 class="entry-title">The Avatar Returns</h2><a href="https://toonstream.one/episode/avatar-1x2/" class="lnk-blk"></a></article></li>
            </ul>
        </body>
        </html>
    "#;

    const MOVIE_HTML: &str = r#"
        <html>
        <body class="movies-template-default single single-movies postid-777">
            <article class="post single">
                <div class="post-thumbnail"><figure><img data-src="https://img.example.com/movie.jpg" src="data:image/gif;base64,AA"></figure></div>
                <header class="entry-header">
                    <h1 class="entry-title">Spirited Away</h1>
                    <div class="entry-meta"><span class="duration">2h 5m</span><span class="genres"><a>Fantasy</a></span></div>
                </header>
                <div class="description"><p>A girl wanders into a world of spirits.</p></div>
            </article>
            <div class="video-options">
                <div class="video aa-tb hdd on"><iframe src="about:blank" data-src="https://player.example.com/embed/a"></iframe></div>
                <div class="video aa-tb hdd"><iframe src="https://player.example.com/embed/b"></iframe></div>
            </div>
            <iframe src="https://ads.example.com/banner"></iframe>
        </body>
        </html>
    "#;

    #[test]
    fn test_detail_kind_from_path() {
        assert_eq!(DetailKind::from_path("/series/avatar/"), Some(DetailKind::Series));
        assert_eq!(DetailKind::from_path("/movies/akira/"), Some(DetailKind::Movie));
        assert_eq!(DetailKind::from_path("/foo/bar"), None);
        assert_eq!(DetailKind::from_path("series/avatar/"), None);
    }

    #[test]
    fn test_parse_series_detail_full() {
        let detail = parse_series_detail(SERIES_HTML).unwrap();

        assert_eq!(detail.post_id.as_deref(), Some("12345"));
        assert_eq!(detail.title.as_deref(), Some("Avatar: The Last Airbender"));
        assert_eq!(detail.thumbnail.as_deref(), Some("https://img.example.com/poster.jpg"));
        assert_eq!(detail.background_image.as_deref(), Some("https://img.example.com/bg.jpg"));
        assert_eq!(detail.description.as_deref(), Some("Water. Earth. Fire. Air."));
        assert_eq!(detail.genres, vec!["Action", "Adventure"]);
        assert_eq!(detail.cast, vec!["Zach Tyler", "Mae Whitman"]);
        assert_eq!(detail.seasons_available, vec!["Season 1", "Season 2", "Season 3"]);
        assert_eq!(detail.number_of_seasons, 3);
        assert_eq!(detail.number_of_episodes, Some(61));

        assert_eq!(detail.episodes.len(), 2);
        assert_eq!(detail.episodes[0].episode_number.as_deref(), Some("1x1"));
        assert_eq!(detail.episodes[1].title.as_deref(), Some("The Avatar Returns"));
        assert!(detail.episodes[1].image.is_none());
    }

    #[test]
    fn test_parse_series_detail_missing_optional_fields() {
        let html = r#"<html><body class="single"><h1 class="entry-title">Bare</h1></body></html>"#;
        let detail = parse_series_detail(html).unwrap();

        assert_eq!(detail.title.as_deref(), Some("Bare"));
        assert!(detail.post_id.is_none());
        assert!(detail.thumbnail.is_none());
        assert!(detail.background_image.is_none());
        assert!(detail.genres.is_empty());
        assert!(detail.cast.is_empty());
        assert_eq!(detail.number_of_seasons, 0);
        assert!(detail.number_of_episodes.is_none());
        assert!(detail.episodes.is_empty());
    }

    #[test]
    fn test_number_of_episodes_not_numeric() {
        let html = r#"<html><body><span class="episodes"><span>Episodes</span><span>many</span></span></body></html>"#;
        assert!(parse_series_detail(html).unwrap().number_of_episodes.is_none());

        let html = r#"<html><body><span class="episodes"><span>61</span></span></body></html>"#;
        assert!(parse_series_detail(html).unwrap().number_of_episodes.is_none());
    }

    #[test]
    fn test_background_falls_back_to_thumbnail() {
        let html = r#"<html><body><div class="post-thumbnail"><img src="https://img.example.com/p.jpg"></div></body></html>"#;
        let detail = parse_series_detail(html).unwrap();
        assert_eq!(detail.background_image, detail.thumbnail);
        assert_eq!(detail.background_image.as_deref(), Some("https://img.example.com/p.jpg"));
    }

    #[test]
    fn test_parse_movie_detail() {
        let detail = parse_movie_detail(MOVIE_HTML).unwrap();

        assert_eq!(detail.post_id.as_deref(), Some("777"));
        assert_eq!(detail.title.as_deref(), Some("Spirited Away"));
        assert_eq!(detail.thumbnail.as_deref(), Some("https://img.example.com/movie.jpg"));
        assert_eq!(detail.background_image, detail.thumbnail);
        assert_eq!(detail.duration.as_deref(), Some("2h 5m"));
        assert_eq!(detail.genres, vec!["Fantasy"]);
        assert!(detail.cast.is_empty());
        assert_eq!(
            detail.sources,
            vec![
                "https://player.example.com/embed/a".to_string(),
                "https://player.example.com/embed/b".to_string(),
            ]
        );
    }

    #[test]
    fn test_parse_detail_tags_output() {
        let json = serde_json::to_value(parse_detail(SERIES_HTML, DetailKind::Series).unwrap()).unwrap();
        assert_eq!(json["type"], "series");
        assert_eq!(json["post_id"], "12345");
        assert_eq!(json["number_of_seasons"], 3);

        let json = serde_json::to_value(parse_detail(MOVIE_HTML, DetailKind::Movie).unwrap()).unwrap();
        assert_eq!(json["type"], "movie");
        assert_eq!(json["sources"].as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn test_extract_post_id_ignores_other_classes() {
        let document = Html::parse_document(r#"<html><body class="postid- page-id-3 postid-42"></body></html>"#);
        assert_eq!(extract_post_id(&document).unwrap().as_deref(), Some("42"));
    }

    #[test]
    fn test_detail_output_is_deterministic() {
        let first = serde_json::to_string(&parse_detail(SERIES_HTML, DetailKind::Series).unwrap()).unwrap();
        let second = serde_json::to_string(&parse_detail(SERIES_HTML, DetailKind::Series).unwrap()).unwrap();
        assert_eq!(first, second);
    }
}
