//! Episode cards, season listings and the episode playback page

use scraper::{ElementRef, Html, Selector};

use super::profiles::{EpisodeProfile, EPISODE_CARD, PLAYBACK, SEASON_ITEM};
use super::{
    attr_in_order, first_href, first_image, first_text, selector, EpisodeItem,
    EpisodePlaybackDetail, ParseError,
};

/// Compiled selectors for one episode card
pub(crate) struct EpisodeSelectors {
    number: Selector,
    title: Selector,
    link: Selector,
    image: Selector,
}

impl EpisodeSelectors {
    pub(crate) fn compile(profile: &EpisodeProfile) -> Result<Self, ParseError> {
        Ok(Self {
            number: selector(profile.number)?,
            title: selector(profile.title)?,
            link: selector(profile.link)?,
            image: selector(profile.image)?,
        })
    }

    pub(crate) fn extract(&self, card: ElementRef<'_>) -> EpisodeItem {
        EpisodeItem {
            episode_number: first_text(card, &self.number),
            title: first_text(card, &self.title),
            url: first_href(card, &self.link),
            image: first_image(card, &self.image),
        }
    }
}

/// Every episode card matched by `css`, in document order
pub(crate) fn extract_episode_cards(
    scope: ElementRef<'_>,
    css: &str,
    cards: &EpisodeSelectors,
) -> Result<Vec<EpisodeItem>, ParseError> {
    let card_selector = selector(css)?;
    Ok(scope
        .select(&card_selector)
        .map(|card| cards.extract(card))
        .collect())
}

/// Parse the HTML returned by the `action_select_season` AJAX call
pub fn parse_season_episodes(html: &str) -> Result<Vec<EpisodeItem>, ParseError> {
    let document = Html::parse_document(html);
    let cards = EpisodeSelectors::compile(&EPISODE_CARD)?;
    extract_episode_cards(document.root_element(), SEASON_ITEM, &cards)
}

/// Parse an episode playback page
///
/// `thumbnail` is read from the background region and `background_image`
/// from the post thumbnail, the reverse of the detail pages.
pub fn parse_episode_playback(html: &str) -> Result<EpisodePlaybackDetail, ParseError> {
    let document = Html::parse_document(html);
    let root = document.root_element();

    let title = first_text(root, &selector(PLAYBACK.title)?);
    let thumbnail = first_image(root, &selector(PLAYBACK.thumbnail)?);
    let background_image = first_image(root, &selector(PLAYBACK.background)?);
    let description = first_text(root, &selector(PLAYBACK.description)?);
    let duration = first_text(root, &selector(PLAYBACK.duration)?);

    let streaming_sources = root
        .select(&selector(PLAYBACK.iframes)?)
        .filter_map(|iframe| attr_in_order(iframe, &["src", "data-src"]))
        .collect();

    let cards = EpisodeSelectors::compile(&EPISODE_CARD)?;

    Ok(EpisodePlaybackDetail {
        title,
        thumbnail,
        background_image,
        description,
        duration,
        streaming_sources,
        other_episodes: extract_episode_cards(root, PLAYBACK.other_episodes, &cards)?,
        recommended_series: extract_episode_cards(root, PLAYBACK.recommended, &cards)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEASON_HTML: &str = r#"
        <li>
            <article class="post dfx fcl episodes fa-play-circle lg">
                <div class="post-thumbnail"><figure><img loading="lazy" src="https://img.example.com/e1.jpg"></figure></div>
                <header class="entry-header">
                    <span class="num-epi">2x1</span>
                    <h2 class="entry-title">Homecoming</h2>
                </header>
                <a href="https://toonstream.one/episode/show-2x1/" class="lnk-blk"></a>
            </article>
        </li>
        <li>
            <article class="post dfx fcl episodes">
                <header class="entry-header"><span class="num-epi">2x2</span></header>
                <a href="https://toonstream.one/episode/show-2x2/" class="lnk-blk"></a>
            </article>
        </li>
    "#;

    #[test]
    fn test_parse_season_episodes() {
        let episodes = parse_season_episodes(SEASON_HTML).unwrap();
        assert_eq!(episodes.len(), 2);

        assert_eq!(episodes[0].episode_number.as_deref(), Some("2x1"));
        assert_eq!(episodes[0].title.as_deref(), Some("Homecoming"));
        assert_eq!(
            episodes[0].url.as_deref(),
            Some("https://toonstream.one/episode/show-2x1/")
        );
        assert_eq!(
            episodes[0].image.as_deref(),
            Some("https://img.example.com/e1.jpg")
        );
    }

    #[test]
    fn test_missing_card_fields_are_null() {
        let episodes = parse_season_episodes(SEASON_HTML).unwrap();
        let second = &episodes[1];
        assert_eq!(second.episode_number.as_deref(), Some("2x2"));
        assert!(second.title.is_none());
        assert!(second.image.is_none());

        let json = serde_json::to_value(second).unwrap();
        assert!(json["title"].is_null());
        assert!(json["image"].is_null());
    }

    #[test]
    fn test_parse_season_episodes_empty_response() {
        assert!(parse_season_episodes("").unwrap().is_empty());
        assert!(parse_season_episodes("0").unwrap().is_empty());
    }

    const PLAYBACK_HTML: &str = r#"
        <html>
        <body class="episodes-template-default single single-episodes postid-991">
            <div class="bghd"><img class="TPostBg" src="https://img.example.com/backdrop.jpg"></div>
            <article class="post single">
                <div class="post-thumbnail"><figure><img src="https://img.example.com/poster.jpg"></figure></div>
                <header class="entry-header">
                    <h1 class="entry-title">Show 1x3</h1>
                    <div class="entry-meta"><span class="duration">24 min</span></div>
                </header>
                <div class="description"><p>The third episode.</p><p>Second paragraph.</p></div>
            </article>
            <div class="video aa-tb hdd on"><iframe src="https://player.example.com/embed/1"></iframe></div>
            <div class="video aa-tb hdd"><iframe data-src="https://player.example.com/embed/2"></iframe></div>
            <section class="section episodes">
                <ul id="episode_by_temp" class="post-lst">
                    <li><article><span class="num-epi">1x1</span><h2 class="entry-title">Pilot</h2><a href="https://toonstream.one/episode/show-1x1/"></a></article></li>
                    <li><article><span class="num-epi">1x2</span><h2 class="entry-title">Second</h2><a href="https://toonstream.one/episode/show-1x2/"></a></article></li>
                </ul>
            </section>
            <section class="series-recommended">
                <ul class="post-lst">
                    <li><article><h2 class="entry-title">Other Show</h2><img data-src="https://img.example.com/other.jpg"><a href="https://toonstream.one/series/other-show/"></a></article></li>
                </ul>
            </section>
        </body>
        </html>
    "#;

    #[test]
    fn test_parse_episode_playback() {
        let detail = parse_episode_playback(PLAYBACK_HTML).unwrap();

        assert_eq!(detail.title.as_deref(), Some("Show 1x3"));
        assert_eq!(detail.description.as_deref(), Some("The third episode."));
        assert_eq!(detail.duration.as_deref(), Some("24 min"));
        assert_eq!(
            detail.streaming_sources,
            vec![
                "https://player.example.com/embed/1".to_string(),
                "https://player.example.com/embed/2".to_string(),
            ]
        );

        assert_eq!(detail.other_episodes.len(), 2);
        assert_eq!(detail.other_episodes[1].title.as_deref(), Some("Second"));

        assert_eq!(detail.recommended_series.len(), 1);
        assert_eq!(
            detail.recommended_series[0].image.as_deref(),
            Some("https://img.example.com/other.jpg")
        );
        assert!(detail.recommended_series[0].episode_number.is_none());
    }

    #[test]
    fn test_playback_thumbnail_and_background_are_crossed() {
        let detail = parse_episode_playback(PLAYBACK_HTML).unwrap();
        assert_eq!(
            detail.thumbnail.as_deref(),
            Some("https://img.example.com/backdrop.jpg")
        );
        assert_eq!(
            detail.background_image.as_deref(),
            Some("https://img.example.com/poster.jpg")
        );
    }

    #[test]
    fn test_parse_episode_playback_empty_page() {
        let detail = parse_episode_playback("<html><body></body></html>").unwrap();
        assert!(detail.title.is_none());
        assert!(detail.thumbnail.is_none());
        assert!(detail.streaming_sources.is_empty());
        assert!(detail.other_episodes.is_empty());
        assert!(detail.recommended_series.is_empty());
    }
}
