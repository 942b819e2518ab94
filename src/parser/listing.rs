//! Listing pages: home, category, search and search suggestions

use scraper::{ElementRef, Html, Selector};
use url::Url;

use super::profiles::{
    ItemPolicy, ListingProfile, RootPolicy, CATEGORY, HOME_MOVIES, HOME_SERIES, SEARCH, SUGGEST,
};
use super::{
    element_text, first_href, first_image, first_text, link_path, selector, HomeListing,
    ListingItem, ParseError, SuggestionItem, MISSING_LINK, UNKNOWN_TITLE,
};

struct ListingSelectors {
    root: Selector,
    item: Selector,
    title: Selector,
    image: Selector,
    link: Selector,
}

impl ListingSelectors {
    fn compile(profile: &ListingProfile) -> Result<Self, ParseError> {
        Ok(Self {
            root: selector(profile.root)?,
            item: selector(profile.item)?,
            title: selector(profile.title)?,
            image: selector(profile.image)?,
            link: selector(profile.link)?,
        })
    }
}

/// Parse the latest series and movies from the home page
///
/// Both widget lists must be present; each is capped at 20 entries.
pub fn parse_home(html: &str, base: &Url) -> Result<HomeListing, ParseError> {
    let document = Html::parse_document(html);

    Ok(HomeListing {
        series: extract_listing(&document, &HOME_SERIES, base)?,
        movies: extract_listing(&document, &HOME_MOVIES, base)?,
    })
}

/// Parse a category page
///
/// Entries missing a title, image or link are skipped. An empty result is
/// not an error here; the caller decides how to report it.
pub fn parse_category(html: &str, base: &Url) -> Result<Vec<ListingItem>, ParseError> {
    let document = Html::parse_document(html);
    extract_listing(&document, &CATEGORY, base)
}

/// Parse up to 10 search results. A page without results yields an empty list.
pub fn parse_search_results(html: &str, base: &Url) -> Result<Vec<ListingItem>, ParseError> {
    let document = Html::parse_document(html);
    extract_listing(&document, &SEARCH, base)
}

/// Parse the search-suggestion dropdown
///
/// The anchor text contains the type label (`<a>Naruto<span>TV</span></a>`);
/// the label is reported separately and removed from the title.
pub fn parse_suggestions(html: &str, base: &Url) -> Result<Vec<SuggestionItem>, ParseError> {
    let document = Html::parse_document(html);

    let item_selector = selector(SUGGEST.item)?;
    let anchor_selector = selector(SUGGEST.anchor)?;
    let label_selector = selector(SUGGEST.label)?;

    let suggestions = document
        .select(&item_selector)
        .filter_map(|item| item.select(&anchor_selector).next())
        .map(|anchor| {
            let kind = first_text(anchor, &label_selector).unwrap_or_default();
            let full = element_text(anchor).unwrap_or_default();
            let title = strip_label(&full, &kind);

            let url = anchor
                .value()
                .attr("href")
                .map(|href| link_path(href, base))
                .unwrap_or_else(|| MISSING_LINK.to_string());

            SuggestionItem {
                title: if title.is_empty() {
                    UNKNOWN_TITLE.to_string()
                } else {
                    title
                },
                kind,
                url,
            }
        })
        .collect();

    Ok(suggestions)
}

/// Remove every occurrence of `label` from `text`
fn strip_label(text: &str, label: &str) -> String {
    if label.is_empty() {
        return text.trim().to_string();
    }

    text.replace(label, "").trim().to_string()
}

fn extract_listing(
    document: &Html,
    profile: &ListingProfile,
    base: &Url,
) -> Result<Vec<ListingItem>, ParseError> {
    let selectors = ListingSelectors::compile(profile)?;

    let roots: Vec<ElementRef<'_>> = document.select(&selectors.root).collect();
    if roots.is_empty() {
        return match profile.root_policy {
            RootPolicy::Required => Err(ParseError::MissingAnchor(profile.root.to_string())),
            RootPolicy::Optional => Ok(Vec::new()),
        };
    }

    let entries: Vec<ElementRef<'_>> = roots
        .iter()
        .flat_map(|root| root.select(&selectors.item))
        .collect();
    if entries.is_empty() && profile.root_policy == RootPolicy::Required {
        return Err(ParseError::MissingAnchor(format!(
            "{} {}",
            profile.root, profile.item
        )));
    }

    let items = entries
        .into_iter()
        .filter_map(|entry| extract_item(entry, &selectors, profile.item_policy, base));

    Ok(match profile.limit {
        Some(limit) => items.take(limit).collect(),
        None => items.collect(),
    })
}

fn extract_item(
    entry: ElementRef<'_>,
    selectors: &ListingSelectors,
    policy: ItemPolicy,
    base: &Url,
) -> Option<ListingItem> {
    let title = first_text(entry, &selectors.title);
    let image = first_image(entry, &selectors.image);
    let href = first_href(entry, &selectors.link);

    match policy {
        ItemPolicy::RequireAll => Some(ListingItem {
            title: title?,
            image: image?,
            link: link_path(&href?, base),
        }),
        ItemPolicy::Placeholder => Some(ListingItem {
            title: title.unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
            image: image.unwrap_or_default(),
            link: href
                .map(|href| link_path(&href, base))
                .unwrap_or_else(|| MISSING_LINK.to_string()),
        }),
    }
}



#[cfg(test)]
mod property_tests {
    use super::fixtures::{entry, home_page, list_page};
    use super::*;
    use proptest::prelude::*;

    fn base() -> Url {
        Url::parse("https://toonstream.one/").unwrap()
    }

    /// Entry with a title, image and link, or a randomly incomplete one
    fn arbitrary_entry() -> impl Strategy<Value = (bool, bool, bool)> {
        (any::<bool>(), any::<bool>(), any::<bool>())
    }

    fn numbered_entries(count: usize) -> Vec<String> {
        (0..count)
            .map(|n| {
                let title = format!("Title {n}");
                let image = format!("https://img.example.com/{n}.jpg");
                let link = format!("/series/title-{n}/");
                entry(Some(title.as_str()), Some(image.as_str()), Some(link.as_str()))
            })
            .collect()
    }

    proptest! {
        /// The home page returns min(N, 20) entries per list, in document order
        #[test]
        fn property_home_caps_and_preserves_order(n in 1usize..40, m in 1usize..40) {
            let html = home_page(&numbered_entries(n), &numbered_entries(m));
            let home = parse_home(&html, &base()).unwrap();

            prop_assert_eq!(home.series.len(), n.min(20));
            prop_assert_eq!(home.movies.len(), m.min(20));
            for (i, item) in home.series.iter().enumerate() {
                prop_assert_eq!(&item.title, &format!("Title {i}"));
                prop_assert_eq!(&item.link, &format!("/series/title-{i}/"));
            }
        }

        /// Category keeps exactly the complete entries
        #[test]
        fn property_category_keeps_only_complete_entries(
            shapes in prop::collection::vec(arbitrary_entry(), 1..30),
        ) {
            let entries: Vec<String> = shapes
                .iter()
                .enumerate()
                .map(|(n, (has_title, has_image, has_link))| {
                    let title = format!("Title {n}");
                    let image = format!("https://img.example.com/{n}.jpg");
                    let link = format!("/series/title-{n}/");
                    entry(
                        has_title.then_some(title.as_str()),
                        has_image.then_some(image.as_str()),
                        has_link.then_some(link.as_str()),
                    )
                })
                .collect();

            let expected: Vec<String> = shapes
                .iter()
                .enumerate()
                .filter(|(_, (t, i, l))| *t && *i && *l)
                .map(|(n, _)| format!("Title {n}"))
                .collect();

            let items = parse_category(&list_page(&entries), &base()).unwrap();
            let titles: Vec<String> = items.into_iter().map(|i| i.title).collect();
            prop_assert_eq!(titles, expected);
        }

        /// Search and home never drop an entry because of missing fields
        #[test]
        fn property_search_fills_placeholders(
            shapes in prop::collection::vec(arbitrary_entry(), 0..10),
        ) {
            let entries: Vec<String> = shapes
                .iter()
                .map(|(t, i, l)| {
                    entry(
                        t.then_some("Some Title"),
                        i.then_some("https://img.example.com/x.jpg"),
                        l.then_some("/movies/x/"),
                    )
                })
                .collect();

            let results = parse_search_results(&list_page(&entries), &base()).unwrap();
            prop_assert_eq!(results.len(), shapes.len());
            for (item, (t, i, l)) in results.iter().zip(&shapes) {
                prop_assert_eq!(item.title == "Unknown Title", !t);
                prop_assert_eq!(item.image.is_empty(), !i);
                prop_assert_eq!(item.link == "#", !l);
            }
        }
    }
}
