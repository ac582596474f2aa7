//! Document queries for listing and article pages
//!
//! This module turns fetched markup into plain data:
//! - listing-context pages become a list of [`CrawlAction`]s (categories,
//!   pagination and article links)
//! - article pages become an [`ArticlePage`] (title, raw date, comment blob)
//!
//! Nothing here performs I/O or touches crawl state; scheduling the actions is
//! the coordinator's job.

use crate::url::resolve_link;
use chrono::{DateTime, Duration, Utc};
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Navigation entries carrying a category id
const NAV_ITEM_SELECTOR: &str = "#wrap-main-nav > nav > ul > li";
/// Pagination links of a listing page
const PAGINATION_SELECTOR: &str = "#pagination .button-page a[href]";
/// Article links of a listing page
const ARTICLE_LINK_SELECTOR: &str = ".item-news .title-news a[href]";
/// Headline of an article page
const TITLE_SELECTOR: &str = ".top-detail .container .sidebar-1 .title-detail";
/// Publish date of an article page
const DATE_SELECTOR: &str = ".top-detail .container .sidebar-1 .header-content span.date";
/// Comment box carrying the engagement query
const COMMENT_BOX_SELECTOR: &str = "#box_comment_vne";

/// The next step requested by a listing-context page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlAction {
    /// Visit a category or pagination page on the listing context
    VisitListing(Url),
    /// Visit an article page on the article context
    VisitArticle(Url),
}

/// A category found in the site navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// Category id (`data-id` of the navigation entry)
    pub id: String,
    /// Site-relative link of the category
    pub link: String,
}

/// The trailing publication window listing pages are bounded by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlWindow {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl CrawlWindow {
    /// Creates the window of `days` days ending at `now`
    pub fn trailing(days: u32, now: DateTime<Utc>) -> Self {
        Self {
            from: now - Duration::days(i64::from(days)),
            to: now,
        }
    }

    /// Builds the day-bounded listing URL of a category
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use newsrank::crawler::CrawlWindow;
    ///
    /// let window = CrawlWindow::trailing(7, Utc.timestamp_opt(1682726400, 0).unwrap());
    /// assert_eq!(
    ///     window.listing_url("https://vnexpress.net", "1001005"),
    ///     "https://vnexpress.net/category/day?cateid=1001005&fromdate=1682121600&todate=1682726400&allcate=1001005"
    /// );
    /// ```
    pub fn listing_url(&self, base_url: &str, category_id: &str) -> String {
        format!(
            "{}/category/day?cateid={}&fromdate={}&todate={}&allcate={}",
            base_url.trim_end_matches('/'),
            category_id,
            self.from.timestamp(),
            self.to.timestamp(),
            category_id
        )
    }
}

/// Fields extracted from an article page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticlePage {
    /// Trimmed headline text, empty if absent
    pub title: String,
    /// Raw publish date text, empty if absent
    pub raw_date: String,
    /// `data-component-input` of the comment box, if present
    pub component_input: Option<String>,
}

/// Plans the follow-up visits of a listing-context page
///
/// Applies the category resolver, the pagination walker and the article
/// discoverer to the page, in that order. Malformed elements are skipped.
///
/// # Arguments
///
/// * `html` - The page body
/// * `page_url` - The URL the page was served from (relative links resolve against it)
/// * `base_url` - The site root used to build category listing URLs
/// * `window` - The publication window of listing URLs
pub fn plan_listing_page(
    html: &str,
    page_url: &Url,
    base_url: &str,
    window: &CrawlWindow,
) -> Vec<CrawlAction> {
    let document = Html::parse_document(html);
    let mut actions = Vec::new();

    for category in extract_categories(&document) {
        let listing_url = window.listing_url(base_url, &category.id);
        match Url::parse(&listing_url) {
            Ok(url) => actions.push(CrawlAction::VisitListing(url)),
            Err(e) => tracing::debug!("Skipping category {}: {}", category.id, e),
        }
    }

    actions.extend(
        extract_hrefs(&document, PAGINATION_SELECTOR, page_url)
            .into_iter()
            .map(CrawlAction::VisitListing),
    );

    actions.extend(
        extract_hrefs(&document, ARTICLE_LINK_SELECTOR, page_url)
            .into_iter()
            .map(CrawlAction::VisitArticle),
    );

    actions
}

/// Extracts the categories of the site navigation
///
/// An entry counts when it has a non-empty `data-id` and its first link is
/// site-relative (starts with `/`) and not the bare root `/`.
pub fn extract_categories(document: &Html) -> Vec<Category> {
    let (Ok(item_selector), Ok(link_selector)) =
        (Selector::parse(NAV_ITEM_SELECTOR), Selector::parse("a"))
    else {
        return Vec::new();
    };

    document
        .select(&item_selector)
        .filter_map(|item| {
            let id = item.value().attr("data-id").unwrap_or("").trim();
            let link = item
                .select(&link_selector)
                .next()
                .and_then(|a| a.value().attr("href"))
                .unwrap_or("");

            if id.is_empty() || !link.starts_with('/') || link == "/" {
                tracing::trace!("Skipping navigation entry id={:?} link={:?}", id, link);
                return None;
            }

            Some(Category {
                id: id.to_string(),
                link: link.to_string(),
            })
        })
        .collect()
}

/// Extracts the fields of an article page
pub fn parse_article_page(html: &str) -> ArticlePage {
    let document = Html::parse_document(html);

    ArticlePage {
        title: child_text(&document, TITLE_SELECTOR),
        raw_date: child_text(&document, DATE_SELECTOR),
        component_input: child_attr(&document, COMMENT_BOX_SELECTOR, "data-component-input"),
    }
}

/// Resolves the `href` of every element matching `css`
fn extract_hrefs(document: &Html, css: &str, page_url: &Url) -> Vec<Url> {
    let Ok(selector) = Selector::parse(css) else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_link(href, page_url))
        .collect()
}

/// Concatenated, trimmed text of every element matching `css`
fn child_text(document: &Html, css: &str) -> String {
    let Ok(selector) = Selector::parse(css) else {
        return String::new();
    };

    document
        .select(&selector)
        .flat_map(|element: ElementRef<'_>| element.text())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Attribute of the first element matching `css`
fn child_attr(document: &Html, css: &str, attr: &str) -> Option<String> {
    let selector = Selector::parse(css).ok()?;

    document
        .select(&selector)
        .next()
        .and_then(|element| element.value().attr(attr))
        .map(str::to_string)
}
