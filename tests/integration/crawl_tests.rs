//! Integration tests for the crawler
//!
//! These tests use wiremock to stand in for the news site and its comments API
//! and run the full two-stage crawl end-to-end.

use chrono::{TimeZone, Utc};
use newsrank::config::Config;
use newsrank::crawler::{Coordinator, CrawlWindow};
use newsrank::output::to_json_string;
use newsrank::Article;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing both endpoints at the mock server
fn create_test_config(base_url: &str) -> Config {
    let mut config = Config::default();
    config.site.base_url = base_url.to_string();
    config.site.comments_api_url = format!("{}/index/get", base_url);
    config.crawler.parallelism = Some(4);
    config
}

fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body, "text/html; charset=utf-8")
}

/// Root page with a category navigation and optional article links
fn root_page(category_ids: &[&str], article_hrefs: &[&str]) -> String {
    let nav: String = category_ids
        .iter()
        .map(|id| format!(r#"<li data-id="{id}"><a href="/cat-{id}">Category {id}</a></li>"#))
        .collect();
    format!(
        r#"<html><body>
        <section id="wrap-main-nav"><nav><ul>
            <li data-id="1000000"><a href="/">Home</a></li>
            {nav}
        </ul></nav></section>
        {}
        </body></html>"#,
        article_list(article_hrefs)
    )
}

fn article_list(hrefs: &[&str]) -> String {
    hrefs
        .iter()
        .map(|href| {
            format!(
                r#"<article class="item-news"><h3 class="title-news"><a href="{href}">x</a></h3></article>"#
            )
        })
        .collect()
}

/// Listing page with article links and pagination links
fn listing_page(article_hrefs: &[&str], next_pages: &[&str]) -> String {
    let pagination: String = next_pages
        .iter()
        .map(|href| format!(r#"<a href="{href}">next</a>"#))
        .collect();
    format!(
        r#"<html><body>
        {}
        <div id="pagination"><div class="button-page">{pagination}</div></div>
        </body></html>"#,
        article_list(article_hrefs)
    )
}

/// Article page with headline, date and comment box
fn article_page(title: &str, date: &str, article_id: &str) -> String {
    format!(
        r#"<html><body>
        <section class="top-detail"><div class="container"><div class="sidebar-1">
            <div class="header-content"><span class="date">{date}</span></div>
            <h1 class="title-detail">{title}</h1>
        </div></div></section>
        <div id="box_comment_vne" data-component-input='{{"article_id":"{article_id}","article_type":"1","site_id":"1000000","category_id":"1001005","sign":"s","limit":24,"tab_active":"most_like"}}'></div>
        </body></html>"#
    )
}

fn comments(likes: &[i64]) -> ResponseTemplate {
    let items: Vec<_> = likes
        .iter()
        .map(|l| serde_json::json!({"comment_id": "1", "userlike": l, "replys": {"total": 0, "items": []}}))
        .collect();
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "error": 0,
        "errorDescription": "",
        "iscomment": 1,
        "data": {"total": items.len(), "totalitem": items.len(), "items": items, "items_pin": [], "offset": 0},
        "_csrf": "t"
    }))
}

async fn mount_html(server: &MockServer, page_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(html(body))
        .mount(server)
        .await;
}

async fn mount_category(server: &MockServer, id: &str, body: String) {
    Mock::given(method("GET"))
        .and(path("/category/day"))
        .and(query_param("cateid", id))
        .and(query_param("allcate", id))
        .respond_with(html(body))
        .mount(server)
        .await;
}

async fn mount_comments(server: &MockServer, article_id: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/index/get"))
        .and(query_param("objectid", article_id))
        .respond_with(response)
        .mount(server)
        .await;
}

fn find<'a>(articles: &'a [Article], suffix: &str) -> &'a Article {
    articles
        .iter()
        .find(|a| a.url.ends_with(suffix))
        .unwrap_or_else(|| panic!("no article ending in {}", suffix))
}

#[tokio::test]
async fn test_full_crawl_ranks_by_likes() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(&mock_server, "/", root_page(&["101", "102"], &["/a-1.html"])).await;
    mount_category(&mock_server, "101", listing_page(&["/a-2.html", "/a-3.html"], &[])).await;
    mount_category(&mock_server, "102", listing_page(&["/a-3.html", "/a-4.html"], &[])).await;

    mount_html(&mock_server, "/a-1.html", article_page("One", "15/3/2024, 09:30", "1")).await;
    mount_html(&mock_server, "/a-2.html", article_page("Two", "Thứ hai, 1/4/2024, 18:00 (GMT+7)", "2")).await;
    mount_html(&mock_server, "/a-3.html", article_page("Three", "not a date", "3")).await;
    mount_html(&mock_server, "/a-4.html", article_page("Four", "02/04/2024, 07:15", "4")).await;

    mount_comments(&mock_server, "1", comments(&[5, 5])).await;
    mount_comments(&mock_server, "2", comments(&[100])).await;
    mount_comments(&mock_server, "3", comments(&[30, 2])).await;
    mount_comments(&mock_server, "4", ResponseTemplate::new(500)).await;

    let config = create_test_config(&base_url);
    let coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    let report = coordinator.run().await.expect("Crawl failed");

    let likes: Vec<u64> = report.articles.iter().map(|a| a.likes).collect();
    assert_eq!(likes, vec![100, 32, 10, 0]);

    let one = find(&report.articles, "/a-1.html");
    assert_eq!(one.title, "One");
    assert_eq!(
        serde_json::to_value(one).unwrap()["time"],
        "2024-03-15T09:30:00Z"
    );

    let three = find(&report.articles, "/a-3.html");
    assert_eq!(three.publish_time, None);
    assert_eq!(
        serde_json::to_value(three).unwrap()["time"],
        "0001-01-01T00:00:00Z"
    );

    // Comments API failure keeps the article with zero likes
    let four = find(&report.articles, "/a-4.html");
    assert_eq!(four.likes, 0);
    assert_eq!(four.title, "Four");

    assert_eq!(report.stats.listing.admitted, 3);
    assert_eq!(report.stats.articles.admitted, 4);
    assert!(report.stats.articles.duplicates >= 1);
}

#[tokio::test]
async fn test_listing_urls_carry_window_bounds() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // 2023-04-29T00:00:00Z, seven days back is 2023-04-22T00:00:00Z
    let window = CrawlWindow::trailing(7, Utc.timestamp_opt(1_682_726_400, 0).unwrap());

    mount_html(&mock_server, "/", root_page(&["701"], &[])).await;
    Mock::given(method("GET"))
        .and(path("/category/day"))
        .and(query_param("cateid", "701"))
        .and(query_param("fromdate", "1682121600"))
        .and(query_param("todate", "1682726400"))
        .and(query_param("allcate", "701"))
        .respond_with(html(listing_page(&["/in-window.html"], &[])))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_html(
        &mock_server,
        "/in-window.html",
        article_page("In window", "25/4/2023, 08:00", "70"),
    )
    .await;
    mount_comments(&mock_server, "70", comments(&[6])).await;

    let report = Coordinator::with_window(create_test_config(&base_url), window)
        .unwrap()
        .run()
        .await
        .unwrap();

    assert_eq!(report.stats.listing.fetched, 2);
    assert_eq!(report.stats.listing.fetch_failed, 0);
    assert_eq!(report.articles.len(), 1);
    assert_eq!(report.articles[0].title, "In window");
    assert_eq!(report.articles[0].likes, 6);
}

#[tokio::test]
async fn test_invalid_config_is_rejected_before_crawling() {
    let mock_server = MockServer::start().await;
    let mut config = create_test_config(&mock_server.uri());
    config.crawler.parallelism = Some(0);

    let result = newsrank::crawl(config).await;

    assert!(matches!(result, Err(newsrank::NewsrankError::Config(_))));
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_article_linked_twice_produces_one_record() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(&mock_server, "/", root_page(&["201", "202"], &["/shared.html"])).await;
    mount_category(&mock_server, "201", listing_page(&["/shared.html"], &[])).await;
    mount_category(&mock_server, "202", listing_page(&["/shared.html#box_comment_vne"], &[])).await;

    Mock::given(method("GET"))
        .and(path("/shared.html"))
        .respond_with(html(article_page("Shared", "15/3/2024, 09:30", "77")))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/index/get"))
        .and(query_param("objectid", "77"))
        .respond_with(comments(&[3]))
        .expect(1)
        .mount(&mock_server)
        .await;

    let report = Coordinator::new(create_test_config(&base_url))
        .unwrap()
        .run()
        .await
        .unwrap();

    assert_eq!(report.articles.len(), 1);
    assert_eq!(report.articles[0].likes, 3);
    assert_eq!(report.stats.articles.admitted, 1);
    assert_eq!(report.stats.articles.duplicates, 2);
}

#[tokio::test]
async fn test_pagination_stops_at_max_depth() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // Root (depth 1) -> category (depth 2) -> page-2 (depth 3) -> page-3 (depth 4, never visited)
    mount_html(&mock_server, "/", root_page(&["301"], &[])).await;
    mount_category(&mock_server, "301", listing_page(&[], &["/page-2"])).await;
    for n in 2..=8 {
        let next = format!("/page-{}", n + 1);
        Mock::given(method("GET"))
            .and(path(format!("/page-{}", n)))
            .respond_with(html(listing_page(&[], &[next.as_str()])))
            .expect(if n == 2 { 1 } else { 0 })
            .mount(&mock_server)
            .await;
    }

    let report = Coordinator::new(create_test_config(&base_url))
        .unwrap()
        .run()
        .await
        .unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    let visited: Vec<String> = requests.iter().map(|r| r.url.path().to_string()).collect();

    assert_eq!(visited.len(), 3, "visited: {:?}", visited);
    assert!(visited.contains(&"/".to_string()));
    assert!(visited.contains(&"/category/day".to_string()));
    assert!(visited.contains(&"/page-2".to_string()));
    assert!(!visited.iter().any(|p| p == "/page-3"));

    assert_eq!(report.stats.listing.admitted, 3);
    assert_eq!(report.stats.listing.depth_exceeded, 1);
    assert!(report.articles.is_empty());
}

#[tokio::test]
async fn test_deeper_chain_visits_plateau() {
    // The number of listing pages visited does not grow with the chain length.
    let mut counts = Vec::new();

    for chain_length in [3, 6] {
        let mock_server = MockServer::start().await;
        let base_url = mock_server.uri();

        mount_html(&mock_server, "/", root_page(&["401"], &[])).await;
        mount_category(&mock_server, "401", listing_page(&[], &["/p-1"])).await;
        for n in 1..=chain_length {
            let next = format!("/p-{}", n + 1);
            mount_html(&mock_server, &format!("/p-{}", n), listing_page(&[], &[next.as_str()])).await;
        }

        let report = Coordinator::new(create_test_config(&base_url))
            .unwrap()
            .run()
            .await
            .unwrap();
        counts.push(report.stats.listing.fetched);
    }

    assert_eq!(counts, vec![3, 3]);
}

#[tokio::test]
async fn test_articles_from_deepest_listing_page_are_ranked() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(&mock_server, "/", root_page(&["501"], &[])).await;
    mount_category(&mock_server, "501", listing_page(&[], &["/page-2"])).await;
    mount_html(&mock_server, "/page-2", listing_page(&["/deep.html"], &["/page-3"])).await;
    mount_html(&mock_server, "/deep.html", article_page("Deep", "15/3/2024, 09:30", "9")).await;
    mount_comments(&mock_server, "9", comments(&[4])).await;

    let report = Coordinator::new(create_test_config(&base_url))
        .unwrap()
        .run()
        .await
        .unwrap();

    assert_eq!(report.articles.len(), 1);
    assert_eq!(report.articles[0].title, "Deep");
    assert_eq!(report.articles[0].likes, 4);
}

#[tokio::test]
async fn test_output_capped_at_top_n() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let hrefs: Vec<String> = (1..=12).map(|n| format!("/n-{}.html", n)).collect();
    let href_refs: Vec<&str> = hrefs.iter().map(String::as_str).collect();

    mount_html(&mock_server, "/", root_page(&["601"], &[])).await;
    mount_category(&mock_server, "601", listing_page(&href_refs, &[])).await;
    for n in 1..=12 {
        let id = n.to_string();
        mount_html(
            &mock_server,
            &format!("/n-{}.html", n),
            article_page(&format!("Article {}", n), "15/3/2024, 09:30", &id),
        )
        .await;
        mount_comments(&mock_server, &id, comments(&[n])).await;
    }

    let report = Coordinator::new(create_test_config(&base_url))
        .unwrap()
        .run()
        .await
        .unwrap();

    assert_eq!(report.stats.articles_collected, 12);
    assert_eq!(report.articles.len(), 10);
    assert!(report
        .articles
        .windows(2)
        .all(|pair| pair[0].likes >= pair[1].likes));
    assert_eq!(report.articles[0].likes, 12);
    assert_eq!(report.articles[9].likes, 3);
}

#[tokio::test]
async fn test_invalid_comment_payloads_score_zero() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(&mock_server, "/", root_page(&[], &["/bad-json.html", "/no-box.html"])).await;
    mount_html(&mock_server, "/bad-json.html", article_page("Bad JSON", "15/3/2024, 09:30", "11")).await;
    mount_html(
        &mock_server,
        "/no-box.html",
        "<html><body><h1>No comment box</h1></body></html>".to_string(),
    )
    .await;
    mount_comments(
        &mock_server,
        "11",
        ResponseTemplate::new(200).set_body_string("this is not json"),
    )
    .await;

    let report = Coordinator::new(create_test_config(&base_url))
        .unwrap()
        .run()
        .await
        .unwrap();

    assert_eq!(report.articles.len(), 2);
    assert!(report.articles.iter().all(|a| a.likes == 0));
    assert_eq!(find(&report.articles, "/no-box.html").title, "");
    assert_eq!(report.stats.zero_engagement, 2);
}

#[tokio::test]
async fn test_missing_article_page_is_skipped() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(&mock_server, "/", root_page(&[], &["/gone.html", "/here.html"])).await;
    mount_html(&mock_server, "/here.html", article_page("Here", "15/3/2024, 09:30", "12")).await;
    mount_comments(&mock_server, "12", comments(&[1])).await;

    let report = Coordinator::new(create_test_config(&base_url))
        .unwrap()
        .run()
        .await
        .unwrap();

    assert_eq!(report.articles.len(), 1);
    assert_eq!(report.articles[0].title, "Here");
    assert_eq!(report.stats.articles.fetch_failed, 1);
}

#[tokio::test]
async fn test_zero_articles_outputs_empty_array() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(&mock_server, "/", root_page(&[], &[])).await;

    let report = Coordinator::new(create_test_config(&base_url))
        .unwrap()
        .run()
        .await
        .expect("an empty crawl is not an error");

    assert!(report.articles.is_empty());
    assert_eq!(to_json_string(&report.articles).unwrap(), "[]\n");
}

#[tokio::test]
async fn test_off_site_links_not_followed() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(
        &mock_server,
        "/",
        root_page(&[], &["https://elsewhere.example.com/a.html"]),
    )
    .await;

    let report = Coordinator::new(create_test_config(&base_url))
        .unwrap()
        .run()
        .await
        .unwrap();

    assert!(report.articles.is_empty());
    assert_eq!(report.stats.articles.disallowed_domain, 1);
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 1);
}
