//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the orchestration of a ranking run, including:
//! - Owning the listing and article crawl contexts and their shared concurrency budget
//! - Turning listing-page actions into visits on the right context
//! - Producing one article record per visited article page
//! - Defining completion: listing drained, then article drained, then the sink closes

use crate::article::{parse_publish_time, Article};
use crate::config::{validate, Config};
use crate::crawler::context::{ContextSettings, CrawlContext, Visit};
use crate::crawler::parser::{parse_article_page, plan_listing_page, CrawlAction, CrawlWindow};
use crate::crawler::{build_http_client, fetch_url, FetchResult};
use crate::engagement::score_article;
use crate::output::{rank_top, ArticleSink, CrawlStatistics};
use crate::NewsrankError;
use chrono::Utc;
use reqwest::Client;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use url::Url;

/// Outcome of a completed crawl
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// The top articles, most liked first
    pub articles: Vec<Article>,

    /// Counters of the run
    pub stats: CrawlStatistics,
}

/// Main crawler coordinator structure
pub struct Coordinator {
    config: Arc<Config>,
    client: Client,
    base_url: Url,
    window: CrawlWindow,
    listing: CrawlContext,
    articles: CrawlContext,
    sink: ArticleSink,
}

impl Coordinator {
    /// Creates a new coordinator whose window ends now
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(NewsrankError)` - Invalid configuration or HTTP client construction failure
    pub fn new(config: Config) -> Result<Self, NewsrankError> {
        let window = CrawlWindow::trailing(config.crawler.window_days, Utc::now());
        Self::with_window(config, window)
    }

    /// Creates a new coordinator with an explicit publication window
    pub fn with_window(config: Config, window: CrawlWindow) -> Result<Self, NewsrankError> {
        validate(&config)?;

        let base_url = Url::parse(&config.site.base_url)?;
        let client = build_http_client(&config.user_agent)?;

        let parallelism = config.crawler.effective_parallelism();
        let limiter = Arc::new(Semaphore::new(parallelism));
        let allowed_domains = config.site.effective_allowed_domains();

        let settings = ContextSettings {
            max_depth: config.crawler.max_depth,
            allowed_domains,
        };
        let listing = CrawlContext::new("listing", settings.clone(), Arc::clone(&limiter));
        let articles = CrawlContext::new("article", settings, limiter);

        tracing::debug!(
            "Coordinator ready: parallelism {}, max depth {}, window {} .. {}",
            parallelism,
            config.crawler.max_depth,
            window.from,
            window.to
        );

        Ok(Self {
            config: Arc::new(config),
            client,
            base_url,
            window,
            listing,
            articles,
            sink: ArticleSink::new(),
        })
    }

    /// Runs the crawl to completion and ranks the collected articles
    ///
    /// This method:
    /// 1. Seeds the listing context with the site root
    /// 2. Waits for the listing context to drain (no listing page can schedule more work)
    /// 3. Waits for the article context to drain (every article record is published)
    /// 4. Closes the sink and ranks its records
    pub async fn run(self) -> Result<CrawlReport, NewsrankError> {
        let start_time = Instant::now();
        let this = Arc::new(self);

        tracing::info!("Starting crawl at {}", this.base_url);
        let root = this.base_url.to_string();
        this.schedule_listing(&root, 1);

        // Article visits are only scheduled by listing pages, so the listing
        // context has to drain first.
        this.listing.wait_drained().await;
        this.articles.wait_drained().await;

        let collected = this.sink.close().unwrap_or_default();
        let articles_collected = collected.len() as u64;
        let zero_engagement = collected.iter().filter(|a| a.likes == 0).count() as u64;

        let ranked = rank_top(collected, this.config.output.top_n);

        let stats = CrawlStatistics {
            listing: this.listing.statistics(),
            articles: this.articles.statistics(),
            articles_collected,
            zero_engagement,
            articles_ranked: ranked.len() as u64,
            elapsed: start_time.elapsed(),
        };

        tracing::info!(
            "Crawl completed: {} articles collected in {:?}",
            articles_collected,
            stats.elapsed
        );

        Ok(CrawlReport {
            articles: ranked,
            stats,
        })
    }

    /// Offers a URL to the listing context and spawns its visit if admitted
    fn schedule_listing(self: &Arc<Self>, url: &str, depth: u32) {
        if let Ok(visit) = self.listing.admit(url, depth) {
            let this = Arc::clone(self);
            tokio::spawn(async move { this.visit_listing(visit).await });
        }
    }

    /// Offers a URL to the article context and spawns its visit if admitted
    ///
    /// Article visits always start at depth 1 of the article context.
    fn schedule_article(self: &Arc<Self>, url: &str) {
        if let Ok(visit) = self.articles.admit(url, 1) {
            let this = Arc::clone(self);
            tokio::spawn(async move { this.visit_article(visit).await });
        }
    }

    /// Fetches a page under a permit of the shared budget
    ///
    /// Returns the final URL and body on success; failures are logged and counted.
    async fn fetch_page(&self, context: &CrawlContext, url: &Url) -> Option<(Url, String)> {
        let _permit = context.acquire().await?;
        tracing::info!("Visiting {}", url);

        let result = fetch_url(&self.client, url.as_str()).await;
        context.record_fetch(result.is_success());

        match result {
            FetchResult::Success {
                final_url, body, ..
            } => {
                let final_url = Url::parse(&final_url).unwrap_or_else(|_| url.clone());
                Some((final_url, body))
            }
            FetchResult::ContentMismatch { content_type } => {
                tracing::debug!(
                    "[{}] Skipping {}: expected HTML, got {}",
                    context.name(),
                    url,
                    content_type
                );
                None
            }
            FetchResult::HttpError { status_code } => {
                tracing::warn!("[{}] HTTP {} for {}", context.name(), status_code, url);
                None
            }
            FetchResult::NetworkError { error } => {
                tracing::warn!("[{}] Failed to fetch {}: {}", context.name(), url, error);
                None
            }
        }
    }

    /// Visits a root, category or pagination page
    ///
    /// The visit (and so the listing context) stays busy until every follow-up
    /// URL has been offered to its context.
    async fn visit_listing(self: Arc<Self>, visit: Visit) {
        let Some((page_url, body)) = self.fetch_page(&self.listing, &visit.url).await else {
            return;
        };

        let actions = plan_listing_page(
            &body,
            &page_url,
            &self.config.site.base_url,
            &self.window,
        );
        tracing::debug!(
            "{} (depth {}) planned {} follow-up visits",
            visit.url,
            visit.depth,
            actions.len()
        );

        for action in actions {
            match action {
                CrawlAction::VisitListing(url) => {
                    self.schedule_listing(url.as_str(), visit.depth + 1)
                }
                CrawlAction::VisitArticle(url) => self.schedule_article(url.as_str()),
            }
        }
    }

    /// Visits an article page and publishes its record
    async fn visit_article(self: Arc<Self>, visit: Visit) {
        let article = {
            let Some((_, body)) = self.fetch_page(&self.articles, &visit.url).await else {
                return;
            };
            let page = parse_article_page(&body);

            let _permit = self.articles.acquire().await;
            let likes = score_article(
                &self.client,
                &self.config.site.comments_api_url,
                visit.url.as_str(),
                page.component_input.as_deref(),
            )
            .await;

            Article::new(
                visit.url.as_str(),
                page.title,
                parse_publish_time(&page.raw_date),
                likes,
            )
        };

        if let Err(e) = self.sink.publish(article) {
            tracing::error!("{}", e);
        }
    }
}

/// Runs a complete crawl with the given configuration
///
/// # Example
///
/// ```no_run
/// use newsrank::config::Config;
/// use newsrank::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let report = run_crawl(Config::default()).await?;
/// println!("{} articles ranked", report.articles.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: Config) -> Result<CrawlReport, NewsrankError> {
    Coordinator::new(config)?.run().await
}
