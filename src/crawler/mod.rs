//! Crawler module for the two-stage ranking crawl
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching of listing and article pages
//! - Document queries turning pages into follow-up actions and article fields
//! - Crawl contexts with their own visited sets, depth limits and work tracking
//! - Overall crawl coordination and completion

mod context;
mod coordinator;
mod fetcher;
mod parser;

pub use context::{ContextSettings, CrawlContext, Visit};
pub use coordinator::{run_crawl, Coordinator, CrawlReport};
pub use fetcher::{build_http_client, fetch_url, FetchResult};
pub use parser::{
    extract_categories, parse_article_page, plan_listing_page, ArticlePage, Category,
    CrawlAction, CrawlWindow,
};

use crate::config::Config;
use crate::NewsrankError;

/// Runs a complete crawl operation
///
/// This is the main entry point for a ranking run. It will:
/// 1. Build the HTTP client and both crawl contexts
/// 2. Visit the site root, categories and their pagination
/// 3. Visit every discovered article and look up its likes
/// 4. Rank the collected articles
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlReport)` - The ranked articles and run statistics
/// * `Err(NewsrankError)` - The crawl could not be set up
pub async fn crawl(config: Config) -> Result<CrawlReport, NewsrankError> {
    run_crawl(config).await
}
