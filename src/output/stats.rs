//! Crawl statistics
//!
//! Counters kept by each crawl context, and the end-of-run summary written to
//! the log once ranking is done.

use crate::state::SkipReason;
use std::time::Duration;

/// Counters of a single crawl context
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextStatistics {
    /// URLs admitted for a visit
    pub admitted: u64,

    /// Offers rejected because the URL was already admitted
    pub duplicates: u64,

    /// Offers rejected by the depth limit
    pub depth_exceeded: u64,

    /// Offers rejected because of their host
    pub disallowed_domain: u64,

    /// Offers that were not valid HTTP(S) URLs
    pub invalid_url: u64,

    /// Pages fetched successfully
    pub fetched: u64,

    /// Pages whose fetch failed (network, status, content type)
    pub fetch_failed: u64,
}

impl ContextStatistics {
    /// Counts a rejected offer
    pub fn record_skip(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::Duplicate => self.duplicates += 1,
            SkipReason::DepthExceeded => self.depth_exceeded += 1,
            SkipReason::DisallowedDomain => self.disallowed_domain += 1,
            SkipReason::InvalidUrl => self.invalid_url += 1,
        }
    }

    /// Total number of rejected offers
    pub fn skipped(&self) -> u64 {
        self.duplicates + self.depth_exceeded + self.disallowed_domain + self.invalid_url
    }
}

/// Crawl statistics summary
#[derive(Debug, Clone, Default)]
pub struct CrawlStatistics {
    /// Listing-context counters (root, category and pagination pages)
    pub listing: ContextStatistics,

    /// Article-context counters
    pub articles: ContextStatistics,

    /// Article records collected before ranking
    pub articles_collected: u64,

    /// Collected articles whose engagement score is 0
    pub zero_engagement: u64,

    /// Articles in the ranked output
    pub articles_ranked: u64,

    /// Wall-clock duration of the crawl
    pub elapsed: Duration,
}

/// Logs a crawl statistics summary
pub fn log_statistics(stats: &CrawlStatistics) {
    tracing::info!(
        "Listing pages: {} admitted, {} fetched, {} failed, {} skipped ({} beyond max depth)",
        stats.listing.admitted,
        stats.listing.fetched,
        stats.listing.fetch_failed,
        stats.listing.skipped(),
        stats.listing.depth_exceeded
    );
    tracing::info!(
        "Article pages: {} admitted, {} fetched, {} failed, {} duplicates",
        stats.articles.admitted,
        stats.articles.fetched,
        stats.articles.fetch_failed,
        stats.articles.duplicates
    );
    tracing::info!(
        "Articles: {} collected ({} without likes), {} ranked in {:.2?}",
        stats.articles_collected,
        stats.zero_engagement,
        stats.articles_ranked,
        stats.elapsed
    );
}
