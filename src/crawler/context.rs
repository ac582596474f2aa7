//! Crawl contexts: independent, depth- and domain-bounded traversal units
//!
//! This module handles:
//! - Per-context URL deduplication (a URL is admitted at most once per run)
//! - Per-context depth limits
//! - Allowed-domain filtering
//! - Tracking in-flight visits so the coordinator can wait for a context to drain
//! - Sharing one global concurrency budget between contexts via a semaphore

use crate::output::ContextStatistics;
use crate::state::{SkipReason, WorkGuard, WorkTracker};
use crate::url::{is_allowed_domain, normalize_url, visit_key};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use url::Url;

/// Static settings of a crawl context
#[derive(Debug, Clone)]
pub struct ContextSettings {
    /// Maximum visit depth (the first visit of a context is depth 1)
    pub max_depth: u32,

    /// Hosts this context may visit
    pub allowed_domains: Vec<String>,
}

/// An admitted visit
///
/// Holding a `Visit` keeps its context busy: the context only drains once every
/// admitted visit has been dropped.
#[derive(Debug)]
pub struct Visit {
    /// The URL to fetch
    pub url: Url,

    /// Depth of this visit within its context
    pub depth: u32,

    _guard: WorkGuard,
}

/// A crawl context
///
/// Each context owns its visited set, depth limit and work tracker. Contexts
/// created from the same semaphore share its permits and nothing else.
pub struct CrawlContext {
    /// Context name used in log lines
    name: &'static str,

    settings: ContextSettings,

    /// Visit keys of every admitted URL
    visited: Mutex<HashSet<String>>,

    tracker: WorkTracker,

    /// Global semaphore for limiting concurrent fetches
    limiter: Arc<Semaphore>,

    stats: Mutex<ContextStatistics>,
}

impl CrawlContext {
    /// Creates a new crawl context
    ///
    /// # Arguments
    ///
    /// * `name` - Context name used in log lines
    /// * `settings` - Depth limit and allowed domains
    /// * `limiter` - Concurrency budget, possibly shared with other contexts
    pub fn new(name: &'static str, settings: ContextSettings, limiter: Arc<Semaphore>) -> Self {
        Self {
            name,
            settings,
            visited: Mutex::new(HashSet::new()),
            tracker: WorkTracker::new(),
            limiter,
            stats: Mutex::new(ContextStatistics::default()),
        }
    }

    /// Returns the context name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Offers a URL to this context
    ///
    /// Checks, in order: the URL parses, the depth is within the limit, the
    /// host is allowed, and the URL has not been admitted before. An admitted
    /// URL is recorded as visited immediately, so concurrent offers of the
    /// same URL admit it once.
    ///
    /// # Returns
    ///
    /// * `Ok(Visit)` - The URL must now be fetched; the context stays busy until the visit is dropped
    /// * `Err(SkipReason)` - The URL is not visited
    pub fn admit(&self, url: &str, depth: u32) -> Result<Visit, SkipReason> {
        let decision = self.check(url, depth);

        let mut stats = self.stats();
        match decision {
            Ok(url) => {
                stats.admitted += 1;
                tracing::trace!("[{}] admitted {} at depth {}", self.name, url, depth);
                Ok(Visit {
                    url,
                    depth,
                    _guard: self.tracker.begin(),
                })
            }
            Err(reason) => {
                stats.record_skip(reason);
                tracing::trace!("[{}] skipped {} ({})", self.name, url, reason);
                Err(reason)
            }
        }
    }

    fn check(&self, url: &str, depth: u32) -> Result<Url, SkipReason> {
        let url = normalize_url(url).map_err(|_| SkipReason::InvalidUrl)?;

        if depth > self.settings.max_depth {
            return Err(SkipReason::DepthExceeded);
        }

        if !is_allowed_domain(&url, &self.settings.allowed_domains) {
            return Err(SkipReason::DisallowedDomain);
        }

        let mut visited = self.visited.lock().unwrap_or_else(PoisonError::into_inner);
        if !visited.insert(visit_key(&url)) {
            return Err(SkipReason::Duplicate);
        }

        Ok(url)
    }

    /// Waits for a fetch slot from the shared concurrency budget
    ///
    /// Returns None only if the semaphore was closed.
    pub async fn acquire(&self) -> Option<OwnedSemaphorePermit> {
        Arc::clone(&self.limiter).acquire_owned().await.ok()
    }

    /// Records the outcome of a page fetch
    pub fn record_fetch(&self, success: bool) {
        let mut stats = self.stats();
        if success {
            stats.fetched += 1;
        } else {
            stats.fetch_failed += 1;
        }
    }

    /// Waits until no admitted visit of this context is alive
    pub async fn wait_drained(&self) {
        self.tracker.wait_drained().await;
        tracing::debug!("[{}] crawl context drained", self.name);
    }

    /// Returns the number of visits still in flight
    pub fn pending(&self) -> usize {
        self.tracker.pending()
    }

    /// Returns the number of distinct URLs admitted so far
    pub fn visited_count(&self) -> usize {
        self.visited
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns a snapshot of this context's counters
    pub fn statistics(&self) -> ContextStatistics {
        self.stats().clone()
    }

    fn stats(&self) -> MutexGuard<'_, ContextStatistics> {
        self.stats.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
