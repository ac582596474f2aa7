use serde::Deserialize;

/// Root URL of the crawled site
pub const DEFAULT_BASE_URL: &str = "https://vnexpress.net";

/// Endpoint returning the comment batch of an article
pub const DEFAULT_COMMENTS_API_URL: &str = "https://usi-saas.vnexpress.net/index/get";

/// Main configuration structure for Newsrank
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Target site endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Site root; the crawl starts at `{base_url}/`
    #[serde(rename = "base-url", default = "default_base_url")]
    pub base_url: String,

    /// Comments API queried once per article
    #[serde(rename = "comments-api-url", default = "default_comments_api_url")]
    pub comments_api_url: String,

    /// Hosts both crawl contexts may visit (empty means the host of `base_url`)
    #[serde(rename = "allowed-domains", default)]
    pub allowed_domains: Vec<String>,
}

impl SiteConfig {
    /// Returns the allowed hosts, falling back to the host of `base_url`
    pub fn effective_allowed_domains(&self) -> Vec<String> {
        if !self.allowed_domains.is_empty() {
            return self
                .allowed_domains
                .iter()
                .map(|d| d.to_lowercase())
                .collect();
        }

        ::url::Url::parse(&self.base_url)
            .ok()
            .and_then(|u| u.host_str().map(|h| h.to_lowercase()))
            .into_iter()
            .collect()
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            comments_api_url: default_comments_api_url(),
            allowed_domains: Vec::new(),
        }
    }
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum depth of listing pages, the root page being depth 1
    #[serde(rename = "max-depth", default = "default_max_depth")]
    pub max_depth: u32,

    /// Concurrent fetches shared by both crawl contexts (default: available parallelism)
    #[serde(default)]
    pub parallelism: Option<usize>,

    /// Length of the trailing publication window, in days
    #[serde(rename = "window-days", default = "default_window_days")]
    pub window_days: u32,
}

impl CrawlerConfig {
    /// Resolves the concurrency cap, defaulting to the host's parallelism units
    pub fn effective_parallelism(&self) -> usize {
        self.parallelism.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4)
        })
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            parallelism: None,
            window_days: default_window_days(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name", default = "default_crawler_name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version", default = "default_crawler_version")]
    pub crawler_version: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: default_crawler_name(),
            crawler_version: default_crawler_version(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Number of ranked articles written out
    #[serde(rename = "top-n", default = "default_top_n")]
    pub top_n: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_comments_api_url() -> String {
    DEFAULT_COMMENTS_API_URL.to_string()
}

fn default_max_depth() -> u32 {
    3
}

fn default_window_days() -> u32 {
    7
}

fn default_crawler_name() -> String {
    env!("CARGO_PKG_NAME").to_string()
}

fn default_crawler_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_top_n() -> usize {
    10
}
