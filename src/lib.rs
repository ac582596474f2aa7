//! Newsrank: most-liked article ranking for a news site
//!
//! This crate crawls a news site's category navigation, enumerates the articles
//! published in a trailing time window, looks up the comment likes of every
//! article and ranks the most-liked ones.

pub mod article;
pub mod config;
pub mod crawler;
pub mod engagement;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Newsrank operations
#[derive(Debug, Error)]
pub enum NewsrankError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Unexpected HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Missing engagement configuration on {url}")]
    MissingEngagementConfig { url: String },

    #[error("Article sink is closed, dropped record for {url}")]
    SinkClosed { url: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

/// Result type alias for Newsrank operations
pub type Result<T> = std::result::Result<T, NewsrankError>;

// Re-export commonly used types
pub use article::Article;
pub use config::Config;
pub use crawler::{crawl, CrawlReport};
pub use output::{rank_top, ArticleSink};
