//! Configuration module for Newsrank
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key is optional: an empty file (or no file at all) yields the defaults
//! that target the production site.
//!
//! # Example
//!
//! ```no_run
//! use newsrank::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("newsrank.toml")).unwrap();
//! println!("Listing pages are crawled to depth {}", config.crawler.max_depth);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, OutputConfig, SiteConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
