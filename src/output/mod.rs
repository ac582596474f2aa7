//! Output module: aggregation, ranking and reporting
//!
//! This module handles:
//! - Collecting article records from concurrent visit tasks ([`ArticleSink`])
//! - Ranking the collected records by likes ([`rank_top`])
//! - Writing the ranked list as JSON
//! - Summarising crawl statistics

mod json;
mod ranking;
mod sink;
pub mod stats;

pub use json::{to_json_string, write_ranking};
pub use ranking::rank_top;
pub use sink::ArticleSink;
pub use stats::{log_statistics, ContextStatistics, CrawlStatistics};
