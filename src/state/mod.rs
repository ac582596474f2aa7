//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `WorkTracker`: counts in-flight visits of a crawl context and signals when they drain
//! - `SkipReason`: why a crawl context refused to visit a URL

mod skip;
mod work_tracker;

// Re-export main types
pub use skip::SkipReason;
pub use work_tracker::{WorkGuard, WorkTracker};
