//! URL handling module for Newsrank
//!
//! This module provides link resolution, domain extraction and the
//! normalization used as the deduplication key of crawl contexts.

mod domain;
mod normalize;

use ::url::Url;

// Re-export main functions
pub use domain::{extract_domain, is_allowed_domain};
pub use normalize::{normalize_url, visit_key};

/// Resolves a link href against the page it was found on
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - fragment-only links
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
pub fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) if matches!(absolute_url.scheme(), "http" | "https") => {
            Some(absolute_url)
        }
        _ => None,
    }
}
