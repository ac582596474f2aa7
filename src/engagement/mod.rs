//! Engagement lookup for article pages
//!
//! Every article page embeds the parameters of its comment thread. This module
//! decodes them, queries the comments API and turns the returned batch into a
//! like count.
//!
//! # Failure policy
//!
//! | Condition | Score |
//! |-----------|-------|
//! | No comment box on the page | 0 |
//! | Malformed `data-component-input` blob | 0 |
//! | Network error | 0 |
//! | Non-2xx response | 0 |
//! | Malformed response body | 0 |
//!
//! Nothing is retried; a failed lookup is final for the run.

mod comments;
mod query;

pub use comments::{CommentBatch, CommentData, CommentItem, Replies};
pub use query::EngagementQuery;

use crate::NewsrankError;
use reqwest::Client;

/// Queries the comments API and returns the summed top-level likes
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `api_url` - The comments API endpoint
/// * `query` - The parameters decoded from the article page
///
/// # Returns
///
/// * `Ok(u64)` - Sum of `userlike` over the returned top-level comments
/// * `Err(NewsrankError)` - Network, status or decoding failure
pub async fn fetch_engagement(
    client: &Client,
    api_url: &str,
    query: &EngagementQuery,
) -> Result<u64, NewsrankError> {
    let response = client
        .get(api_url)
        .query(query)
        .send()
        .await
        .map_err(|source| NewsrankError::Http {
            url: api_url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(NewsrankError::Status {
            url: response.url().to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.bytes().await.map_err(|source| NewsrankError::Http {
        url: api_url.to_string(),
        source,
    })?;
    let batch: CommentBatch = serde_json::from_slice(&body)?;

    if batch.error != 0 {
        tracing::debug!(
            "Comments API reported error {} for article {}: {}",
            batch.error,
            query.article_id,
            batch.error_description.as_deref().unwrap_or("")
        );
    }

    Ok(batch.total_likes())
}

/// Computes the engagement score of an article page, degrading to 0 on failure
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `api_url` - The comments API endpoint
/// * `page_url` - The article page (used in log lines)
/// * `component_input` - The raw `data-component-input` attribute, if present
pub async fn score_article(
    client: &Client,
    api_url: &str,
    page_url: &str,
    component_input: Option<&str>,
) -> u64 {
    let result = match component_input {
        Some(raw) => match EngagementQuery::from_component_input(raw) {
            Ok(query) => fetch_engagement(client, api_url, &query).await,
            Err(e) => Err(NewsrankError::Json(e)),
        },
        None => Err(NewsrankError::MissingEngagementConfig {
            url: page_url.to_string(),
        }),
    };

    match result {
        Ok(likes) => likes,
        Err(e) => {
            tracing::warn!("Engagement lookup failed for {}: {}", page_url, e);
            0
        }
    }
}
