//! Article records produced by the crawl
//!
//! An [`Article`] is created once per visited article page and never changes
//! afterwards. Its serialized form is the output record: `{url, title, time, likes}`.

mod date;

pub use date::{format_publish_time, parse_publish_time, zero_time};

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

/// A ranked article
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Article {
    /// Article page URL (unique within a run)
    pub url: String,

    /// Headline text, empty if the page has none
    pub title: String,

    /// Publish time; `None` when the page date could not be parsed
    #[serde(rename = "time", serialize_with = "serialize_publish_time")]
    pub publish_time: Option<DateTime<Utc>>,

    /// Engagement score: summed likes of the top-level comments
    pub likes: u64,
}

impl Article {
    /// Creates an article record
    pub fn new(
        url: impl Into<String>,
        title: impl Into<String>,
        publish_time: Option<DateTime<Utc>>,
        likes: u64,
    ) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            publish_time,
            likes,
        }
    }
}

/// Writes the publish time as RFC 3339, using the zero timestamp when unknown
fn serialize_publish_time<S>(
    publish_time: &Option<DateTime<Utc>>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_publish_time(publish_time.as_ref()))
}
