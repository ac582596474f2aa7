//! Comments API response model
//!
//! The API is loosely typed: ids flip between strings and numbers, many fields
//! are nullable and `rating` is sometimes an empty object. Every field is
//! optional here; only `data.items[].userlike` matters for scoring.

use crate::engagement::query::{number_or_string, string_or_number};
use serde::Deserialize;
use serde_json::Value;

/// A decoded comments API response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentBatch {
    #[serde(default, deserialize_with = "number_or_string")]
    pub error: i64,

    #[serde(rename = "errorDescription", default)]
    pub error_description: Option<String>,

    #[serde(default)]
    pub iscomment: Option<Value>,

    #[serde(default)]
    pub data: Option<CommentData>,

    #[serde(rename = "_csrf", default)]
    pub csrf: Option<String>,
}

/// The `data` object of a response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentData {
    #[serde(default, deserialize_with = "number_or_string")]
    pub total: i64,

    #[serde(default, deserialize_with = "number_or_string")]
    pub totalitem: i64,

    #[serde(default)]
    pub items: Vec<CommentItem>,

    /// Pinned comments; never counted towards the score
    #[serde(default)]
    pub items_pin: Option<Vec<Value>>,

    #[serde(default, deserialize_with = "number_or_string")]
    pub offset: i64,
}

/// A top-level comment
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentItem {
    #[serde(default, deserialize_with = "string_or_number")]
    pub comment_id: String,

    #[serde(default, deserialize_with = "string_or_number")]
    pub parent_id: String,

    #[serde(default, deserialize_with = "string_or_number")]
    pub article_id: String,

    #[serde(default)]
    pub content: Option<String>,

    #[serde(default)]
    pub full_name: Option<String>,

    #[serde(default)]
    pub creation_time: Option<i64>,

    #[serde(default)]
    pub time: Option<String>,

    #[serde(default, deserialize_with = "number_or_string")]
    pub userlike: i64,

    #[serde(default)]
    pub t_r_1: Option<i64>,

    #[serde(default)]
    pub t_r_2: Option<i64>,

    #[serde(default)]
    pub t_r_3: Option<i64>,

    #[serde(default)]
    pub t_r_4: Option<i64>,

    /// Nested replies; carried in the payload but not traversed
    #[serde(default)]
    pub replys: Option<Replies>,

    #[serde(default)]
    pub userid: Option<i64>,

    #[serde(rename = "type", default)]
    pub kind: Option<i64>,

    #[serde(default)]
    pub like_ismember: Option<bool>,

    #[serde(default)]
    pub rating: Option<Value>,

    #[serde(default)]
    pub is_pin: Option<i64>,
}

/// Replies nested under a comment
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Replies {
    #[serde(default)]
    pub total: Option<i64>,

    #[serde(default)]
    pub items: Vec<Value>,
}

impl CommentBatch {
    /// Sums the like counts of the returned top-level comments
    ///
    /// Replies nested under a comment and pinned comments (`items_pin`) are
    /// not counted. Negative counts are treated as zero.
    pub fn total_likes(&self) -> u64 {
        self.data
            .as_ref()
            .map(|data| {
                data.items
                    .iter()
                    .map(|item| item.userlike.max(0) as u64)
                    .sum()
            })
            .unwrap_or(0)
    }
}
