//! Comment query embedded in article pages
//!
//! Article pages carry a JSON blob in the `data-component-input` attribute of
//! the comment box. Its fields are sent, renamed, as the query string of the
//! comments API.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Parameters of one comments API request
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EngagementQuery {
    #[serde(
        rename(deserialize = "article_id", serialize = "objectid"),
        default,
        deserialize_with = "string_or_number"
    )]
    pub article_id: String,

    #[serde(
        rename(deserialize = "article_type", serialize = "objecttype"),
        default,
        deserialize_with = "string_or_number"
    )]
    pub article_type: String,

    #[serde(
        rename(deserialize = "site_id", serialize = "siteid"),
        default,
        deserialize_with = "string_or_number"
    )]
    pub site_id: String,

    // The API spells this parameter "catetoryid".
    #[serde(
        rename(deserialize = "category_id", serialize = "catetoryid"),
        default,
        deserialize_with = "string_or_number"
    )]
    pub category_id: String,

    #[serde(default, deserialize_with = "string_or_number")]
    pub sign: String,

    #[serde(default, deserialize_with = "number_or_string")]
    pub limit: i64,

    #[serde(default, deserialize_with = "string_or_number")]
    pub tab_active: String,
}

impl EngagementQuery {
    /// Decodes the `data-component-input` blob of an article page
    pub fn from_component_input(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}

/// Accepts a JSON string, number, bool or null as a string
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(de::Error::custom(format!(
            "expected string or number, got {}",
            other
        ))),
    }
}

/// Accepts a JSON integer or a numeric string as an integer; null is 0
pub(crate) fn number_or_string<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(0),
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| de::Error::custom(format!("expected integer, got {}", n))),
        Value::String(s) if s.trim().is_empty() => Ok(0),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("expected integer, got \"{}\"", s))),
        other => Err(de::Error::custom(format!("expected integer, got {}", other))),
    }
}
