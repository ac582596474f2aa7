//! Tolerant parsing of article publish dates
//!
//! Article pages print dates like `Thứ sáu, 15/3/2024, 09:30 (GMT+7)`. Only the
//! `day/month/year, hour:minute` part is used and it is read as UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use regex::Regex;
use std::sync::OnceLock;

/// Layout of the extracted `d/m/Y H:M` string; chrono accepts unpadded day and month
const DATE_LAYOUT: &str = "%d/%m/%Y %H:%M";

fn date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(\d{1,2}/\d{1,2}/\d{4}),\s(\d{2}:\d{2})").expect("date pattern is valid")
    })
}

/// Parses the publish date printed on an article page
///
/// Accepts `DD/MM/YYYY, HH:MM` with one- or two-digit day and month anywhere
/// in the input. Returns `None` when no pattern matches or the date does not
/// exist; a bad date is never an error.
///
/// # Examples
///
/// ```
/// use newsrank::article::parse_publish_time;
///
/// let time = parse_publish_time("Thứ sáu, 15/3/2024, 09:30 (GMT+7)").unwrap();
/// assert_eq!(time.to_rfc3339(), "2024-03-15T09:30:00+00:00");
/// assert!(parse_publish_time("not a date").is_none());
/// ```
pub fn parse_publish_time(raw: &str) -> Option<DateTime<Utc>> {
    let captures = date_pattern().captures(raw)?;
    let candidate = format!("{} {}", &captures[1], &captures[2]);

    NaiveDateTime::parse_from_str(&candidate, DATE_LAYOUT)
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// The timestamp written for articles without a parseable date
pub fn zero_time() -> DateTime<Utc> {
    let naive = NaiveDate::from_ymd_opt(1, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default();
    Utc.from_utc_datetime(&naive)
}

/// Formats a publish time as RFC 3339 (`Z` suffix, whole seconds)
pub fn format_publish_time(publish_time: Option<&DateTime<Utc>>) -> String {
    publish_time
        .copied()
        .unwrap_or_else(zero_time)
        .to_rfc3339_opts(SecondsFormat::AutoSi, true)
}
