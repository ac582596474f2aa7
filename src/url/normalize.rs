use crate::UrlError;
use url::Url;

/// Parses and normalizes a URL before it is handed to a crawl context
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed
/// 2. Reject anything but http and https
/// 3. Reject URLs without a host
/// 4. Remove the fragment (everything after #)
/// 5. Remove an empty query string (trailing ?)
///
/// Query parameters are kept in their original order: listing pages are
/// addressed entirely through their query string.
///
/// # Examples
///
/// ```
/// use newsrank::url::normalize_url;
///
/// let url = normalize_url("https://vnexpress.net/a-1.html#box_comment_vne").unwrap();
/// assert_eq!(url.as_str(), "https://vnexpress.net/a-1.html");
/// ```
pub fn normalize_url(url_str: &str) -> Result<Url, UrlError> {
    let mut url = Url::parse(url_str).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingDomain);
    }

    url.set_fragment(None);

    if url.query() == Some("") {
        url.set_query(None);
    }

    Ok(url)
}

/// Returns the key under which a crawl context remembers a visited URL
pub fn visit_key(url: &Url) -> String {
    let mut key = url.clone();
    key.set_fragment(None);
    if key.query() == Some("") {
        key.set_query(None);
    }
    key.to_string()
}
