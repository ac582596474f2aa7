use url::Url;

/// Extracts the lowercase host of a URL
///
/// # Examples
///
/// ```
/// use url::Url;
/// use newsrank::url::extract_domain;
///
/// let url = Url::parse("https://VnExpress.net/thoi-su").unwrap();
/// assert_eq!(extract_domain(&url), Some("vnexpress.net".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Returns true if the URL's host is one of the allowed domains
///
/// Matching is exact on the host: subdomains of an allowed domain are not
/// allowed unless listed themselves.
pub fn is_allowed_domain(url: &Url, allowed_domains: &[String]) -> bool {
    match extract_domain(url) {
        Some(domain) => allowed_domains.iter().any(|allowed| *allowed == domain),
        None => false,
    }
}
