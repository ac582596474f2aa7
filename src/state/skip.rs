/// Reasons a crawl context refuses to visit a URL
///
/// Every URL offered to a context is either admitted or skipped for exactly
/// one of these reasons.
use std::fmt;

/// Why a URL offered to a crawl context was not visited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// URL was already visited by this context
    Duplicate,

    /// URL would be visited beyond the context's maximum depth
    DepthExceeded,

    /// URL host is not one of the allowed domains
    DisallowedDomain,

    /// URL could not be parsed or is not HTTP(S)
    InvalidUrl,
}

impl SkipReason {
    /// Returns the string representation used in log lines
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Duplicate => "duplicate",
            Self::DepthExceeded => "depth_exceeded",
            Self::DisallowedDomain => "disallowed_domain",
            Self::InvalidUrl => "invalid_url",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
