use crate::client::{HEADER_RATE_LIMIT, HEADER_RATE_REMAINING, HEADER_RATE_RESET};

/// Rate limit status Github attaches to every API response.
///
/// GraphQL requests are limited to 5,000 points per hour. Note that 5,000 points per
/// hour is not the same as 5,000 calls per hour.
///
/// GitHub API docs: https://docs.github.com/en/graphql/overview/resource-limitations
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Rate {
    pub limit: usize,
    pub remaining: usize,
    /// UTC epoch seconds
    pub reset: u64,
}

impl Rate {
    pub(super) fn from_headers(headers: &reqwest::header::HeaderMap) -> Self {
        let mut rate = Self::default();

        if let Some(limit) = headers
            .get(HEADER_RATE_LIMIT)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.parse().ok())
        {
            rate.limit = limit;
        };

        if let Some(remaining) = headers
            .get(HEADER_RATE_REMAINING)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.parse().ok())
        {
            rate.remaining = remaining;
        };

        if let Some(reset) = headers
            .get(HEADER_RATE_RESET)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.parse().ok())
        {
            rate.reset = reset;
        };

        rate
    }
}
