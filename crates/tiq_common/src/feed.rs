//! HTTP client for the ticket feed.
//!
//! The feed is a single GET returning a JSON array of ticket records.
//! Transport and decode problems surface as one [`FeedError`]; the pure
//! pipeline downstream only ever sees a valid (possibly empty) collection.

use std::time::Duration;

use thiserror::Error;
use tracing::{debug, warn};

use crate::ticket::Ticket;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("feed request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("feed returned HTTP {0}")]
    Status(reqwest::StatusCode),
    #[error("feed payload is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Thin wrapper around a reqwest client pinned to one feed URL
#[derive(Debug, Clone)]
pub struct FeedClient {
    http: reqwest::Client,
    url: String,
}

impl FeedClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, FeedError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the current ticket collection.
    ///
    /// Non-2xx responses are failures. A 2xx payload that is valid JSON
    /// but not an array yields an empty collection; array elements that
    /// fail to decode are skipped rather than poisoning the refresh.
    pub async fn fetch(&self) -> Result<Vec<Ticket>, FeedError> {
        let response = self.http.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status));
        }

        let body = response.text().await?;
        let value: serde_json::Value = serde_json::from_str(&body)?;
        let Some(items) = value.as_array() else {
            warn!("feed payload is not an array, treating as empty");
            return Ok(Vec::new());
        };

        let mut tickets = Vec::with_capacity(items.len());
        for item in items {
            match serde_json::from_value::<Ticket>(item.clone()) {
                Ok(t) => tickets.push(t),
                Err(e) => debug!("skipping undecodable feed record: {e}"),
            }
        }
        debug!(count = tickets.len(), "feed fetch complete");
        Ok(tickets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builds_with_timeout() {
        let client = FeedClient::new("https://example.com/tickets", Duration::from_secs(5));
        assert_eq!(client.unwrap().url(), "https://example.com/tickets");
    }

    #[test]
    fn test_error_messages_are_single_line() {
        let err = FeedError::Status(reqwest::StatusCode::BAD_GATEWAY);
        assert_eq!(err.to_string(), "feed returned HTTP 502 Bad Gateway");
    }
}
