use thiserror::Error;

/// Feed endpoint for the Midden- en West-Brabant dispatch region.
pub const DEFAULT_FEED_URL: &str =
    "https://www.alarmeringen.nl/feeds/region/midden-en-west-brabant.rss";

/// User agent sent with every feed request.
pub const USER_AGENT: &str = concat!("alarmfeed/", env!("CARGO_PKG_VERSION"));

/// Errors that can occur while retrieving the feed.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure (DNS, connection, TLS, body read)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
}

/// HTTP client for the dispatch feed.
///
/// Issues exactly one GET per [`FeedClient::fetch`] call. There is no retry,
/// no caching and no timeout beyond what the underlying `reqwest::Client`
/// was built with.
#[derive(Debug, Clone)]
pub struct FeedClient {
    http: reqwest::Client,
    url: String,
}

impl FeedClient {
    /// Creates a client for `url` using the given HTTP client.
    pub fn new(http: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }

    /// Builds a `reqwest::Client` with the crate's user agent.
    pub fn default_http() -> Result<reqwest::Client, FetchError> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(client)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetches the raw feed body.
    ///
    /// The response status is not inspected: a non-2xx response that carries
    /// a body is returned as-is and left to the parser to judge.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Network`] for any transport failure, including a
    /// body that could not be read to completion.
    pub async fn fetch(&self) -> Result<Vec<u8>, FetchError> {
        tracing::debug!(url = %self.url, "Fetching dispatch feed");

        let response = self.http.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(
                url = %self.url,
                status = %status,
                "Feed responded with non-success status, passing body to parser"
            );
        }

        let bytes = response.bytes().await?;
        tracing::debug!(url = %self.url, bytes = bytes.len(), "Feed body received");
        Ok(bytes.to_vec())
    }
}
