//! Feed retrieval and parsing.
//!
//! - [`client`] - single-shot HTTP GET of the dispatch feed via `reqwest`
//! - [`parser`] - event-driven RSS item extraction using `quick-xml`
//!
//! # Example
//!
//! ```ignore
//! use alarmfeed::feed::{parse_feed, FeedClient, DEFAULT_FEED_URL};
//!
//! let client = FeedClient::new(FeedClient::default_http()?, DEFAULT_FEED_URL);
//! let items = parse_feed(&client.fetch().await?)?;
//! ```

mod client;
mod parser;

pub use client::{FeedClient, FetchError, DEFAULT_FEED_URL, USER_AGENT};
pub use parser::{
    normalize_pub_date, parse_feed, ParseError, RawFeedItem, NO_DATE, NO_DESCRIPTION, NO_LINK,
    NO_TITLE,
};
