//! Fetches the Midden- en West-Brabant emergency dispatch feed and turns
//! each item into a classified [`Announcement`].
//!
//! ```ignore
//! use alarmfeed::{ClassifierRules, FeedClient, Pipeline, DEFAULT_FEED_URL};
//!
//! let client = FeedClient::new(FeedClient::default_http()?, DEFAULT_FEED_URL);
//! let pipeline = Pipeline::new(client, ClassifierRules::canonical());
//! for announcement in pipeline.run().await? {
//!     println!("{} {}", announcement.priority(), announcement.title());
//! }
//! ```

pub mod classify;
pub mod config;
pub mod feed;
pub mod pipeline;

pub use classify::{
    classify, Announcement, ClassifierRules, EmergencyType, IconKey, PriorityCode, Variant,
};
pub use config::{Config, ConfigError};
pub use feed::{FeedClient, FetchError, ParseError, RawFeedItem, DEFAULT_FEED_URL};
pub use pipeline::{Pipeline, PipelineError};
