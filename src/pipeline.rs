use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;

use crate::classify::{classify, Announcement, ClassifierRules};
use crate::feed::{parse_feed, FeedClient, FetchError, ParseError};

/// Failure of a pipeline run. No announcements are produced in either case.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The feed could not be retrieved.
    #[error(transparent)]
    Fetch(#[from] FetchError),
    /// The feed body is not a usable RSS document.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl PipelineError {
    pub fn is_network(&self) -> bool {
        matches!(self, PipelineError::Fetch(_))
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, PipelineError::Parse(_))
    }
}

/// Fetch → parse → classify, producing announcements in feed order.
///
/// A pipeline holds no mutable state. Cloning is cheap and concurrent calls to
/// [`Pipeline::run`] are independent of each other; deciding which result to
/// show when runs overlap is up to the caller.
#[derive(Debug, Clone)]
pub struct Pipeline {
    client: FeedClient,
    rules: Arc<ClassifierRules>,
}

impl Pipeline {
    pub fn new(client: FeedClient, rules: ClassifierRules) -> Self {
        Self {
            client,
            rules: Arc::new(rules),
        }
    }

    pub fn rules(&self) -> &ClassifierRules {
        &self.rules
    }

    /// Runs one full refresh.
    ///
    /// # Errors
    ///
    /// - [`PipelineError::Fetch`] - transport failure; the feed was never parsed
    /// - [`PipelineError::Parse`] - the body is not a well-formed RSS document
    ///
    /// A feed with zero items is not an error and yields an empty list.
    pub async fn run(&self) -> Result<Vec<Announcement>, PipelineError> {
        let started = Instant::now();
        let bytes = self.client.fetch().await.inspect_err(|e| {
            tracing::warn!(url = %self.client.url(), error = %e, "Feed fetch failed");
        })?;

        let announcements = self.process(&bytes).inspect_err(|e| {
            tracing::warn!(url = %self.client.url(), error = %e, "Feed parse failed");
        })?;

        tracing::info!(
            url = %self.client.url(),
            announcements = announcements.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Feed refreshed"
        );
        Ok(announcements)
    }

    /// Parses and classifies a feed body that is already in hand.
    pub fn process(&self, bytes: &[u8]) -> Result<Vec<Announcement>, ParseError> {
        let items = parse_feed(bytes)?;
        Ok(items.iter().map(|item| classify(item, &self.rules)).collect())
    }
}
